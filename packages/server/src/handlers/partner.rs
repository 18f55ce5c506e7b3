use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::*;
use tracing::{info, instrument};

use super::next_order;
use crate::entity::partner;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::shared::OkResponse;
use crate::models::showcase::{
    CreatePartnerRequest, PartnerEnvelope, PartnerListResponse, PartnerResponse,
    UpdatePartnerRequest, encode_optional_image, parse_id, required_text, validate_order,
};
use crate::state::AppState;

const NOT_FOUND: &str = "Partner not found";

#[utoipa::path(
    get,
    path = "/",
    tag = "Partners",
    operation_id = "listActivePartners",
    summary = "Active partners",
    description = "Active partners in display order.",
    responses(
        (status = 200, description = "Partners", body = PartnerListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<PartnerListResponse>, AppError> {
    let partners = partner::Entity::find()
        .filter(partner::Column::Active.eq(true))
        .order_by_asc(partner::Column::Order)
        .order_by_asc(partner::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(partners.try_into()?))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Partners",
    operation_id = "listPartners",
    summary = "All partners",
    responses(
        (status = 200, description = "Partners", body = PartnerListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_all(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<PartnerListResponse>, AppError> {
    let partners = partner::Entity::find()
        .order_by_asc(partner::Column::Order)
        .order_by_asc(partner::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(partners.try_into()?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Partners",
    operation_id = "createPartner",
    summary = "Add a partner",
    description = "`name` is required. `website` defaults to empty and `order` to the number of existing partners.",
    request_body = CreatePartnerRequest,
    responses(
        (status = 201, description = "Partner created", body = PartnerEnvelope),
        (status = 400, description = "Missing name or negative order (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn create(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePartnerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = required_text(payload.name, "name")?;
    validate_order(payload.order)?;

    let order = match payload.order {
        Some(order) => order,
        None => next_order::<partner::Entity>(&state.db).await?,
    };

    let now = Utc::now();
    let model = partner::ActiveModel {
        name: Set(name),
        logo: Set(encode_optional_image(payload.logo.as_ref())?),
        website: Set(payload.website.unwrap_or_default().trim().to_string()),
        order: Set(order),
        active: Set(payload.active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(id = model.id, order, "Partner created");
    Ok((
        StatusCode::CREATED,
        Json(PartnerEnvelope {
            partner: model.try_into()?,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Partners",
    operation_id = "updatePartner",
    summary = "Update a partner",
    description = "Only provided fields change. `logo: null` removes the logo reference.",
    params(("id" = i32, Path, description = "Partner ID")),
    request_body = UpdatePartnerRequest,
    responses(
        (status = 200, description = "Partner updated", body = PartnerEnvelope),
        (status = 400, description = "Blank name or negative order (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Partner not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdatePartnerRequest>,
) -> Result<Json<PartnerEnvelope>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;
    validate_order(payload.order)?;
    let name = payload
        .name
        .map(|n| required_text(Some(n), "name"))
        .transpose()?;

    let existing = find_partner(&state.db, id).await?;
    let mut active: partner::ActiveModel = existing.into();

    if let Some(name) = name {
        active.name = Set(name);
    }
    if let Some(logo) = &payload.logo {
        active.logo = Set(encode_optional_image(logo.as_ref())?);
    }
    if let Some(website) = payload.website {
        active.website = Set(website.trim().to_string());
    }
    if let Some(order) = payload.order {
        active.order = Set(order);
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    active.updated_at = Set(Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(PartnerEnvelope {
        partner: model.try_into()?,
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Partners",
    operation_id = "deletePartner",
    summary = "Delete a partner",
    description = "Removes the partner, then attempts to remove its logo from the media host.",
    params(("id" = i32, Path, description = "Partner ID")),
    responses(
        (status = 200, description = "Partner deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Partner not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn delete(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let existing = PartnerResponse::try_from(find_partner(&state.db, id).await?)?;

    partner::Entity::delete_by_id(id).exec(&state.db).await?;
    if let Some(logo) = &existing.logo {
        state.media.discard(logo).await;
    }

    info!(id, "Partner deleted");
    Ok(Json(OkResponse::new()))
}

async fn find_partner<C: ConnectionTrait>(db: &C, id: i32) -> Result<partner::Model, AppError> {
    partner::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}
