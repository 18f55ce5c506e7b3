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
use crate::entity::annual_report;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::shared::OkResponse;
use crate::models::showcase::{
    AnnualReportEnvelope, AnnualReportListResponse, AnnualReportResponse,
    CreateAnnualReportRequest, UpdateAnnualReportRequest, encode_optional_image, parse_id,
    required_text, validate_order,
};
use crate::state::AppState;

const NOT_FOUND: &str = "Report not found";

#[utoipa::path(
    get,
    path = "/",
    tag = "Reports",
    operation_id = "listActiveReports",
    summary = "Active annual reports",
    description = "Active reports in display order.",
    responses(
        (status = 200, description = "Reports", body = AnnualReportListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<AnnualReportListResponse>, AppError> {
    let reports = annual_report::Entity::find()
        .filter(annual_report::Column::Active.eq(true))
        .order_by_asc(annual_report::Column::Order)
        .order_by_asc(annual_report::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(reports.try_into()?))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Reports",
    operation_id = "listReports",
    summary = "All annual reports",
    responses(
        (status = 200, description = "Reports", body = AnnualReportListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_all(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<AnnualReportListResponse>, AppError> {
    let reports = annual_report::Entity::find()
        .order_by_asc(annual_report::Column::Order)
        .order_by_asc(annual_report::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(reports.try_into()?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Reports",
    operation_id = "createReport",
    summary = "Add an annual report",
    description = "`title`, `year` and `flipbookUrl` are required. `order` defaults to the number of existing reports.",
    request_body = CreateAnnualReportRequest,
    responses(
        (status = 201, description = "Report created", body = AnnualReportEnvelope),
        (status = 400, description = "Missing required field or negative order (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn create(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAnnualReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = required_text(payload.title, "title")?;
    let year = required_text(payload.year, "year")?;
    let flipbook_url = required_text(payload.flipbook_url, "flipbookUrl")?;
    validate_order(payload.order)?;

    let order = match payload.order {
        Some(order) => order,
        None => next_order::<annual_report::Entity>(&state.db).await?,
    };

    let now = Utc::now();
    let model = annual_report::ActiveModel {
        title: Set(title),
        year: Set(year),
        cover_image: Set(encode_optional_image(payload.cover_image.as_ref())?),
        flipbook_url: Set(flipbook_url),
        order: Set(order),
        active: Set(payload.active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(id = model.id, order, "Annual report created");
    Ok((
        StatusCode::CREATED,
        Json(AnnualReportEnvelope {
            report: model.try_into()?,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Reports",
    operation_id = "updateReport",
    summary = "Update an annual report",
    description = "Only provided fields change. `coverImage: null` removes the cover reference.",
    params(("id" = i32, Path, description = "Report ID")),
    request_body = UpdateAnnualReportRequest,
    responses(
        (status = 200, description = "Report updated", body = AnnualReportEnvelope),
        (status = 400, description = "Blank required field or negative order (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Report not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateAnnualReportRequest>,
) -> Result<Json<AnnualReportEnvelope>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;
    validate_order(payload.order)?;
    let title = payload
        .title
        .map(|v| required_text(Some(v), "title"))
        .transpose()?;
    let year = payload
        .year
        .map(|v| required_text(Some(v), "year"))
        .transpose()?;
    let flipbook_url = payload
        .flipbook_url
        .map(|v| required_text(Some(v), "flipbookUrl"))
        .transpose()?;

    let existing = find_report(&state.db, id).await?;
    let mut active: annual_report::ActiveModel = existing.into();

    if let Some(title) = title {
        active.title = Set(title);
    }
    if let Some(year) = year {
        active.year = Set(year);
    }
    if let Some(cover) = &payload.cover_image {
        active.cover_image = Set(encode_optional_image(cover.as_ref())?);
    }
    if let Some(url) = flipbook_url {
        active.flipbook_url = Set(url);
    }
    if let Some(order) = payload.order {
        active.order = Set(order);
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    active.updated_at = Set(Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(AnnualReportEnvelope {
        report: model.try_into()?,
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Reports",
    operation_id = "deleteReport",
    summary = "Delete an annual report",
    description = "Removes the report, then attempts to remove its cover from the media host.",
    params(("id" = i32, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Report not found (NOT_FOUND)", body = ErrorBody),
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
    let existing = AnnualReportResponse::try_from(find_report(&state.db, id).await?)?;

    annual_report::Entity::delete_by_id(id).exec(&state.db).await?;
    if let Some(cover) = &existing.cover_image {
        state.media.discard(cover).await;
    }

    info!(id, "Annual report deleted");
    Ok(Json(OkResponse::new()))
}

async fn find_report<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<annual_report::Model, AppError> {
    annual_report::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}
