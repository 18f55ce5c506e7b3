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
use crate::entity::hero_slide;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::shared::OkResponse;
use crate::models::showcase::{
    CreateHeroSlideRequest, HeroSlideEnvelope, HeroSlideListResponse, HeroSlideResponse,
    UpdateHeroSlideRequest, encode_image, parse_id, validate_order,
};
use crate::state::AppState;

const NOT_FOUND: &str = "Slide not found";

#[utoipa::path(
    get,
    path = "/",
    tag = "Hero",
    operation_id = "listActiveHeroSlides",
    summary = "Active hero slides",
    description = "Active slides in display order.",
    responses(
        (status = 200, description = "Slides", body = HeroSlideListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<HeroSlideListResponse>, AppError> {
    let slides = hero_slide::Entity::find()
        .filter(hero_slide::Column::Active.eq(true))
        .order_by_asc(hero_slide::Column::Order)
        .order_by_asc(hero_slide::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(slides.try_into()?))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Hero",
    operation_id = "listHeroSlides",
    summary = "All hero slides",
    description = "Active and inactive slides in display order.",
    responses(
        (status = 200, description = "Slides", body = HeroSlideListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_all(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<HeroSlideListResponse>, AppError> {
    let slides = hero_slide::Entity::find()
        .order_by_asc(hero_slide::Column::Order)
        .order_by_asc(hero_slide::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(slides.try_into()?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Hero",
    operation_id = "createHeroSlide",
    summary = "Add a hero slide",
    description = "`order` defaults to the number of existing slides, placing the new slide last.",
    request_body = CreateHeroSlideRequest,
    responses(
        (status = 201, description = "Slide created", body = HeroSlideEnvelope),
        (status = 400, description = "Missing image or negative order (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn create(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateHeroSlideRequest>,
) -> Result<impl IntoResponse, AppError> {
    let image = payload
        .image
        .ok_or_else(|| AppError::Validation("image is required".into()))?;
    validate_order(payload.order)?;

    let order = match payload.order {
        Some(order) => order,
        None => next_order::<hero_slide::Entity>(&state.db).await?,
    };

    let now = Utc::now();
    let model = hero_slide::ActiveModel {
        image: Set(encode_image(&image)?),
        order: Set(order),
        active: Set(payload.active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(id = model.id, order, "Hero slide created");
    Ok((
        StatusCode::CREATED,
        Json(HeroSlideEnvelope {
            slide: model.try_into()?,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Hero",
    operation_id = "updateHeroSlide",
    summary = "Update a hero slide",
    params(("id" = i32, Path, description = "Slide ID")),
    request_body = UpdateHeroSlideRequest,
    responses(
        (status = 200, description = "Slide updated", body = HeroSlideEnvelope),
        (status = 400, description = "Negative order (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Slide not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateHeroSlideRequest>,
) -> Result<Json<HeroSlideEnvelope>, AppError> {
    let id = parse_id(&id, NOT_FOUND)?;
    validate_order(payload.order)?;

    let existing = find_slide(&state.db, id).await?;
    let mut active: hero_slide::ActiveModel = existing.into();

    if let Some(image) = &payload.image {
        active.image = Set(encode_image(image)?);
    }
    if let Some(order) = payload.order {
        active.order = Set(order);
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    active.updated_at = Set(Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(HeroSlideEnvelope {
        slide: model.try_into()?,
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Hero",
    operation_id = "deleteHeroSlide",
    summary = "Delete a hero slide",
    description = "Removes the slide, then attempts to remove its image from the media host.",
    params(("id" = i32, Path, description = "Slide ID")),
    responses(
        (status = 200, description = "Slide deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Slide not found (NOT_FOUND)", body = ErrorBody),
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
    let slide = HeroSlideResponse::try_from(find_slide(&state.db, id).await?)?;

    hero_slide::Entity::delete_by_id(id).exec(&state.db).await?;
    state.media.discard(&slide.image).await;

    info!(id, "Hero slide deleted");
    Ok(Json(OkResponse::new()))
}

async fn find_slide<C: ConnectionTrait>(db: &C, id: i32) -> Result<hero_slide::Model, AppError> {
    hero_slide::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}
