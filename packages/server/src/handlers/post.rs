use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::post::{
    AdminPostQuery, CreatePostRequest, PostEnvelope, PostListResponse, UpdatePostRequest,
    parse_post_id,
};
use crate::models::shared::OkResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Posts",
    operation_id = "listPosts",
    summary = "List all posts",
    description = "Drafts and published posts, most recently updated first, optionally filtered by `status`.",
    params(AdminPostQuery),
    responses(
        (status = 200, description = "Matching posts", body = PostListResponse),
        (status = 400, description = "Unknown status filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_posts(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AdminPostQuery>,
) -> Result<Json<PostListResponse>, AppError> {
    let status = query.status_filter()?;
    let posts = state.post_service().list_admin(status).await?;
    Ok(Json(posts.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Posts",
    operation_id = "createPost",
    summary = "Create a post",
    description = "Assigns a unique slug derived from the title. The post is a draft unless `status` is exactly `published`.",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostEnvelope),
        (status = 400, description = "Missing title (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin = %admin.email))]
pub async fn create_post(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = state.post_service().create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(PostEnvelope::from(post))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Posts",
    operation_id = "updatePost",
    summary = "Update a post",
    description = "Only provided fields change; the slug never does. Publishing an already published post keeps its publish time. `coverImage: null` removes the cover reference.",
    params(("id" = String, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostEnvelope),
        (status = 400, description = "Blank title (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdatePostRequest>,
) -> Result<Json<PostEnvelope>, AppError> {
    let id = parse_post_id(&id)?;
    let post = state.post_service().update(id, payload.into()).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Posts",
    operation_id = "deletePost",
    summary = "Delete a post",
    description = "Removes the post. Cover image removal on the media host is attempted but never blocks the deletion.",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, AppError> {
    let id = parse_post_id(&id)?;
    state.post_service().delete(id).await?;
    Ok(Json(OkResponse::new()))
}
