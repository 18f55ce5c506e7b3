use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::post::{
    LatestQuery, PostEnvelope, PostListResponse, PostResponse, PublicListQuery, PublicPostPage,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Blog",
    operation_id = "listPublishedPosts",
    summary = "List published posts",
    description = "Published posts only, newest publication first. `page` is floored at 1 and `limit` clamped to 1-30 (default 9). Unparsable values fall back to the defaults.",
    params(PublicListQuery),
    responses(
        (status = 200, description = "One page of posts", body = PublicPostPage),
    ),
)]
#[instrument(skip(state))]
pub async fn list_published(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PublicListQuery>,
) -> Result<Json<PublicPostPage>, AppError> {
    let page = state
        .post_service()
        .list_published(query.page(), query.limit())
        .await?;

    Ok(Json(PublicPostPage {
        posts: page.posts.into_iter().map(PostResponse::from).collect(),
        page: page.page,
        limit: page.limit,
        total: page.total,
        pages: page.pages,
    }))
}

#[utoipa::path(
    get,
    path = "/latest",
    tag = "Blog",
    operation_id = "latestPosts",
    summary = "Most recent published posts",
    params(LatestQuery),
    responses(
        (status = 200, description = "Up to `limit` posts", body = PostListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn latest(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LatestQuery>,
) -> Result<Json<PostListResponse>, AppError> {
    let posts = state.post_service().latest(query.limit()).await?;
    Ok(Json(posts.into()))
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Blog",
    operation_id = "getPublishedPost",
    summary = "Get a published post by slug",
    description = "Drafts are reported as not found.",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post", body = PostEnvelope),
        (status = 404, description = "No published post with this slug (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostEnvelope>, AppError> {
    let post = state.post_service().find_published(&slug).await?;
    Ok(Json(post.into()))
}
