use chrono::{DateTime, Utc};
use common::{ImageRef, PostStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{double_option, parse_int};
use crate::error::AppError;
use crate::posts::{NewPost, Post, PostPatch};

/// A blog post as returned by every post endpoint.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    #[schema(example = "Clean water for Kisumu")]
    pub title: String,
    /// Unique, assigned at creation and never changed.
    #[schema(example = "clean-water-for-kisumu")]
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    #[schema(example = "General")]
    pub category: String,
    #[schema(example = json!(["water", "community"]))]
    pub tags: Vec<String>,
    pub cover_image: Option<ImageRef>,
    pub status: PostStatus,
    /// Set exactly when `status` is `published`.
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            category: post.category,
            tags: post.tags,
            cover_image: post.cover_image,
            status: post.status,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// `{ "post": ... }`
#[derive(Serialize, utoipa::ToSchema)]
pub struct PostEnvelope {
    pub post: PostResponse,
}

impl From<Post> for PostEnvelope {
    fn from(post: Post) -> Self {
        Self { post: post.into() }
    }
}

/// `{ "posts": [...] }`
#[derive(Serialize, utoipa::ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
}

impl From<Vec<Post>> for PostListResponse {
    fn from(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into_iter().map(PostResponse::from).collect(),
        }
    }
}

/// One page of published posts.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PublicPostPage {
    pub posts: Vec<PostResponse>,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 9)]
    pub limit: u64,
    /// Published posts across all pages.
    #[schema(example = 23)]
    pub total: u64,
    #[schema(example = 3)]
    pub pages: u64,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Required, non-blank.
    #[schema(example = "Clean water for Kisumu")]
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    /// Defaults to `General`.
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover_image: Option<ImageRef>,
    /// Publishes only when exactly `published`; anything else creates a draft.
    #[schema(example = "draft")]
    pub status: Option<String>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            excerpt: req.excerpt,
            content: req.content,
            category: req.category,
            tags: req.tags,
            cover_image: req.cover_image,
            status: req.status,
        }
    }
}

/// Partial update. Omitted fields keep their value; `coverImage: null` clears
/// the cover image.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<ImageRef>)]
    pub cover_image: Option<Option<ImageRef>>,
    /// `published` or `draft`; other values are ignored.
    pub status: Option<String>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            excerpt: req.excerpt,
            content: req.content,
            category: req.category,
            tags: req.tags,
            cover_image: req.cover_image,
            status: req.status,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminPostQuery {
    /// `draft`, `published`, or empty for all posts.
    pub status: Option<String>,
}

impl AdminPostQuery {
    pub fn status_filter(&self) -> Result<Option<PostStatus>, AppError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                AppError::Validation("status must be one of: draft, published".into())
            }),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublicListQuery {
    /// 1-based page, default 1.
    #[param(value_type = Option<u64>, example = 1)]
    pub page: Option<String>,
    /// Page size, clamped to 1-30, default 9.
    #[param(value_type = Option<u64>, example = 9)]
    pub limit: Option<String>,
}

impl PublicListQuery {
    pub fn page(&self) -> Option<i64> {
        parse_int(self.page.as_deref())
    }

    pub fn limit(&self) -> Option<i64> {
        parse_int(self.limit.as_deref())
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LatestQuery {
    /// Clamped to 1-12, default 3.
    #[param(value_type = Option<u64>, example = 3)]
    pub limit: Option<String>,
}

impl LatestQuery {
    pub fn limit(&self) -> Option<i64> {
        parse_int(self.limit.as_deref())
    }
}

/// Parse an admin path identifier. Malformed ids resolve like unknown ones.
pub fn parse_post_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Post not found".into()))
}
