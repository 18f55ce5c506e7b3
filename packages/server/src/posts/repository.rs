use async_trait::async_trait;
use common::PostStatus;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use super::types::Post;

#[derive(Debug, Error)]
pub enum RepoError {
    /// The store's unique index on `slug` rejected the write.
    #[error("slug `{0}` is already taken")]
    SlugTaken(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("failed to encode or decode a stored post field: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Persistence seam for blog posts.
///
/// Implementations must enforce slug uniqueness at write time and report a
/// violation as [`RepoError::SlugTaken`].
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;

    async fn insert(&self, post: &Post) -> Result<(), RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Overwrite a stored post. Returns `false` if it no longer exists.
    async fn update(&self, post: &Post) -> Result<bool, RepoError>;

    /// Returns `false` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;

    /// All posts, optionally filtered by status, most recently updated first.
    async fn list(&self, status: Option<PostStatus>) -> Result<Vec<Post>, RepoError>;

    /// Published posts, newest publication first (creation time breaks ties).
    async fn list_published(&self, offset: u64, limit: u64) -> Result<Vec<Post>, RepoError>;

    async fn count_published(&self) -> Result<u64, RepoError>;

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;
}
