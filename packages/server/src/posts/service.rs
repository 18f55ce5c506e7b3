use chrono::Utc;
use common::PostStatus;
use common::media::MediaHost;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::repository::{PostRepository, RepoError};
use super::slug::{generate_slug, resolve_unique_slug};
use super::types::{NewPost, Post, PostPatch, category_or_default, normalize_tags};

/// Slug resolutions attempted before a create gives up under contention.
pub const MAX_SLUG_ATTEMPTS: usize = 5;

pub const PUBLIC_DEFAULT_LIMIT: u64 = 9;
pub const PUBLIC_MAX_LIMIT: u64 = 30;
pub const LATEST_DEFAULT_LIMIT: u64 = 3;
pub const LATEST_MAX_LIMIT: u64 = 12;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0}")]
    Validation(String),
    #[error("post not found")]
    NotFound,
    #[error("could not reserve a unique slug for `{base}` after {attempts} attempts")]
    SlugContention { base: String, attempts: usize },
    #[error(transparent)]
    Repository(#[from] RepoError),
}

/// One page of the public listing.
#[derive(Debug, Clone)]
pub struct PublishedPage {
    pub posts: Vec<Post>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

pub struct PostService<'a> {
    repo: &'a dyn PostRepository,
    media: &'a dyn MediaHost,
}

impl<'a> PostService<'a> {
    pub fn new(repo: &'a dyn PostRepository, media: &'a dyn MediaHost) -> Self {
        Self { repo, media }
    }

    /// Create a post with a freshly resolved slug.
    ///
    /// If another writer claims the slug between the existence check and the
    /// insert, resolution is repeated up to [`MAX_SLUG_ATTEMPTS`] times.
    pub async fn create(&self, input: NewPost) -> Result<Post, PostError> {
        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PostError::Validation("Title is required".into()))?
            .to_string();

        let now = Utc::now();
        let id = Uuid::now_v7();
        let base = generate_slug(&title, &id);
        let status = if input.status.as_deref() == Some("published") {
            PostStatus::Published
        } else {
            PostStatus::Draft
        };

        let mut post = Post {
            id,
            title,
            slug: base.clone(),
            excerpt: input.excerpt.unwrap_or_default().trim().to_string(),
            content: input.content.unwrap_or_default(),
            category: category_or_default(input.category),
            tags: normalize_tags(input.tags.unwrap_or_default()),
            cover_image: input.cover_image,
            status,
            published_at: status.is_published().then_some(now),
            created_at: now,
            updated_at: now,
        };

        let repo = self.repo;
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            post.slug = resolve_unique_slug(&base, move |candidate: String| async move {
                repo.slug_exists(&candidate).await
            })
            .await?;

            match repo.insert(&post).await {
                Ok(()) => {
                    info!(id = %post.id, slug = %post.slug, status = %post.status, "Post created");
                    return Ok(post);
                }
                Err(RepoError::SlugTaken(slug)) => {
                    warn!(attempt, slug = %slug, "Slug claimed by a concurrent write, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(PostError::SlugContention {
            base,
            attempts: MAX_SLUG_ATTEMPTS,
        })
    }

    /// Apply a partial update. The slug is never reassigned.
    pub async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, PostError> {
        let mut post = self.find(id).await?;
        let now = Utc::now();

        if let Some(title) = patch.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(PostError::Validation("Title must not be empty".into()));
            }
            post.title = title.to_string();
        }
        if let Some(excerpt) = patch.excerpt {
            post.excerpt = excerpt.trim().to_string();
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if patch.category.is_some() {
            post.category = category_or_default(patch.category);
        }
        if let Some(tags) = patch.tags {
            post.tags = normalize_tags(tags);
        }
        if let Some(cover_image) = patch.cover_image {
            post.cover_image = cover_image;
        }
        if let Some(status) = patch.status.as_deref() {
            post.apply_status(status, now);
        }
        post.updated_at = now;

        if !self.repo.update(&post).await? {
            return Err(PostError::NotFound);
        }
        Ok(post)
    }

    /// Delete a post. Cover image removal is best-effort and never blocks the
    /// record deletion.
    pub async fn delete(&self, id: Uuid) -> Result<(), PostError> {
        let post = self.find(id).await?;

        if let Some(image) = &post.cover_image {
            self.media.discard(image).await;
        }

        if !self.repo.delete(id).await? {
            return Err(PostError::NotFound);
        }
        info!(id = %id, slug = %post.slug, "Post deleted");
        Ok(())
    }

    pub async fn list_admin(&self, status: Option<PostStatus>) -> Result<Vec<Post>, PostError> {
        Ok(self.repo.list(status).await?)
    }

    /// Public listing. `page` is floored at 1, `limit` clamped to `[1, 30]`.
    pub async fn list_published(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PublishedPage, PostError> {
        let page = page.unwrap_or(1).max(1) as u64;
        let limit = clamp_limit(limit, PUBLIC_DEFAULT_LIMIT, PUBLIC_MAX_LIMIT);

        let total = self.repo.count_published().await?;
        let offset = (page - 1).saturating_mul(limit);
        let posts = if offset >= total {
            Vec::new()
        } else {
            self.repo.list_published(offset, limit).await?
        };

        Ok(PublishedPage {
            posts,
            page,
            limit,
            total,
            pages: total.div_ceil(limit),
        })
    }

    /// Most recent published posts. `limit` clamped to `[1, 12]`.
    pub async fn latest(&self, limit: Option<i64>) -> Result<Vec<Post>, PostError> {
        let limit = clamp_limit(limit, LATEST_DEFAULT_LIMIT, LATEST_MAX_LIMIT);
        Ok(self.repo.list_published(0, limit).await?)
    }

    /// Published post by slug. Drafts are reported as missing.
    pub async fn find_published(&self, slug: &str) -> Result<Post, PostError> {
        self.repo
            .find_published_by_slug(slug)
            .await?
            .ok_or(PostError::NotFound)
    }

    async fn find(&self, id: Uuid) -> Result<Post, PostError> {
        self.repo.find_by_id(id).await?.ok_or(PostError::NotFound)
    }
}

fn clamp_limit(requested: Option<i64>, default: u64, max: u64) -> u64 {
    requested.unwrap_or(default as i64).clamp(1, max as i64) as u64
}
