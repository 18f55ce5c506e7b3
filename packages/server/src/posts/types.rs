use chrono::{DateTime, Utc};
use common::{ImageRef, PostStatus};
use uuid::Uuid;

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "General";

/// A blog post as the lifecycle logic sees it.
///
/// Invariant: `status == Published` exactly when `published_at.is_some()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    /// Assigned once at creation, never rewritten by updates.
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub cover_image: Option<ImageRef>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Apply a requested status literal.
    ///
    /// `"published"` stamps `published_at` only when the post was not already
    /// published; `"draft"` always clears it; anything else is ignored.
    pub fn apply_status(&mut self, requested: &str, now: DateTime<Utc>) {
        match requested.parse::<PostStatus>() {
            Ok(PostStatus::Published) if !self.status.is_published() => {
                self.status = PostStatus::Published;
                self.published_at = Some(now);
            }
            Ok(PostStatus::Draft) => {
                self.status = PostStatus::Draft;
                self.published_at = None;
            }
            _ => {}
        }
    }
}

/// Fields accepted when creating a post. Only `title` is required.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover_image: Option<ImageRef>,
    /// Publishes only when exactly `"published"`.
    pub status: Option<String>,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    /// `Some(None)` clears the cover image.
    pub cover_image: Option<Option<ImageRef>>,
    pub status: Option<String>,
}

/// Trim tags, drop blanks and duplicates, keep first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

pub(crate) fn category_or_default(category: Option<String>) -> String {
    match category {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}
