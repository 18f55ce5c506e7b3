//! Blog post lifecycle: slug assignment, status transitions and the storage seam.

mod repository;
mod service;
pub mod slug;
mod store;
mod types;

pub use repository::{PostRepository, RepoError};
pub use service::{
    LATEST_DEFAULT_LIMIT, LATEST_MAX_LIMIT, MAX_SLUG_ATTEMPTS, PUBLIC_DEFAULT_LIMIT,
    PUBLIC_MAX_LIMIT, PostError, PostService, PublishedPage,
};
pub use store::SeaOrmPostRepository;
pub use types::{DEFAULT_CATEGORY, NewPost, Post, PostPatch, normalize_tags};
