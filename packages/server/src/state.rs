use std::sync::Arc;

use common::media::MediaHost;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::gate::AdminGate;
use crate::posts::{PostRepository, PostService};
use crate::utils::rate_limit::LoginRateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub posts: Arc<dyn PostRepository>,
    pub media: Arc<dyn MediaHost>,
    pub gate: Arc<AdminGate>,
    pub login_limiter: LoginRateLimiter,
}

impl AppState {
    pub fn post_service(&self) -> PostService<'_> {
        PostService::new(self.posts.as_ref(), self.media.as_ref())
    }
}
