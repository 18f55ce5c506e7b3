use axum::extract::DefaultBodyLimit;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::health::health))
        .nest("/hero", public_hero_routes())
        .nest("/partners", public_partner_routes())
        .nest("/reports", public_report_routes())
        .nest("/blog", blog_routes())
        .nest("/admin", admin_routes(config))
        .layer(DefaultBodyLimit::max(config.server.json_body_limit))
}

fn blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::blog::list_published))
        .routes(routes!(handlers::blog::latest))
        .routes(routes!(handlers::blog::get_by_slug))
}

fn public_hero_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::hero::list_active))
}

fn public_partner_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::partner::list_active))
}

fn public_report_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::report::list_active))
}

fn admin_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::upload::upload_image))
        .layer(handlers::upload::upload_body_limit(config.max_upload_bytes()));

    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/posts", post_routes())
        .nest("/hero", admin_hero_routes())
        .nest("/partners", admin_partner_routes())
        .nest("/reports", admin_report_routes())
        .merge(upload)
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::auth::login))
}

fn post_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::post::list_posts,
            handlers::post::create_post
        ))
        .routes(routes!(
            handlers::post::update_post,
            handlers::post::delete_post
        ))
}

fn admin_hero_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::hero::list_all, handlers::hero::create))
        .routes(routes!(handlers::hero::update, handlers::hero::delete))
}

fn admin_partner_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::partner::list_all,
            handlers::partner::create
        ))
        .routes(routes!(
            handlers::partner::update,
            handlers::partner::delete
        ))
}

fn admin_report_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::report::list_all,
            handlers::report::create
        ))
        .routes(routes!(
            handlers::report::update,
            handlers::report::delete
        ))
}
