use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::media::{MediaHost, UnconfiguredMediaHost, s3::S3MediaHost};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::database::init_db;
use server::gate::AdminGate;
use server::posts::SeaOrmPostRepository;
use server::state::AppState;
use server::utils::rate_limit::LoginRateLimiter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load config")?;
    config.validate().context("Invalid config")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let media: Arc<dyn MediaHost> = match &config.media {
        Some(media) => {
            let host = S3MediaHost::new(media).context("Failed to configure media host")?;
            info!(bucket = %media.bucket, folder = %media.folder, "Media host configured");
            Arc::new(host)
        }
        None => {
            warn!("No media section configured; uploads will fail");
            Arc::new(UnconfiguredMediaHost)
        }
    };

    let limits = &config.auth.login_rate_limit;
    let login_limiter = LoginRateLimiter::new(
        std::time::Duration::from_secs(limits.window_secs),
        limits.max_attempts,
    );

    let purge_handle = spawn_limiter_purge(login_limiter.clone());

    let state = AppState {
        gate: Arc::new(AdminGate::new(&config.auth)),
        posts: Arc::new(SeaOrmPostRepository::new(db.clone())),
        media,
        login_limiter,
        db,
        config: config.clone(),
    };

    let app = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("API listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    purge_handle.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn spawn_limiter_purge(limiter: LoginRateLimiter) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(limiter.window());
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = limiter.purge_stale();
            if purged > 0 {
                tracing::debug!(purged, "Purged idle login rate-limit buckets");
            }
        }
    })
}
