mod auth;
mod cache;
mod companies;
mod config;
mod db;
mod errors;
mod jobs;
mod matching;
mod models;
mod routes;
mod state;
mod users;

#[cfg(test)]
mod testing;

use anyhow::Result;
use axum::http::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::jwt::JwtKeys;
use crate::cache::RedisCache;
use crate::config::Config;
use crate::db::create_pool;
use crate::jobs::repository::PgJobStore;
use crate::matching::coordinator::BatchMatcher;
use crate::matching::job_cache::JobCache;
use crate::routes::build_router;
use crate::state::AppState;
use crate::users::mailer::LogMailer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job portal API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let redis = redis::Client::open(config.redis_url.clone())?;
    let cache = Arc::new(RedisCache::new(redis));
    info!("Redis client initialized");

    let job_cache = JobCache::new(
        cache.clone(),
        Arc::new(PgJobStore::new(db.clone())),
        Duration::from_secs(config.job_cache_ttl_secs),
    )
    .with_prefix(config.job_cache_prefix.clone());
    let matcher = BatchMatcher::new(job_cache).with_max_concurrency(config.match_max_concurrency);
    match config.match_max_concurrency {
        Some(limit) => info!("Matching concurrency bounded at {limit}"),
        None => info!("Matching concurrency unbounded"),
    }

    let shutdown = CancellationToken::new();
    let state = AppState {
        db,
        jwt: JwtKeys::new(&config.jwt_secret, Duration::from_secs(config.jwt_ttl_secs)),
        cache,
        matcher: Arc::new(matcher),
        mailer: Arc::new(LogMailer),
        shutdown: shutdown.clone(),
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");
                    info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id,
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C and cancels in-flight matching batches.
async fn shutdown_signal(token: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
    token.cancel();
}
