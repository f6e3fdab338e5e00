use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::auth::jwt::JwtKeys;
use crate::cache::CacheBackend;
use crate::config::Config;
use crate::matching::coordinator::BatchMatcher;
use crate::users::mailer::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub jwt: JwtKeys,
    /// Process-wide cache client (Redis in production), also used for OTPs.
    pub cache: Arc<dyn CacheBackend>,
    pub matcher: Arc<BatchMatcher>,
    pub mailer: Arc<dyn Mailer>,
    /// Cancelled on graceful shutdown; in-flight matching batches derive from it.
    pub shutdown: CancellationToken,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
