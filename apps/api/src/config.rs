use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
    /// Lifetime of a cached job snapshot.
    pub job_cache_ttl_secs: u64,
    pub job_cache_prefix: String,
    /// Upper bound on concurrently running evaluations per batch. `None` = unbounded.
    pub match_max_concurrency: Option<usize>,
    pub otp_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_ttl_secs: env_or("JWT_TTL_SECS", 3600)?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            job_cache_ttl_secs: env_or("JOB_CACHE_TTL_SECS", 3600)?,
            job_cache_prefix: std::env::var("JOB_CACHE_PREFIX").unwrap_or_default(),
            match_max_concurrency: parse_concurrency_limit(
                std::env::var("MATCH_MAX_CONCURRENCY").ok(),
            )?,
            otp_ttl_secs: env_or("OTP_TTL_SECS", 300)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// An empty value means "no limit"; zero is rejected.
fn parse_concurrency_limit(raw: Option<String>) -> Result<Option<usize>> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    let limit = raw
        .trim()
        .parse::<usize>()
        .with_context(|| format!("MATCH_MAX_CONCURRENCY must be a positive integer, got '{raw}'"))?;
    if limit == 0 {
        anyhow::bail!("MATCH_MAX_CONCURRENCY must be greater than zero");
    }
    Ok(Some(limit))
}
