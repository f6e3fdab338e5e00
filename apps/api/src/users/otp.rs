//! One-time passwords for password reset, kept in the shared cache under
//! `otp:<email>` until they expire, are used, or are guessed wrong too often.

use std::time::Duration;

use rand::Rng;
use tracing::warn;

use crate::cache::{CacheBackend, CacheError};

/// Wrong guesses allowed before the code is discarded.
pub const MAX_OTP_ATTEMPTS: i64 = 5;

fn otp_key(email: &str) -> String {
    format!("otp:{}", email.trim().to_lowercase())
}

fn attempts_key(email: &str) -> String {
    format!("otp-attempts:{}", email.trim().to_lowercase())
}

/// A random six-digit code.
pub fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

/// Stores a fresh code and clears the failed-attempt count of any earlier one.
pub async fn store_otp(
    cache: &dyn CacheBackend,
    email: &str,
    otp: &str,
    ttl: Duration,
) -> Result<(), CacheError> {
    cache.delete(&attempts_key(email)).await?;
    cache.set(&otp_key(email), otp.as_bytes(), ttl).await
}

/// Consumes the stored code when it matches. Each wrong code is counted, and
/// the `MAX_OTP_ATTEMPTS`th one discards the code so it can no longer be used.
pub async fn verify_otp(
    cache: &dyn CacheBackend,
    email: &str,
    otp: &str,
    ttl: Duration,
) -> Result<bool, CacheError> {
    let key = otp_key(email);
    let Some(stored) = cache.get(&key).await? else {
        return Ok(false);
    };

    if stored == otp.trim().as_bytes() {
        cache.delete(&key).await?;
        cache.delete(&attempts_key(email)).await?;
        return Ok(true);
    }

    let attempts = cache.increment(&attempts_key(email), ttl).await?;
    if attempts >= MAX_OTP_ATTEMPTS {
        warn!("Discarding reset code for {email} after {attempts} wrong attempts");
        cache.delete(&key).await?;
        cache.delete(&attempts_key(email)).await?;
    }
    Ok(false)
}
