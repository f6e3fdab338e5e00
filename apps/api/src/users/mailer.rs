use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;

/// Outbound email. Delivery is handled outside this service.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

/// Writes messages to the log instead of sending them.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        info!(to, subject, "outbound email: {body}");
        Ok(())
    }
}
