use sqlx::PgPool;
use tracing::info;

use crate::db::is_unique_violation;
use crate::errors::AppError;
use crate::models::user::User;

pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict(format!("Email {email} is already registered"))
        } else {
            AppError::Database(e)
        }
    })?;

    info!("Registered user {}", user.id);
    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    Ok(
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?,
    )
}

/// Returns false when no user has this email.
pub async fn update_password_hash(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE users SET password_hash = $1, updated_at = NOW() WHERE email = $2",
    )
    .bind(password_hash)
    .bind(email)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
