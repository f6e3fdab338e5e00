use sqlx::PgPool;
use tracing::info;

use crate::db::is_unique_violation;
use crate::errors::AppError;
use crate::models::company::{Company, NewCompany};

pub async fn create_company(pool: &PgPool, new_company: &NewCompany) -> Result<Company, AppError> {
    let company = sqlx::query_as::<_, Company>(
        "INSERT INTO companies (name, location) VALUES ($1, $2) RETURNING *",
    )
    .bind(new_company.name.trim())
    .bind(new_company.location.trim())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict(format!("Company '{}' already exists", new_company.name.trim()))
        } else {
            AppError::Database(e)
        }
    })?;

    info!("Created company {} ({})", company.id, company.name);
    Ok(company)
}

pub async fn list_companies(pool: &PgPool) -> Result<Vec<Company>, AppError> {
    Ok(
        sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY id")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_company(pool: &PgPool, company_id: i64) -> Result<Option<Company>, AppError> {
    Ok(
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(company_id)
            .fetch_optional(pool)
            .await?,
    )
}
