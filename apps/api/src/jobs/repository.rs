use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::matching::criteria::JobCriteria;
use crate::matching::job_cache::JobStore;
use crate::matching::MatchError;
use crate::models::job::{Job, NewJob};

/// Inserts a job for a company. The caller has already validated `new_job`.
pub async fn create_job(
    pool: &PgPool,
    company_id: i64,
    new_job: &NewJob,
) -> Result<Job, AppError> {
    let job = sqlx::query_as::<_, Job>(
        r#"
        INSERT INTO jobs
            (company_id, title, description, budget,
             min_notice_period, max_notice_period, min_experience, max_experience,
             location_ids, technology_ids, work_mode_ids,
             qualification_ids, shift_ids, job_type_ids)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(company_id)
    .bind(&new_job.title)
    .bind(&new_job.description)
    .bind(new_job.budget)
    .bind(new_job.min_notice_period)
    .bind(new_job.max_notice_period)
    .bind(new_job.min_experience)
    .bind(new_job.max_experience)
    .bind(&new_job.location_ids)
    .bind(&new_job.technology_ids)
    .bind(&new_job.work_mode_ids)
    .bind(&new_job.qualification_ids)
    .bind(&new_job.shift_ids)
    .bind(&new_job.job_type_ids)
    .fetch_one(pool)
    .await?;

    info!("Created job {} for company {company_id}", job.id);
    Ok(job)
}

pub async fn list_jobs(pool: &PgPool) -> Result<Vec<Job>, AppError> {
    Ok(sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY id")
        .fetch_all(pool)
        .await?)
}

pub async fn get_job(pool: &PgPool, job_id: i64) -> Result<Option<Job>, AppError> {
    Ok(sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?)
}

pub async fn list_jobs_for_company(
    pool: &PgPool,
    company_id: i64,
) -> Result<Vec<Job>, AppError> {
    Ok(
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE company_id = $1 ORDER BY id")
            .bind(company_id)
            .fetch_all(pool)
            .await?,
    )
}

/// The job table as the store of record behind the job cache.
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn load_job(&self, job_id: i64) -> Result<JobCriteria, MatchError> {
        get_job(&self.pool, job_id)
            .await
            .map_err(|e| MatchError::LoadFailure(e.to_string()))?
            .map(|job| job.criteria())
            .ok_or(MatchError::NotFound(job_id))
    }
}
