use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::extractor::AuthUser;
use crate::companies::repository::get_company;
use crate::errors::AppError;
use crate::jobs::repository::{create_job, get_job, list_jobs, list_jobs_for_company};
use crate::models::job::{Job, NewJob};
use crate::state::AppState;

/// POST /api/companies/:id/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(company_id): Path<i64>,
    Json(req): Json<NewJob>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    req.validate().map_err(AppError::Validation)?;

    get_company(&state.db, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;

    let job = create_job(&state.db, company_id, &req).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(list_jobs(&state.db).await?))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(job_id): Path<i64>,
) -> Result<Json<Job>, AppError> {
    let job = get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(job))
}

/// GET /api/companies/:id/jobs
pub async fn handle_list_company_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(company_id): Path<i64>,
) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(list_jobs_for_company(&state.db, company_id).await?))
}
