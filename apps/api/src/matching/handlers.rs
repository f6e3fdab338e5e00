use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::extractor::AuthUser;
use crate::errors::AppError;
use crate::matching::criteria::{Applicant, Application};
use crate::state::AppState;

/// POST /api/job/applications/:id
///
/// Evaluates every application against the job and returns the ones that
/// qualify. A single invalid application rejects the whole request.
pub async fn handle_apply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<i64>,
    Json(applications): Json<Vec<Application>>,
) -> Result<Json<Vec<Applicant>>, AppError> {
    for application in &applications {
        application.validate().map_err(AppError::Validation)?;
    }

    tracing::info!(
        "User {} submitted {} applications for job {job_id}",
        user.user_id,
        applications.len()
    );

    // Cancelled on shutdown, or when this handler is dropped mid-flight.
    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    let applicants = state
        .matcher
        .apply_batch(job_id, applications, &cancel)
        .await?;

    Ok(Json(applicants))
}
