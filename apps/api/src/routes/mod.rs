pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::companies::handlers as companies;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/register", post(users::handle_register))
        .route("/api/login", post(users::handle_login))
        .route("/api/forgot-password", post(users::handle_forgot_password))
        .route("/api/reset-password", post(users::handle_reset_password))
        // Companies & jobs (authenticated)
        .route(
            "/api/companies",
            post(companies::handle_create_company).get(companies::handle_list_companies),
        )
        .route("/api/companies/:id", get(companies::handle_get_company))
        .route(
            "/api/companies/:id/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_company_jobs),
        )
        .route("/api/jobs", get(jobs::handle_list_jobs))
        .route("/api/jobs/:id", get(jobs::handle_get_job))
        // Matching
        .route("/api/job/applications/:id", post(matching::handle_apply))
        .with_state(state)
}
