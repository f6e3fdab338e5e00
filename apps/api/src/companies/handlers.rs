use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::extractor::AuthUser;
use crate::companies::repository::{create_company, get_company, list_companies};
use crate::errors::AppError;
use crate::models::company::{Company, NewCompany};
use crate::state::AppState;

/// POST /api/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<NewCompany>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    req.validate().map_err(AppError::Validation)?;
    let company = create_company(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Company>>, AppError> {
    Ok(Json(list_companies(&state.db).await?))
}

/// GET /api/companies/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(company_id): Path<i64>,
) -> Result<Json<Company>, AppError> {
    let company = get_company(&state.db, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;
    Ok(Json(company))
}
