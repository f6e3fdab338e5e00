use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::password::{hash_password, verify_password, BCRYPT_COST};
use crate::auth::AuthError;
use crate::errors::AppError;
use crate::models::user::{
    validate_email, ForgotPasswordRequest, LoginRequest, LoginResponse, NewUser,
    ResetPasswordRequest, User,
};
use crate::state::AppState;
use crate::users::otp::{generate_otp, store_otp, verify_otp};
use crate::users::repository::{create_user, find_by_email, update_password_hash};

/// POST /api/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    req.validate().map_err(AppError::Validation)?;

    let hash = hash_password(&req.password, BCRYPT_COST).await?;
    let user = create_user(&state.db, req.name.trim(), req.email.trim(), &hash).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/login
///
/// Unknown email and wrong password produce the same 401.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = find_by_email(&state.db, req.email.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.jwt.issue(user.id)?;
    info!("User {} logged in", user.id);
    Ok(Json(LoginResponse { token }))
}

/// POST /api/forgot-password
pub async fn handle_forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    validate_email(&req.email).map_err(AppError::Validation)?;
    let email = req.email.trim();

    if find_by_email(&state.db, email).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "{email} is not registered with the job portal"
        )));
    }

    let otp = generate_otp();
    store_otp(
        state.cache.as_ref(),
        email,
        &otp,
        Duration::from_secs(state.config.otp_ttl_secs),
    )
    .await?;

    state
        .mailer
        .send(
            email,
            "Job portal password reset",
            &format!("Your one time password is: {otp}"),
        )
        .await?;

    Ok(Json(json!({ "message": "OTP sent to the registered email" })))
}

/// POST /api/reset-password
pub async fn handle_reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    req.validate().map_err(AppError::Validation)?;
    let email = req.email.trim();

    let otp_ttl = Duration::from_secs(state.config.otp_ttl_secs);
    if !verify_otp(state.cache.as_ref(), email, &req.otp, otp_ttl).await? {
        return Err(AppError::Unauthorized);
    }

    let hash = hash_password(&req.new_password, BCRYPT_COST).await?;
    if !update_password_hash(&state.db, email, &hash).await? {
        return Err(AppError::NotFound(format!("{email} is not registered")));
    }

    state
        .mailer
        .send(
            email,
            "Job portal password updated",
            "Your job portal password was reset successfully.",
        )
        .await?;

    info!("Password reset for {email}");
    Ok(Json(json!({ "message": "Password reset successfully" })))
}
