use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::api::dtos::requests::VerifyPasswordRequest;
use crate::api::dtos::responses::PasswordVerification;
use crate::error::AppError;
use crate::state::AppState;

/// POST /api/verify-password — the shared-password page gate. Never reveals
/// whether the server-side password is configured beyond a generic 500.
pub async fn verify_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VerifyPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let Some(configured) = state.config.site_password.as_deref() else {
        return Err(AppError::Configuration);
    };

    let valid = payload.password.as_deref() == Some(configured);
    Ok(Json(PasswordVerification { valid }))
}
