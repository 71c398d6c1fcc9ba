use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::api::dtos::requests::SubscribeRequest;
use crate::api::dtos::responses::SubscribeResponse;
use crate::state::AppState;

/// POST /api/subscribe — mailing-list signup, delegated to the third-party
/// email API. Duplicate signups read as success to the caller.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubscribeRequest>,
) -> Response {
    let email = match payload.email.as_deref() {
        Some(email) if !email.trim().is_empty() => email.trim().to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(SubscribeResponse {
                    success: false,
                    message: "Email address is required".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.mailing_list.subscribe(&email).await {
        Ok(outcome) => {
            let message = if outcome.already_subscribed {
                "You're already on the list! We'll keep you updated."
            } else {
                "Thank you for joining! We'll keep you updated."
            };
            Json(SubscribeResponse {
                success: true,
                message: message.to_string(),
            })
            .into_response()
        }
        Err(e) => {
            error!("Subscription failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubscribeResponse {
                    success: false,
                    message: "Failed to subscribe. Please try again or contact us directly."
                        .to_string(),
                }),
            )
                .into_response()
        }
    }
}
