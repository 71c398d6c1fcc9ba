use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::api::dtos::requests::{NewBookingRequest, RoomRef};
use crate::api::dtos::responses::BookingResponse;
use crate::domain::services::catalog::room_slug;
use crate::infra::scheduler::{SchedulerClient, SchedulerError};
use crate::infra::scheduler::types::BookingParams;
use crate::state::AppState;

const CUSTOMER_FACING_FAILURE: &str = "We're sorry, but there was an error processing your booking. \
     Please call us directly to complete your reservation.";

fn failure(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(BookingResponse {
            success: false,
            error: Some(error.to_string()),
            message: CUSTOMER_FACING_FAILURE.to_string(),
            reference_number: None,
            is_pending_approval: None,
        }),
    )
        .into_response()
}

/// POST /api/bookings/new — validates the submission, resolves the room to
/// the scheduler's resource id, and relays the reservation outcome. Upstream
/// failures answer with a caller-safe message; the diagnostic detail (notes
/// redacted) goes to the server log only.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewBookingRequest>,
) -> Response {
    let (Some(date), Some(start_time), Some(room), Some(duration)) = (
        payload.date.clone(),
        payload.start_time.clone(),
        payload.resource_id.clone(),
        payload.duration.clone(),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(BookingResponse {
                success: false,
                error: Some("Missing required fields".to_string()),
                message: "Please provide date, startTime, resourceId, and duration".to_string(),
                reference_number: None,
                is_pending_approval: None,
            }),
        )
            .into_response();
    };

    // Whole hours, bounded: anything outside a day's worth is a bad request,
    // and unbounded values would overflow the end-time arithmetic.
    let Some(duration_hours) = duration.as_i64().filter(|h| (1..=24).contains(h)) else {
        return failure_validation("Invalid duration");
    };

    let Some(credentials) = state.config.scheduler_credentials() else {
        error!("Scheduler credentials are not configured");
        return failure(StatusCode::INTERNAL_SERVER_ERROR, "Booking failed");
    };
    let mut scheduler = SchedulerClient::new(credentials);

    let resource_id = match resolve_room(&mut scheduler, &room).await {
        Ok(Some(id)) => id,
        Ok(None) => return failure_validation("Invalid room selection"),
        Err(e) => {
            log_booking_failure(&e, &payload, &date, &start_time);
            return failure(StatusCode::INTERNAL_SERVER_ERROR, "Booking failed");
        }
    };

    let params = BookingParams {
        date: date.clone(),
        start_time: start_time.clone(),
        resource_id,
        duration_hours,
        title: None,
        description: payload
            .party_size
            .as_ref()
            .map(|p| format!("Party size: {p}")),
        notes: payload.notes.clone(),
    };

    match scheduler.create_booking(params).await {
        Ok(outcome) => {
            scheduler.sign_out().await;
            info!(
                reference = %outcome.reference_number,
                pending = outcome.is_pending_approval,
                "Reservation created"
            );
            let message = if outcome.is_pending_approval {
                "Your booking request has been submitted and is pending approval. \
                 We'll contact you soon to confirm."
                    .to_string()
            } else {
                format!(
                    "Your booking has been confirmed! Reference number: {}",
                    outcome.reference_number
                )
            };
            Json(BookingResponse {
                success: true,
                error: None,
                message,
                reference_number: Some(outcome.reference_number),
                is_pending_approval: Some(outcome.is_pending_approval),
            })
            .into_response()
        }
        Err(e) => {
            log_booking_failure(&e, &payload, &date, &start_time);
            scheduler.sign_out().await;
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Booking failed")
        }
    }
}

fn failure_validation(error: &str) -> Response {
    failure(StatusCode::BAD_REQUEST, error)
}

/// Numeric ids pass through; slugs are matched against the live resource
/// list so resource-id changes upstream don't require a redeploy.
async fn resolve_room(
    scheduler: &mut SchedulerClient,
    room: &RoomRef,
) -> Result<Option<i64>, SchedulerError> {
    match room {
        RoomRef::Id(id) => Ok(Some(*id)),
        RoomRef::Slug(slug) => {
            // Tolerate a numeric id submitted as a string.
            if let Ok(id) = slug.parse::<i64>() {
                return Ok(Some(id));
            }
            let resources = scheduler.list_resources().await?;
            Ok(resources
                .iter()
                .find(|r| room_slug(&r.name) == *slug)
                .map(|r| r.resource_id))
        }
    }
}

fn log_booking_failure(e: &SchedulerError, payload: &NewBookingRequest, date: &str, start_time: &str) {
    error!(
        error = %e,
        date,
        start_time,
        duration = payload.duration.as_ref().map(ToString::to_string),
        party_size = payload.party_size.as_ref().map(ToString::to_string),
        notes = if payload.notes.is_some() { "[provided]" } else { "[none]" },
        "Booking creation failed"
    );
}
