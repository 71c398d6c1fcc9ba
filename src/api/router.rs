use axum::{
    Router,
    body::Body,
    extract::Request,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::{availability, booking, health, password, subscribe};
use crate::state::AppState;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{Span, error, info, info_span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Availability
        .route("/api/availability/month", get(availability::month_availability))
        .route("/api/availability/day", get(availability::day_availability))
        .route("/api/availability/resources", get(availability::resource_catalog))
        // Booking
        .route("/api/bookings/new", post(booking::create_booking))
        // Site
        .route("/api/verify-password", post(password::verify_password))
        .route("/api/subscribe", post(subscribe::subscribe))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                }),
        )
        .with_state(state)
}
