use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use tracing::{error, info};

use crate::api::dtos::requests::{DayQuery, MonthQuery};
use crate::api::dtos::responses::{
    DaySlotsResponse, MonthAvailabilityResponse, ResourceCatalogResponse,
};
use crate::domain::models::room::RoomResource;
use crate::domain::services::availability::{DATE_FORMAT, mark_window, mark_window_unavailable};
use crate::domain::services::calendar::{WindowMode, expand_window};
use crate::domain::services::slot_filter::{SlotConstraints, filter_slots};
use crate::error::AppError;
use crate::infra::scheduler::SchedulerClient;
use crate::state::AppState;

/// GET /api/availability/month — the calendar grid. Degrades to a full
/// all-unavailable window with `success:false` when the scheduler cannot be
/// reached, so the caller always gets a grid to draw.
pub async fn month_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let start_param = query
        .start_date
        .ok_or_else(|| AppError::Validation("Missing required parameter: startDate".into()))?;
    let mode = query
        .window_type
        .as_deref()
        .and_then(WindowMode::parse)
        .ok_or_else(|| AppError::Validation("Invalid type parameter. Must be 'EOM' or '31'".into()))?;
    let start = NaiveDate::parse_from_str(&start_param, DATE_FORMAT)
        .map_err(|_| AppError::Validation("Invalid startDate format. Use YYYY-MM-DD".into()))?;

    let window = expand_window(start, mode);
    let window_start = window.first().copied().unwrap_or(start);
    let window_end = window.last().copied().unwrap_or(start);

    let credentials = state
        .config
        .scheduler_credentials()
        .ok_or(AppError::Configuration)?;
    let mut scheduler = SchedulerClient::new(credentials);

    let response = match scheduler.check_availability(window_start, window_end).await {
        Ok(open_dates) => {
            let today = Local::now().date_naive();
            let availability = mark_window(&window, today, &open_dates);
            info!(
                start = %window_start,
                end = %window_end,
                open = open_dates.len(),
                "Month availability resolved"
            );
            MonthAvailabilityResponse {
                success: true,
                start_date: Some(window_start.format(DATE_FORMAT).to_string()),
                end_date: Some(window_end.format(DATE_FORMAT).to_string()),
                window_type: Some(mode.as_str()),
                error: None,
                availability,
            }
        }
        Err(e) => {
            error!("Scheduler availability check failed: {e}");
            MonthAvailabilityResponse {
                success: false,
                start_date: None,
                end_date: None,
                window_type: None,
                error: Some("Failed to fetch availability from booking system".to_string()),
                availability: mark_window_unavailable(&window),
            }
        }
    };

    scheduler.sign_out().await;

    Ok(Json(response).into_response())
}

/// GET /api/availability/day — the reservable slots for one date. When
/// `duration` and `partySize` are both supplied, the slot filter narrows the
/// list server-side using the live resource catalog.
pub async fn day_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DayQuery>,
) -> Result<Response, AppError> {
    let date_param = query
        .date
        .ok_or_else(|| AppError::Validation("Missing required parameter: date".into()))?;
    let date = NaiveDate::parse_from_str(&date_param, DATE_FORMAT)
        .map_err(|_| AppError::Validation("Invalid date format. Use YYYY-MM-DD".into()))?;

    // The filter works in whole hours; out-of-range values would overflow
    // the minute arithmetic downstream.
    if let Some(duration) = query.duration
        && !(1..=24).contains(&duration)
    {
        return Err(AppError::Validation("Invalid duration parameter".into()));
    }

    let credentials = state
        .config
        .scheduler_credentials()
        .ok_or(AppError::Configuration)?;
    let mut scheduler = SchedulerClient::new(credentials);

    let response = match scheduler.day_slots(&date_param).await {
        Ok(mut slots) => {
            if let (Some(duration), Some(party_size)) = (query.duration, query.party_size) {
                match scheduler.list_resources().await {
                    Ok(resources) => {
                        let rooms: Vec<RoomResource> =
                            resources.iter().map(RoomResource::from).collect();
                        let constraints = SlotConstraints {
                            duration_hours: duration,
                            party_size,
                        };
                        slots = filter_slots(
                            slots,
                            &constraints,
                            &rooms,
                            date,
                            Local::now().naive_local(),
                        );
                    }
                    Err(e) => {
                        error!("Resource lookup for slot filtering failed: {e}");
                        slots = Vec::new();
                    }
                }
            }

            DaySlotsResponse {
                success: true,
                date: Some(date_param),
                error: None,
                slots,
            }
        }
        Err(e) => {
            error!("Scheduler slot listing failed: {e}");
            DaySlotsResponse {
                success: false,
                date: None,
                error: Some("Failed to fetch slots from booking system".to_string()),
                slots: Vec::new(),
            }
        }
    };

    scheduler.sign_out().await;

    Ok(Json(response).into_response())
}

/// GET /api/availability/resources — the room catalog with parsed
/// minimum-notice minutes and derived slugs.
pub async fn resource_catalog(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let credentials = state
        .config
        .scheduler_credentials()
        .ok_or(AppError::Configuration)?;
    let mut scheduler = SchedulerClient::new(credentials);

    let response = match scheduler.list_resources().await {
        Ok(resources) => {
            let rooms: Vec<RoomResource> = resources.iter().map(RoomResource::from).collect();
            info!(count = rooms.len(), "Resource catalog fetched");
            scheduler.sign_out().await;
            (
                StatusCode::OK,
                Json(ResourceCatalogResponse {
                    success: true,
                    error: None,
                    resources: rooms,
                }),
            )
        }
        Err(e) => {
            error!("Resource catalog fetch failed: {e}");
            scheduler.sign_out().await;
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResourceCatalogResponse {
                    success: false,
                    error: Some("Failed to fetch resources".to_string()),
                    resources: Vec::new(),
                }),
            )
        }
    };

    Ok(response.into_response())
}
