use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::models::availability::{AvailabilityStatus, DayAvailability};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Merges a calendar window with the set of dates the scheduler reported as
/// having at least one open slot. Dates strictly before `today` are forced
/// unavailable no matter what upstream said; time of day is ignored.
pub fn mark_window(
    window: &[NaiveDate],
    today: NaiveDate,
    open_dates: &HashSet<String>,
) -> Vec<DayAvailability> {
    window
        .iter()
        .map(|date| {
            let date_str = date.format(DATE_FORMAT).to_string();
            let status = if *date < today {
                AvailabilityStatus::Unavailable
            } else if open_dates.contains(&date_str) {
                AvailabilityStatus::Available
            } else {
                AvailabilityStatus::Unavailable
            };
            DayAvailability { date: date_str, status }
        })
        .collect()
}

/// The degraded response used when the scheduler is unreachable: every date
/// in the window, all unavailable, so the caller still gets a full grid.
pub fn mark_window_unavailable(window: &[NaiveDate]) -> Vec<DayAvailability> {
    window
        .iter()
        .map(|date| DayAvailability {
            date: date.format(DATE_FORMAT).to_string(),
            status: AvailabilityStatus::Unavailable,
        })
        .collect()
}
