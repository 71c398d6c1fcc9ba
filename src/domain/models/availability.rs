use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
}

/// One cell of the month-grid calendar.
#[derive(Debug, Clone, Serialize)]
pub struct DayAvailability {
    /// YYYY-MM-DD
    pub date: String,
    pub status: AvailabilityStatus,
}
