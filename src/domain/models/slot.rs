use serde::Serialize;

/// One reservable interval for a single resource on a single day. Derived
/// from the scheduler's slot listing per request, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub resource_id: i64,
    pub resource_name: String,
    /// HH:MM:SS, local to the scheduler's timezone.
    pub start_time: String,
    pub end_time: String,
    pub is_reservable: bool,
}
