//! Wire shapes of the external scheduler's REST API. Field names mirror the
//! service's JSON; everything optional is defaulted so partial deployments
//! deserialize instead of erroring.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub session_token: String,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub session_expires: Option<String>,
}

/// Cached credential pair attached to every authenticated call. The external
/// expiry is not tracked locally; see `SchedulerClient::ensure_authenticated`.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub resource_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub schedule_id: i64,
    #[serde(default)]
    pub status_id: Option<i64>,
    #[serde(default)]
    pub min_length: Option<String>,
    #[serde(default)]
    pub max_length: Option<String>,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default)]
    pub allow_multiday: bool,
    #[serde(default)]
    pub max_participants: Option<i32>,
    /// Compound duration string, e.g. "1d0h0m".
    #[serde(default)]
    pub min_notice_add: Option<String>,
    #[serde(default)]
    pub max_notice: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ResourcesEnvelope {
    #[serde(default)]
    pub resources: Option<Vec<Resource>>,
}

/// `/Schedules/{id}/Slots` response: slots nested per date, then per resource.
#[derive(Debug, Deserialize)]
pub struct SlotsEnvelope {
    #[serde(default)]
    pub dates: Vec<SlotDay>,
}

#[derive(Debug, Deserialize)]
pub struct SlotDay {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceSlots>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSlots {
    pub resource_id: i64,
    #[serde(default)]
    pub slots: Vec<RawSlot>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSlot {
    #[serde(default)]
    pub start_date_time: Option<String>,
    #[serde(default)]
    pub end_date_time: Option<String>,
    #[serde(default)]
    pub is_reservable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub user_id: i64,
    pub resource_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local time with a numeric UTC offset suffix ("+0500"), not "Z".
    pub start_date_time: String,
    pub end_date_time: String,
    pub allow_participation: bool,
    pub terms_accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<Vec<CustomAttribute>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAttribute {
    pub attribute_id: i64,
    pub attribute_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationOutcome {
    #[serde(default)]
    pub reference_number: String,
    #[serde(default)]
    pub is_pending_approval: bool,
}

/// Simplified form-level booking input; the client expands it into a full
/// `CreateReservation`.
#[derive(Debug, Clone)]
pub struct BookingParams {
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM or HH:MM:SS
    pub start_time: String,
    pub resource_id: i64,
    pub duration_hours: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}
