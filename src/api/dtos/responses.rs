use serde::Serialize;

use crate::domain::models::availability::DayAvailability;
use crate::domain::models::room::RoomResource;
use crate::domain::models::slot::TimeSlot;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAvailabilityResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub window_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub availability: Vec<DayAvailability>,
}

#[derive(Serialize)]
pub struct DaySlotsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub slots: Vec<TimeSlot>,
}

#[derive(Serialize)]
pub struct ResourceCatalogResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub resources: Vec<RoomResource>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pending_approval: Option<bool>,
}

#[derive(Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct PasswordVerification {
    pub valid: bool,
}
