use serde::Serialize;

use crate::domain::services::catalog::{parse_notice_minutes, room_slug};
use crate::infra::scheduler::types::Resource;

/// A bookable room as this API presents it: the scheduler's resource plus a
/// derived URL slug and the minimum-notice string parsed into minutes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResource {
    /// Slug derived from the display name. Not guaranteed unique: two rooms
    /// whose names normalize to the same string collide, and no dedup is
    /// attempted.
    pub id: String,
    pub resource_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<i32>,
    pub min_notice: i64,
    pub requires_approval: bool,
    pub schedule_id: i64,
}

impl From<&Resource> for RoomResource {
    fn from(resource: &Resource) -> Self {
        Self {
            id: room_slug(&resource.name),
            resource_id: resource.resource_id,
            name: resource.name.clone(),
            description: resource.description.clone(),
            capacity: resource
                .max_participants
                .map(|n| format!("Up to {n} people")),
            max_participants: resource.max_participants,
            min_notice: parse_notice_minutes(resource.min_notice_add.as_deref()),
            requires_approval: resource.requires_approval,
            schedule_id: resource.schedule_id,
        }
    }
}
