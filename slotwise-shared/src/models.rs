use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Booking holders per slot start time. The value holds user ids in
/// insertion order; its length never exceeds the per-slot capacity.
pub type Occupancy = HashMap<NaiveDateTime, Vec<String>>;

/// A bookable physical resource. The occupancy map is internal state
/// and never leaves the process over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub property_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(skip)]
    pub occupancy: Occupancy,
}

impl Property {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            property_id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            occupancy: Occupancy::new(),
        }
    }
}

/// Projection of one open (or just-booked) slot. Computed on demand,
/// never stored. `available_count` is populated for availability
/// listings and omitted on booking confirmations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub property_id: Uuid,
    pub timestamp: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_count: Option<u32>,
}

/// Request body for booking one slot on a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotBookRequest {
    pub start_time: NaiveDateTime,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPropertyRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
