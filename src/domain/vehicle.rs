//! Vehicle - Fleet Vehicle Record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational status of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum VehicleStatus {
    /// Available for reservation
    #[default]
    Available,
    /// Currently rented/assigned
    InUse,
    /// In the shop
    Maintenance,
    /// Removed from the active fleet
    Retired,
}

/// A vehicle row as served by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Unique ID
    pub id: String,
    /// Display name
    pub name: String,
    /// License plate
    pub plate: String,
    /// Manufacturer / model
    pub model: String,
    /// Operational status
    pub status: VehicleStatus,
    /// Odometer reading in kilometers
    pub odometer_km: u32,
    /// Assigned group, if any
    pub group_id: Option<String>,
    /// Last telemetry timestamp
    pub last_seen: Option<DateTime<Utc>>,
}

impl VehicleRecord {
    /// Create a minimal record (tests and offline demos)
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            plate: String::new(),
            model: String::new(),
            status: VehicleStatus::Available,
            odometer_km: 0,
            group_id: None,
            last_seen: None,
        }
    }
}
