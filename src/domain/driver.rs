//! Driver - Fleet Driver Record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A driver row as served by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRecord {
    /// Unique ID
    pub id: String,
    /// Full name
    pub name: String,
    /// License number
    pub license_number: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Currently assigned vehicle, if any
    pub vehicle_id: Option<String>,
    /// License expiry date
    pub license_expires: Option<DateTime<Utc>>,
}

impl DriverRecord {
    /// Create a minimal record (tests and offline demos)
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            license_number: String::new(),
            phone: None,
            vehicle_id: None,
            license_expires: None,
        }
    }
}
