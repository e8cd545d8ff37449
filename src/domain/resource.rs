//! Resource - Backend Collection Names

use serde::{Deserialize, Serialize};

/// A paginated collection served by the REST backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Fleet vehicles
    Vehicles,
    /// Drivers
    Drivers,
    /// Tracking devices
    Devices,
    /// Geofences
    Geofences,
    /// Reservations
    Reservations,
    /// Customers
    Customers,
    /// Maintenance tasks
    Maintenance,
    /// Vehicle groups (tree roots; children served per group)
    Groups,
}

impl Resource {
    /// URL path segment for this collection
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Vehicles => "vehicles",
            Resource::Drivers => "drivers",
            Resource::Devices => "devices",
            Resource::Geofences => "geofences",
            Resource::Reservations => "reservations",
            Resource::Customers => "customers",
            Resource::Maintenance => "maintenance",
            Resource::Groups => "groups",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
