//! Config - Data-View and Backend Configuration

use std::path::Path;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CARD_COLUMNS, DEFAULT_PAGE_SIZE, FETCH_TIMEOUT_SECS, LOAD_THRESHOLD, LOOKAHEAD_ROWS,
    SEARCH_DEBOUNCE_MS,
};
use crate::error::Result;

/// Main configuration for the data-view layer
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct FleetviewConfig {
    /// View tuning
    pub view: ViewConfig,
    /// REST backend configuration
    pub rest: RestConfig,
}

/// Tuning for a single data view (grid, tree, or card gallery)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewConfig {
    /// Items fetched per request
    pub page_size: usize,
    /// Items rendered per row (1 for grids/trees, >1 for card galleries)
    pub column_count: usize,
    /// Remaining-row threshold that triggers the next append fetch
    pub load_threshold: usize,
    /// Extra rows reported while the total is unknown
    pub lookahead_rows: usize,
    /// Quiet window for search-term changes, in milliseconds
    pub search_debounce_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            column_count: 1,
            load_threshold: LOAD_THRESHOLD,
            lookahead_rows: LOOKAHEAD_ROWS,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
        }
    }
}

impl ViewConfig {
    /// Preset for card-gallery layouts
    pub fn cards() -> Self {
        Self {
            column_count: DEFAULT_CARD_COLUMNS,
            ..Default::default()
        }
    }

    /// Search debounce window as a Duration
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// REST backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RestConfig {
    /// Base URL of the backend (e.g., "https://fleet.example.com")
    pub base_url: String,
    /// API path prefix (e.g., "api/v1")
    pub api_prefix: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            api_prefix: "api/v1".to_string(),
            timeout_secs: FETCH_TIMEOUT_SECS,
        }
    }
}

impl RestConfig {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join the base URL, prefix, and a resource path
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Load configuration from a TOML file
pub fn load_toml(path: &Path) -> Result<FleetviewConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: FleetviewConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_toml(path: &Path, config: &FleetviewConfig) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
