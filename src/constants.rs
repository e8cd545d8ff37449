//! Data-View Constants
//!
//! Centralized tunables for consistent loading behavior across views.

/// Remaining-row threshold that triggers the next append fetch
pub const LOAD_THRESHOLD: usize = 10;

/// Extra rows reported to the virtualization surface while the total is
/// still being discovered (keeps the surface asking for more)
pub const LOOKAHEAD_ROWS: usize = 10;

/// Default number of items fetched per request
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default column count for card-gallery layouts
pub const DEFAULT_CARD_COLUMNS: usize = 3;

/// Debounce window applied to search-term changes before refetching
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Per-request timeout against the REST backend
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the API bearer token
pub const API_TOKEN_ENV: &str = "FLEETVIEW_API_TOKEN";
