//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_QUOTE_ID: &str = "quote_id";
pub const FIELD_BID_NUMBER: &str = "bid_number";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_HASH: &str = "hash";

// Collection sizes
pub const FIELD_UNIT_COUNT: &str = "unit_count";
pub const FIELD_DETAIL_COUNT: &str = "detail_count";

// Change classification
pub const FIELD_SCOPE: &str = "scope";

// Error fields
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_DEGRADED: &str = "degraded";
