//! Stable exit codes for tidewatch CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid config, unknown cleanup, or other errors.
pub const INVALID: i32 = 1;
/// `tidewatch forecast` rendered the "forecast unavailable" notice.
pub const FORECAST_UNAVAILABLE: i32 = 2;
