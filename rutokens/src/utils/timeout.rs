//! Timeout helpers used across the crate.
//!
//! These centralize the default read deadline handed to transports and a
//! small conversion helper so code can express durations in milliseconds.

use std::time::Duration;

/// Default read timeout in milliseconds used by transports when a caller
/// doesn't provide an explicit timeout.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 3000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
