//! Small, reusable helpers: hex rendering for logs and timeout conversion.

pub mod hex;
pub mod timeout;

// Re-export so callers can use `crate::utils::bytes_to_hex_spaced(...)` directly.
pub use hex::*;
pub use timeout::*;
