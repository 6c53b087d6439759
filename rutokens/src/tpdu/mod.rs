// rutokens/src/tpdu/mod.rs

//! Character-level (T=0) transmission of short APDUs.

/// Exchange state machine
pub mod engine;
/// Command headers and vendor Le quirks
pub mod header;

pub use engine::TpduEngine;
pub use header::{LeQuirk, TpduHeader};
