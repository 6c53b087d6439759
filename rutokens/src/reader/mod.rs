// rutokens/src/reader/mod.rs

/// Reader construction
pub mod builder;
/// Per-reader settings
pub mod config;
/// Type-state reader session
pub mod handle;
/// Fixed-size arena of sessions
pub mod registry;

pub use builder::ReaderBuilder;
pub use config::ReaderConfig;
pub use handle::{Powered, Reader, Unpowered};
pub use registry::{ReaderRegistry, ReaderSlot};
