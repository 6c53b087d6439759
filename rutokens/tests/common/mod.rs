// Shared helpers for integration tests. Each aggregator includes this module
// through `#[path]`, so not every helper is used by every test crate.
#![allow(dead_code)]

pub mod fixtures;

pub use rutokens::test_support::*;

/// Route `log` output through env_logger; harmless when called repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
