// rutokens/src/lib.rs

//! rutokens
//!
//! Pure Rust driver core for Rutoken S USB tokens: ISO 7816-4 APDU
//! classification, the character-level (T=0) exchange engine, and the
//! conversion between ISO file/data-object structures and the token's
//! proprietary records.
#![warn(missing_docs)]

pub mod constants;
/// Crate-wide error type and `Result` alias
pub mod error;
/// Common imports for driver users
pub mod prelude;
/// APDU classification, TLV handling and ISO/proprietary conversion
pub mod protocol;
/// Reader sessions, configuration and the session registry
pub mod reader;
pub mod test_support;
/// T=0 exchange engine
pub mod tpdu;
/// Reader transports: the trait, a scripted mock and the USB binding
pub mod transport;
/// Status words, slot status, ATR and handles
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available to consumers.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
