// rutokens/src/prelude.rs

pub use crate::protocol::{Case, FormatTranscoder, IsoApdu, classify};
pub use crate::reader::{Powered, Reader, ReaderBuilder, ReaderConfig, ReaderRegistry, Unpowered};
pub use crate::tpdu::TpduEngine;
pub use crate::transport::Transport;
pub use crate::{Atr, Error, IccPresence, ReaderHandle, Result, SlotStatus, StatusWord};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex_spaced, ms};
