// rutokens/src/protocol/mod.rs

pub mod apdu;
/// In-place byte order swaps
pub mod byte_order;
/// Bounds-checked slice readers
pub mod parser;
pub mod records;
pub mod tlv;
pub mod transcode;

pub use apdu::{Case, IsoApdu, case_of, classify};
pub use byte_order::{swap_pairs, swap_quads};
pub use records::{DataObjectInfo, FileDescriptor};
pub use tlv::{TagReader, TlvWriter};
pub use transcode::FormatTranscoder;
