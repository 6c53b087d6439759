// rutokens/src/protocol/records/mod.rs

//! Fixed-offset proprietary ("rtprot") records used by the token firmware for
//! file and data-object metadata, and their ISO TLV counterparts.

/// Data-object info header
pub mod do_info;
/// File descriptor record and FCP
pub mod file_descriptor;
/// Security attribute packing
pub mod security;

pub use do_info::DataObjectInfo;
pub use file_descriptor::FileDescriptor;
pub use security::{pack_security_attributes, unpack_security_attributes};

use crate::protocol::tlv::TagReader;
use crate::{Error, Result};

/// ISO tags shared by the FCP and data-object-info layouts
pub mod tags {
    /// FCP template
    pub const FCP_TEMPLATE: u8 = 0x62;
    /// File or object size
    pub const SIZE: u8 = 0x80;
    /// Size including structural overhead
    pub const COMPLETE_SIZE: u8 = 0x81;
    /// File descriptor byte pair
    pub const FILE_TYPE: u8 = 0x82;
    /// File identifier; type and id for a data object
    pub const FILE_ID: u8 = 0x83;
    /// Data-object options, flags, max-try
    pub const DO_OPTIONS: u8 = 0x85;
    /// Security attribute
    pub const SECURITY_ATTR: u8 = 0x86;
    /// Life cycle status
    pub const LIFE_CYCLE: u8 = 0x8A;
    /// Data-object extension block
    pub const DO_EXTENSION: u8 = 0xA5;
}

/// Look up a tag the conversion cannot do without. Absence or a wrong length
/// is reported as a malformed structure.
pub(crate) fn required<const N: usize>(reader: &TagReader<'_>, tag: u8) -> Result<[u8; N]> {
    match reader.find_array::<N>(tag) {
        Ok(v) => Ok(v),
        Err(Error::TagNotFound { .. }) | Err(Error::TagLengthMismatch { .. }) => {
            log::debug!("required tag {:#04x} missing", tag);
            Err(Error::MalformedTlv { tag })
        }
        Err(e) => Err(e),
    }
}

/// ISO carries sizes and identifiers big-endian, the firmware little-endian.
pub(crate) fn iso_u16(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}
