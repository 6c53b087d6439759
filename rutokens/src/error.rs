// rutokens/src/error.rs

use thiserror::Error;

use crate::types::ReaderHandle;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    /// No matching reader on the bus, or no transport supplied
    #[error("device not found")]
    DeviceNotFound,

    /// Failure reported by libusb. The binding is an optional dependency so
    /// the core builds without it.
    #[cfg(feature = "usb")]
    #[error("usb error: {0}")]
    Usb(#[from] rusb::Error),

    /// Any other transport failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Bytes do not form a short APDU
    #[error("invalid apdu: unrecognised length/case combination ({len} bytes)")]
    InvalidApdu {
        /// Length of the rejected input
        len: usize,
    },

    /// Bounds check failed
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// Card absent or not answering
    #[error("device is mute (card absent or not responding)")]
    DeviceMute,

    /// Card or reader deviated from the T=0 sequence
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// TLV entry overruns its buffer, or a required tag is unusable
    #[error("malformed tlv while looking for tag {tag:#04x}")]
    MalformedTlv {
        /// Tag being looked up
        tag: u8,
    },

    /// Tag absent
    #[error("tag {tag:#04x} not found")]
    TagNotFound {
        /// Tag being looked up
        tag: u8,
    },

    /// Tag present with an unexpected length
    #[error("tag {tag:#04x} has length {actual}, expected {expected}")]
    TagLengthMismatch {
        /// Tag found
        tag: u8,
        /// Required value length
        expected: usize,
        /// Value length found
        actual: usize,
    },

    /// Rebuilt response does not fit the caller's buffer
    #[error("insufficient response buffer: need {needed} bytes, capacity {capacity}")]
    InsufficientResponseBuffer {
        /// Bytes the rebuilt response needs, status word included
        needed: usize,
        /// Configured response capacity
        capacity: usize,
    },

    /// Too many follow-up rounds in one exchange
    #[error("continuation limit of {limit} exceeded")]
    RetryLimitExceeded {
        /// Configured bound
        limit: usize,
    },

    /// Registry is full
    #[error("reader limit of {max} reached")]
    ReaderLimitReached {
        /// Registry capacity
        max: usize,
    },

    /// Handle does not name a registered session
    #[error("unknown reader handle {0}")]
    UnknownReader(ReaderHandle),

    /// Read deadline or busy wait expired
    #[error("operation timed out")]
    Timeout,

    /// Not available on this transport or in this state
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// True for failures that happened on the wire rather than in local
    /// parsing or conversion. Callers map these to a communication error.
    pub fn is_communication(&self) -> bool {
        match self {
            Error::Transport(_)
            | Error::DeviceMute
            | Error::ProtocolViolation(_)
            | Error::Timeout
            | Error::RetryLimitExceeded { .. } => true,
            #[cfg(feature = "usb")]
            Error::Usb(_) => true,
            _ => false,
        }
    }
}

/// Result with the crate error
pub type Result<T> = std::result::Result<T, Error>;
