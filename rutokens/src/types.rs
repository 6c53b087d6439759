// rutokens/src/types.rs

use crate::Error;
use crate::constants::{
    ICC_STATUS_BUSY_COMMON, ICC_STATUS_IDLE, ICC_STATUS_MUTE, ICC_STATUS_READY_DATA,
    ICC_STATUS_READY_SW,
};
use derive_more::Display;
use std::convert::TryFrom;

/// Trailing status word of every response (SW1 SW2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{:02X}{:02X}", sw1, sw2)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusWord {
    /// First status byte
    pub sw1: u8,
    /// Second status byte
    pub sw2: u8,
}

impl StatusWord {
    /// 9000
    pub const SUCCESS: Self = Self::new(0x90, 0x00);

    /// Build from the two status bytes
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// `[SW1, SW2]`
    pub fn to_bytes(&self) -> [u8; 2] {
        [self.sw1, self.sw2]
    }

    /// True for 9000 only
    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }

}

impl TryFrom<&[u8]> for StatusWord {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes {
            [sw1, sw2] => Ok(Self::new(*sw1, *sw2)),
            _ => Err(Error::InvalidLength {
                expected: 2,
                actual: bytes.len(),
            }),
        }
    }
}

/// Slot status byte reported by the reader (GET_STATUS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotStatus {
    /// Powered, nothing pending
    Idle,
    /// Card waits for a data block, or has one to hand over
    DataReady,
    /// Status word is ready to be read
    StatusReady,
    /// Card is processing; low nibble is a progress counter
    Busy(u8),
    /// Card absent or not responding
    Mute,
    /// Any other status byte
    Unknown(u8),
}

impl SlotStatus {
    /// Decode a GET_STATUS byte
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            ICC_STATUS_MUTE => Self::Mute,
            ICC_STATUS_IDLE => Self::Idle,
            ICC_STATUS_READY_DATA => Self::DataReady,
            ICC_STATUS_READY_SW => Self::StatusReady,
            b if b & 0xF0 == ICC_STATUS_BUSY_COMMON => Self::Busy(b & 0x0F),
            b => Self::Unknown(b),
        }
    }

    /// Encode back into the status byte
    pub fn to_raw(&self) -> u8 {
        match self {
            Self::Idle => ICC_STATUS_IDLE,
            Self::DataReady => ICC_STATUS_READY_DATA,
            Self::StatusReady => ICC_STATUS_READY_SW,
            Self::Busy(counter) => ICC_STATUS_BUSY_COMMON | (counter & 0x0F),
            Self::Mute => ICC_STATUS_MUTE,
            Self::Unknown(b) => *b,
        }
    }

    /// `Busy(_)`
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

/// Card presence as seen by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IccPresence {
    /// Card answers
    PresentActive,
    /// Slot is mute
    Absent,
}

impl From<SlotStatus> for IccPresence {
    fn from(status: SlotStatus) -> Self {
        match status {
            SlotStatus::Mute => Self::Absent,
            _ => Self::PresentActive,
        }
    }
}

/// Answer-To-Reset returned on power-on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atr(Vec<u8>);

impl Atr {
    /// ISO 7816-3 upper bound for an ATR
    pub const MAX_LEN: usize = 33;

    /// Raw ATR bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Space-separated hex, for logs
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(&self.0)
    }
}

impl TryFrom<&[u8]> for Atr {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.is_empty() || bytes.len() > Self::MAX_LEN {
            return Err(Error::InvalidLength {
                expected: Self::MAX_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }
}

/// Opaque key of a reader session inside a `ReaderRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "reader#{}", _0)]
pub struct ReaderHandle(pub(crate) usize);
