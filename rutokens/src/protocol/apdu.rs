// rutokens/src/protocol/apdu.rs

//! ISO 7816-4 short APDU classification (Annex A rules).

use crate::constants::{CLA_ISO, CLA_PROPRIETARY, INS_GET_DO_INFO, INS_SELECT_FILE, MAX_APDU_LEN};
use crate::{Error, Result};

/// ISO 7816-4 command case of a short APDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Case {
    /// Header only
    Case1,
    /// Header + Le
    Case2S,
    /// Header + Lc + data
    Case3S,
    /// Header + Lc + data + Le
    Case4S,
}

impl Case {
    /// Case 3S or 4S
    pub fn has_command_data(&self) -> bool {
        matches!(self, Self::Case3S | Self::Case4S)
    }
}

/// A classified command APDU borrowing its data field from the raw bytes.
///
/// `lc` and `le` are effective lengths (1..=256); zero means the field is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoApdu<'a> {
    /// ISO case
    pub case: Case,
    /// Class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Command data length
    pub lc: usize,
    /// Expected response length
    pub le: usize,
    /// Command data field, `lc` bytes
    pub data: &'a [u8],
}

/// Case and length fields derived from byte 4 and the total length.
struct Lengths<'a> {
    case: Case,
    lc: usize,
    le: usize,
    data: &'a [u8],
}

/// Decode a one-byte length field where 0 stands for 256.
pub fn decode_short_len(b: u8) -> usize {
    if b == 0 { 256 } else { b as usize }
}

/// Encode an effective length (1..=256) back into its one-byte field.
pub fn encode_short_len(n: usize) -> u8 {
    // 256 wraps to 0 by definition of the short length field
    (n & 0xFF) as u8
}

fn check_lengths(bytes: &[u8]) -> Result<Lengths<'_>> {
    if bytes.len() > MAX_APDU_LEN {
        return Err(Error::InvalidApdu { len: bytes.len() });
    }
    if bytes.len() < 5 {
        return Ok(Lengths {
            case: Case::Case1,
            lc: 0,
            le: 0,
            data: &[],
        });
    }

    let b = bytes[4];
    let body = &bytes[5..];

    if body.is_empty() {
        return Ok(Lengths {
            case: Case::Case2S,
            lc: 0,
            le: decode_short_len(b),
            data: &[],
        });
    }

    let lc = decode_short_len(b);
    if body.len() == lc {
        return Ok(Lengths {
            case: Case::Case3S,
            lc,
            le: 0,
            data: body,
        });
    }
    if body.len() == lc + 1 {
        return Ok(Lengths {
            case: Case::Case4S,
            lc,
            le: decode_short_len(body[lc]),
            data: &body[..lc],
        });
    }

    Err(Error::InvalidApdu { len: bytes.len() })
}

/// Determine only the case of a raw command. Inputs shorter than five bytes
/// are `Case1`, whatever their length.
pub fn case_of(bytes: &[u8]) -> Result<Case> {
    check_lengths(bytes).map(|l| l.case)
}

/// Classify a raw command and extract its header and length fields.
pub fn classify(bytes: &[u8]) -> Result<IsoApdu<'_>> {
    IsoApdu::parse(bytes)
}

impl<'a> IsoApdu<'a> {
    /// Strict parse: at least CLA INS P1 P2 must be present.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::InvalidApdu { len: bytes.len() });
        }
        let lengths = check_lengths(bytes)?;
        Ok(Self {
            case: lengths.case,
            cla: bytes[0],
            ins: bytes[1],
            p1: bytes[2],
            p2: bytes[3],
            lc: lengths.lc,
            le: lengths.le,
            data: lengths.data,
        })
    }

    /// CLA 00, INS A4
    pub fn is_select_file(&self) -> bool {
        self.cla == CLA_ISO && self.ins == INS_SELECT_FILE
    }

    /// CLA 80, INS 30
    pub fn is_get_do_info(&self) -> bool {
        self.cla == CLA_PROPRIETARY && self.ins == INS_GET_DO_INFO
    }
}
