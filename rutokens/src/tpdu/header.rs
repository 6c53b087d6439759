// rutokens/src/tpdu/header.rs

use crate::constants::{
    CLA_ISO, GET_DO_INFO_FORCED_LE, INS_GET_RESPONSE, SELECT_FILE_FORCED_LE, TPDU_HEADER_LEN,
};
use crate::protocol::apdu::{Case, IsoApdu, decode_short_len, encode_short_len};

/// Le values the token insists on regardless of what the host asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeQuirk {
    /// SELECT FILE answers with a 32-byte file descriptor record
    SelectFile,
    /// GET DO INFO always announces the largest short response
    GetDoInfo,
}

impl LeQuirk {
    /// Quirk applying to `apdu`, if any
    pub fn for_command(apdu: &IsoApdu<'_>) -> Option<Self> {
        if apdu.is_select_file() {
            Some(Self::SelectFile)
        } else if apdu.is_get_do_info() {
            Some(Self::GetDoInfo)
        } else {
            None
        }
    }

    /// Le sent in place of the host's
    pub fn le(&self) -> u8 {
        match self {
            Self::SelectFile => SELECT_FILE_FORCED_LE,
            Self::GetDoInfo => GET_DO_INFO_FORCED_LE,
        }
    }
}

/// T=0 command header `CLA INS P1 P2 P3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TpduHeader([u8; TPDU_HEADER_LEN]);

impl TpduHeader {
    /// P3 is 0 for Case 1, Le for Case 2S (after vendor quirks) and Lc for
    /// Case 3S/4S.
    pub fn for_command(apdu: &IsoApdu<'_>) -> Self {
        let p3 = match apdu.case {
            Case::Case1 => 0,
            Case::Case2S => match LeQuirk::for_command(apdu) {
                Some(quirk) => {
                    log::debug!("{:?}: Le forced to {:#04x}", quirk, quirk.le());
                    quirk.le()
                }
                None => encode_short_len(apdu.le),
            },
            Case::Case3S | Case::Case4S => encode_short_len(apdu.lc),
        };
        Self([apdu.cla, apdu.ins, apdu.p1, apdu.p2, p3])
    }

    /// GET RESPONSE for `len` bytes. The token only accepts it with CLA 00,
    /// whatever class the original command used.
    pub fn get_response(len: u8) -> Self {
        Self([CLA_ISO, INS_GET_RESPONSE, 0x00, 0x00, len])
    }

    /// Last header byte: Le or Lc
    pub fn p3(&self) -> u8 {
        self.0[4]
    }

    /// Number of bytes a Case 2S data phase may deliver
    pub fn expected_len(&self) -> usize {
        decode_short_len(self.p3())
    }

    /// Header as sent on the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
