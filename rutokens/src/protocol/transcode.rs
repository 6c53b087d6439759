// rutokens/src/protocol/transcode.rs

//! Rewrites command and response payloads between the ISO layouts a host
//! application uses and the proprietary records the token firmware expects.
//!
//! Conversion failures never abort an exchange: the command or response is
//! passed through untouched and the failure is logged.

use crate::constants::{
    CLA_ISO, CLA_PROPRIETARY, INS_CREATE_DO, INS_CREATE_FILE, INS_DELETE_FILE, INS_GET_DATA,
    INS_GET_DO_INFO, INS_SELECT_FILE, MAX_RESPONSE_LEN, P1_CREATE_DO, P1_GET_DATA, P2_CREATE_DO,
    P2_CURRENT_EF, P2_FREE_MEMORY, P2_KEY_GEN, P2_SERIAL, RTPROT_RECORD_LEN, SW_LEN,
};
use crate::protocol::apdu::{Case, IsoApdu, encode_short_len};
use crate::protocol::byte_order::{swap_pairs, swap_quads};
use crate::protocol::parser::split_status_word;
use crate::protocol::records::{DataObjectInfo, FileDescriptor};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Largest command data field expressible with a short Lc
const MAX_SHORT_DATA: usize = 256;

/// ISO ⇄ proprietary payload converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatTranscoder {
    response_capacity: usize,
}

impl Default for FormatTranscoder {
    fn default() -> Self {
        Self::new(MAX_RESPONSE_LEN)
    }
}

impl FormatTranscoder {
    /// `response_capacity` bounds a rebuilt response, status word included.
    pub fn new(response_capacity: usize) -> Self {
        Self { response_capacity }
    }

    /// Bound on rebuilt responses, status word included
    pub fn response_capacity(&self) -> usize {
        self.response_capacity
    }

    /// Rewrite an outgoing command. Only CLA 00 commands carrying data are
    /// touched; anything else, or a payload that fails to convert, is
    /// returned as is.
    pub fn outbound(&self, raw: &[u8]) -> Vec<u8> {
        let apdu = match IsoApdu::parse(raw) {
            Ok(apdu) => apdu,
            Err(_) => return raw.to_vec(),
        };
        if apdu.cla != CLA_ISO || !apdu.case.has_command_data() {
            return raw.to_vec();
        }

        match convert_command_data(&apdu).and_then(|data| match data {
            Some(data) => rebuild_command(&apdu, raw, &data).map(Some),
            None => Ok(None),
        }) {
            Ok(Some(rewritten)) => {
                log::debug!(
                    "outbound {:02x}: {} -> {}",
                    apdu.ins,
                    bytes_to_hex_spaced(raw),
                    bytes_to_hex_spaced(&rewritten)
                );
                rewritten
            }
            Ok(None) => raw.to_vec(),
            Err(e) => {
                log::warn!(
                    "outbound conversion for ins {:02x} skipped, sending unmodified: {}",
                    apdu.ins,
                    e
                );
                raw.to_vec()
            }
        }
    }

    /// Rewrite a response to `command`. Only successful (9000) responses to
    /// SELECT FILE, GET DO INFO and GET DATA are touched.
    pub fn inbound(&self, command: &[u8], response: Vec<u8>) -> Vec<u8> {
        let apdu = match IsoApdu::parse(command) {
            Ok(apdu) => apdu,
            Err(_) => return response,
        };
        let data_len = match split_status_word(&response) {
            Ok((data, sw)) if sw.is_success() => data.len(),
            _ => return response,
        };

        match (apdu.cla, apdu.ins) {
            (CLA_ISO, INS_SELECT_FILE) if data_len == RTPROT_RECORD_LEN => {
                self.rebuild_response(response, |record| FileDescriptor::from_record(record)?.to_fcp())
            }
            (CLA_PROPRIETARY, INS_GET_DO_INFO) if data_len >= RTPROT_RECORD_LEN => {
                self.rebuild_response(response, |record| DataObjectInfo::from_record(record)?.to_iso())
            }
            (CLA_ISO, INS_GET_DATA) if apdu.p1 == P1_GET_DATA => {
                let mut response = response;
                match apdu.p2 {
                    P2_SERIAL | P2_FREE_MEMORY => swap_quads(&mut response[..data_len]),
                    P2_CURRENT_EF => swap_pairs(&mut response[..data_len]),
                    _ => {}
                }
                response
            }
            _ => response,
        }
    }

    fn rebuild_response<F>(&self, response: Vec<u8>, convert: F) -> Vec<u8>
    where
        F: FnOnce(&[u8]) -> Result<Vec<u8>>,
    {
        let rebuilt = split_status_word(&response).and_then(|(record, sw)| {
            let mut iso = convert(record)?;
            let needed = iso.len() + SW_LEN;
            if needed > self.response_capacity {
                return Err(Error::InsufficientResponseBuffer {
                    needed,
                    capacity: self.response_capacity,
                });
            }
            iso.extend_from_slice(&sw.to_bytes());
            Ok(iso)
        });

        match rebuilt {
            Ok(iso) => {
                log::debug!("inbound rebuilt: {}", bytes_to_hex_spaced(&iso));
                iso
            }
            Err(e) => {
                log::warn!("inbound conversion skipped, returning raw record: {}", e);
                response
            }
        }
    }
}

/// Converted command data for the instructions that need it, `None` for
/// everything else.
fn convert_command_data(apdu: &IsoApdu<'_>) -> Result<Option<Vec<u8>>> {
    match apdu.ins {
        INS_SELECT_FILE | INS_DELETE_FILE => {
            let mut data = apdu.data.to_vec();
            swap_pairs(&mut data);
            Ok(Some(data))
        }
        INS_CREATE_FILE => Ok(Some(FileDescriptor::from_fcp(apdu.data)?.to_record().to_vec())),
        INS_CREATE_DO
            if apdu.p1 == P1_CREATE_DO && matches!(apdu.p2, P2_CREATE_DO | P2_KEY_GEN) =>
        {
            Ok(Some(DataObjectInfo::from_iso(apdu.data)?.to_record()))
        }
        _ => Ok(None),
    }
}

/// Header with the new Lc, the converted data, and the Le byte of a Case 4S
/// command carried over.
fn rebuild_command(apdu: &IsoApdu<'_>, raw: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() || data.len() > MAX_SHORT_DATA {
        return Err(Error::InvalidLength {
            expected: MAX_SHORT_DATA,
            actual: data.len(),
        });
    }
    let mut out = Vec::with_capacity(raw.len().max(data.len() + 6));
    out.extend_from_slice(&raw[..4]);
    out.push(encode_short_len(data.len()));
    out.extend_from_slice(data);
    if apdu.case == Case::Case4S {
        if let Some(&le) = raw.last() {
            out.push(le);
        }
    }
    Ok(out)
}
