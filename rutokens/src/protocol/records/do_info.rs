// rutokens/src/protocol/records/do_info.rs

use super::security::{PACKED_SECURITY_LEN, pack_security_attributes, unpack_security_attributes};
use super::{iso_u16, tags};
use crate::constants::{RTPROT_RECORD_LEN, SECURITY_ATTR_LEN};
use crate::protocol::parser::{array_at, ensure_len, slice_at};
use crate::protocol::tlv::{TagReader, TlvWriter};
use crate::utils::bytes_to_hex_spaced;
use crate::Result;

const OFF_SIZE: usize = 0;
const OFF_TYPE_ID: usize = 2;
const OFF_OPTIONS: usize = 4;
const OFF_SECURITY: usize = 17;

/// Data-object header as stored by the firmware, followed by an optional
/// extension block whose length is the low byte of `size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataObjectInfo {
    /// Object size; its low byte is the extension length
    pub size: u16,
    /// Object type and id (ISO tag 0x83)
    pub type_id: [u8; 2],
    /// options, flags, max-try
    pub options: [u8; 3],
    /// Packed security attribute
    pub security: [u8; PACKED_SECURITY_LEN],
    /// Trailing extension block (ISO tag 0xA5)
    pub extension: Vec<u8>,
}

impl DataObjectInfo {
    /// Read an ISO data-object-info TLV. Every tag is optional; an extension
    /// (0xA5) is taken only when its length matches the low byte of the size.
    pub fn from_iso(data: &[u8]) -> Result<Self> {
        let reader = TagReader::new(data);

        let size = reader
            .find_optional::<2>(tags::SIZE)
            .map(iso_u16)
            .unwrap_or(0);
        let ext_len = (size & 0xFF) as usize;
        let extension = match reader.find_exact(tags::DO_EXTENSION, ext_len) {
            Ok(v) => v.to_vec(),
            Err(e) => {
                log::debug!("no usable 0xA5 block ({}), extension dropped", e);
                Vec::new()
            }
        };
        let type_id = reader
            .find_optional::<2>(tags::FILE_ID)
            .unwrap_or([0u8; 2]);
        let options = reader
            .find_optional::<3>(tags::DO_OPTIONS)
            .unwrap_or([0u8; 3]);
        let security = reader
            .find_optional::<SECURITY_ATTR_LEN>(tags::SECURITY_ATTR)
            .map(|attr| pack_security_attributes(&attr))
            .unwrap_or([0u8; PACKED_SECURITY_LEN]);

        log::debug!(
            "do info: size={} type/id={:02x}{:02x} opts={}",
            size,
            type_id[0],
            type_id[1],
            bytes_to_hex_spaced(&options)
        );

        Ok(Self {
            size,
            type_id,
            options,
            security,
            extension,
        })
    }

    /// Read a firmware record: 32-byte header plus the extension block.
    pub fn from_record(record: &[u8]) -> Result<Self> {
        ensure_len(record, RTPROT_RECORD_LEN)?;
        let size = u16::from_le_bytes(array_at(record, OFF_SIZE)?);
        let ext_len = (size & 0xFF) as usize;
        let extension = slice_at(record, RTPROT_RECORD_LEN, ext_len)?.to_vec();
        Ok(Self {
            size,
            type_id: array_at(record, OFF_TYPE_ID)?,
            options: array_at(record, OFF_OPTIONS)?,
            security: array_at(record, OFF_SECURITY)?,
            extension,
        })
    }

    /// Firmware layout: 32-byte header followed by the extension.
    pub fn to_record(&self) -> Vec<u8> {
        let mut out = vec![0u8; RTPROT_RECORD_LEN];
        out[OFF_SIZE..OFF_SIZE + 2].copy_from_slice(&self.size.to_le_bytes());
        out[OFF_TYPE_ID..OFF_TYPE_ID + 2].copy_from_slice(&self.type_id);
        out[OFF_OPTIONS..OFF_OPTIONS + 3].copy_from_slice(&self.options);
        out[OFF_SECURITY..].copy_from_slice(&self.security);
        out.extend_from_slice(&self.extension);
        out
    }

    /// Rebuild the ISO TLV: 0x80 (only when the low size byte is non-zero), 0x83, 0x85,
    /// 0x86 and 0xA5 when an extension is present.
    pub fn to_iso(&self) -> Result<Vec<u8>> {
        let mut w = TlvWriter::with_capacity(4 + 4 + 5 + 2 + SECURITY_ATTR_LEN + 2 + self.extension.len());
        if self.size & 0xFF != 0 {
            w.push(tags::SIZE, &self.size.to_be_bytes())?;
        }
        w.push(tags::FILE_ID, &self.type_id)?
            .push(tags::DO_OPTIONS, &self.options)?
            .push(
                tags::SECURITY_ATTR,
                &unpack_security_attributes(&self.security),
            )?;
        if !self.extension.is_empty() {
            w.push(tags::DO_EXTENSION, &self.extension)?;
        }
        Ok(w.into_inner())
    }
}
