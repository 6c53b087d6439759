// rutokens/src/protocol/records/file_descriptor.rs

use super::security::{PACKED_SECURITY_LEN, pack_security_attributes, unpack_security_attributes};
use super::{iso_u16, required, tags};
use crate::constants::{RTPROT_RECORD_LEN, SECURITY_ATTR_LEN};
use crate::protocol::parser::{array_at, byte_at, ensure_len};
use crate::protocol::tlv::{TagReader, TlvWriter};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

// Byte offsets inside the 32-byte record
const OFF_COMPLETE_SIZE: usize = 0;
const OFF_SIZE: usize = 2;
const OFF_FILE_TYPE: usize = 4;
const OFF_FILE_ID: usize = 6;
const OFF_LIFE_CYCLE: usize = 8;
const OFF_SECURITY: usize = 17;

/// Length of the FCP template rebuilt from a record
pub const FCP_LEN: usize = 63;

/// File descriptor as stored by the firmware. Multi-byte numbers are held
/// little-endian in the record and big-endian in the ISO FCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDescriptor {
    /// ISO tag 0x81
    pub complete_size: u16,
    /// ISO tag 0x80
    pub size: u16,
    /// ISO tag 0x82, copied verbatim
    pub file_type: [u8; 2],
    /// ISO tag 0x83
    pub file_id: u16,
    /// ISO tag 0x8A; set by the firmware
    pub life_cycle: u8,
    /// Packed security attribute (ISO tag 0x86)
    pub security: [u8; PACKED_SECURITY_LEN],
}

impl FileDescriptor {
    /// Read an ISO FCP template (tag 0x62). File type (0x82) and file id
    /// (0x83) are required; sizes (0x81, 0x80) and the security attribute
    /// (0x86) default to zero.
    pub fn from_fcp(fcp: &[u8]) -> Result<Self> {
        let template = tags::FCP_TEMPLATE;
        if fcp.len() < 2 || fcp[0] != template || fcp[1] as usize + 2 > fcp.len() {
            log::debug!("not an FCP template: {}", bytes_to_hex_spaced(fcp));
            return Err(Error::MalformedTlv { tag: template });
        }
        let reader = TagReader::new(&fcp[2..2 + fcp[1] as usize]);

        let file_type = required::<2>(&reader, tags::FILE_TYPE)?;
        let file_id = iso_u16(required::<2>(&reader, tags::FILE_ID)?);
        let complete_size = reader
            .find_optional::<2>(tags::COMPLETE_SIZE)
            .map(iso_u16)
            .unwrap_or(0);
        let size = reader
            .find_optional::<2>(tags::SIZE)
            .map(iso_u16)
            .unwrap_or(0);
        let security = reader
            .find_optional::<SECURITY_ATTR_LEN>(tags::SECURITY_ATTR)
            .map(|attr| pack_security_attributes(&attr))
            .unwrap_or([0u8; PACKED_SECURITY_LEN]);

        log::debug!(
            "fcp: type={:02x}{:02x} id={:04x} size={} complete_size={}",
            file_type[0],
            file_type[1],
            file_id,
            size,
            complete_size
        );

        Ok(Self {
            complete_size,
            size,
            file_type,
            file_id,
            life_cycle: 0,
            security,
        })
    }

    /// Read a 32-byte firmware record. Trailing bytes are ignored.
    pub fn from_record(record: &[u8]) -> Result<Self> {
        ensure_len(record, RTPROT_RECORD_LEN)?;
        Ok(Self {
            complete_size: u16::from_le_bytes(array_at(record, OFF_COMPLETE_SIZE)?),
            size: u16::from_le_bytes(array_at(record, OFF_SIZE)?),
            file_type: array_at(record, OFF_FILE_TYPE)?,
            file_id: u16::from_le_bytes(array_at(record, OFF_FILE_ID)?),
            life_cycle: byte_at(record, OFF_LIFE_CYCLE)?,
            security: array_at(record, OFF_SECURITY)?,
        })
    }

    /// Firmware layout
    pub fn to_record(&self) -> [u8; RTPROT_RECORD_LEN] {
        let mut out = [0u8; RTPROT_RECORD_LEN];
        out[OFF_COMPLETE_SIZE..OFF_COMPLETE_SIZE + 2]
            .copy_from_slice(&self.complete_size.to_le_bytes());
        out[OFF_SIZE..OFF_SIZE + 2].copy_from_slice(&self.size.to_le_bytes());
        out[OFF_FILE_TYPE..OFF_FILE_TYPE + 2].copy_from_slice(&self.file_type);
        out[OFF_FILE_ID..OFF_FILE_ID + 2].copy_from_slice(&self.file_id.to_le_bytes());
        out[OFF_LIFE_CYCLE] = self.life_cycle;
        out[OFF_SECURITY..].copy_from_slice(&self.security);
        out
    }

    /// Rebuild the ISO FCP template: 0x81, 0x80, 0x82, 0x83, 0x8A, 0x86 inside 0x62.
    pub fn to_fcp(&self) -> Result<Vec<u8>> {
        let mut w = TlvWriter::with_capacity(FCP_LEN);
        w.push(tags::COMPLETE_SIZE, &self.complete_size.to_be_bytes())?
            .push(tags::SIZE, &self.size.to_be_bytes())?
            .push(tags::FILE_TYPE, &self.file_type)?
            .push(tags::FILE_ID, &self.file_id.to_be_bytes())?
            .push(tags::LIFE_CYCLE, &[self.life_cycle])?
            .push(
                tags::SECURITY_ATTR,
                &unpack_security_attributes(&self.security),
            )?;
        w.into_template(tags::FCP_TEMPLATE)
    }
}
