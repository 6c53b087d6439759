// rutokens/src/protocol/records/security.rs

use crate::constants::SECURITY_ATTR_LEN;

/// Length of the packed security area inside a proprietary record
pub const PACKED_SECURITY_LEN: usize = 15;

/// Leading bytes copied verbatim
const VERBATIM_LEN: usize = 8;
/// Remaining attribute groups are 4 bytes wide; only their first byte is kept
const GROUP_STRIDE: usize = 4;

/// Compress an ISO security attribute (tag 0x86, 40 bytes) into the 15-byte
/// firmware layout: bytes 0..8 verbatim, then bytes 8, 12, .., 32.
pub fn pack_security_attributes(attr: &[u8; SECURITY_ATTR_LEN]) -> [u8; PACKED_SECURITY_LEN] {
    let mut out = [0u8; PACKED_SECURITY_LEN];
    out[..VERBATIM_LEN].copy_from_slice(&attr[..VERBATIM_LEN]);
    for (slot, src) in out[VERBATIM_LEN..]
        .iter_mut()
        .zip(attr[VERBATIM_LEN..].iter().step_by(GROUP_STRIDE))
    {
        *slot = *src;
    }
    out
}

/// Expand the 15-byte firmware layout back into a 40-byte ISO attribute.
/// Bytes of each group after the first, and the reserved tail, are zero.
pub fn unpack_security_attributes(packed: &[u8; PACKED_SECURITY_LEN]) -> [u8; SECURITY_ATTR_LEN] {
    let mut out = [0u8; SECURITY_ATTR_LEN];
    out[..VERBATIM_LEN].copy_from_slice(&packed[..VERBATIM_LEN]);
    for (i, b) in packed[VERBATIM_LEN..].iter().enumerate() {
        out[VERBATIM_LEN + i * GROUP_STRIDE] = *b;
    }
    out
}
