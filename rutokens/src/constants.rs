// rutokens/src/constants.rs
//! Common protocol constants used across the crate

/// T=0 command header length: CLA INS P1 P2 P3
pub const TPDU_HEADER_LEN: usize = 5;

/// Status word length appended to every response
pub const SW_LEN: usize = 2;

/// Largest short APDU: header(4) + Lc(1) + 256 data bytes + Le(1)
pub const MAX_APDU_LEN: usize = 262;

/// Largest short response: 256 data bytes + SW1 SW2
pub const MAX_RESPONSE_LEN: usize = 256 + SW_LEN;

/// Default bound on Le-correction / GET RESPONSE steps per exchange
pub const DEFAULT_MAX_CONTINUATIONS: usize = 3;

/// Maximum number of reader sessions held by a registry
pub const MAX_READERS: usize = 16;

/// ATR length reported by Rutoken S on power-on
pub const RUTOKEN_ATR_LEN: usize = 19;

// ISO 7816-4 classes and instruction codes the driver treats specially

/// Interindustry class
pub const CLA_ISO: u8 = 0x00;
/// Vendor class used by GET DO INFO
pub const CLA_PROPRIETARY: u8 = 0x80;
/// SELECT FILE
pub const INS_SELECT_FILE: u8 = 0xA4;
/// DELETE FILE
pub const INS_DELETE_FILE: u8 = 0xE4;
/// CREATE FILE
pub const INS_CREATE_FILE: u8 = 0xE0;
/// CREATE DO / key generation
pub const INS_CREATE_DO: u8 = 0xDA;
/// GET DO INFO (CLA 0x80)
pub const INS_GET_DO_INFO: u8 = 0x30;
/// GET DATA
pub const INS_GET_DATA: u8 = 0xCA;
/// GET RESPONSE
pub const INS_GET_RESPONSE: u8 = 0xC0;

/// P1 of a CREATE DO carrying a DO-info TLV
pub const P1_CREATE_DO: u8 = 0x01;
/// P2 for data-object creation
pub const P2_CREATE_DO: u8 = 0x62;
/// P2 for on-card key generation
pub const P2_KEY_GEN: u8 = 0x65;

/// P1 of the proprietary GET DATA objects
pub const P1_GET_DATA: u8 = 0x01;
/// GET DATA: token serial number (4 bytes, byte-reversed)
pub const P2_SERIAL: u8 = 0x81;
/// GET DATA: free memory (4 bytes, byte-reversed)
pub const P2_FREE_MEMORY: u8 = 0x8A;
/// GET DATA: current EF identifier (pair-swapped)
pub const P2_CURRENT_EF: u8 = 0x11;

/// Le the token insists on for SELECT FILE (size of the file descriptor record)
pub const SELECT_FILE_FORCED_LE: u8 = 0x20;
/// Le the token insists on for GET DO INFO
pub const GET_DO_INFO_FORCED_LE: u8 = 0xFF;

// SW1 values driving the continuation state machine

/// Wrong length, no correction offered
pub const SW1_WRONG_LENGTH: u8 = 0x67;
/// Wrong Le; SW2 carries the correct one
pub const SW1_CORRECT_LE: u8 = 0x6C;
/// SW2 bytes are waiting for GET RESPONSE
pub const SW1_BYTES_AVAILABLE: u8 = 0x61;

// Slot status bytes reported by GET_STATUS

/// Powered, nothing pending
pub const ICC_STATUS_IDLE: u8 = 0x00;
/// Data block expected or available
pub const ICC_STATUS_READY_DATA: u8 = 0x10;
/// Status word available
pub const ICC_STATUS_READY_SW: u8 = 0x20;
/// High nibble of a busy status; the low nibble counts
pub const ICC_STATUS_BUSY_COMMON: u8 = 0x40;
/// No card, or card not answering
pub const ICC_STATUS_MUTE: u8 = 0x80;

/// Fixed part of a proprietary file/DO record
pub const RTPROT_RECORD_LEN: usize = 32;
/// ISO security attribute (tag 0x86) length
pub const SECURITY_ATTR_LEN: usize = 40;

/// Rutoken USB vendor id
pub const RUTOKEN_VENDOR_ID: u16 = 0x0A89;
/// Rutoken S product id
pub const RUTOKEN_S_PRODUCT_ID: u16 = 0x0020;

// Vendor control requests (bRequest) understood by the reader

/// Power the card, reply is the ATR
pub const USB_ICC_POWER_ON: u8 = 0x62;
/// Cut card power
pub const USB_ICC_POWER_OFF: u8 = 0x63;
/// Host to card block
pub const USB_ICC_XFR_BLOCK: u8 = 0x65;
/// Card to host block
pub const USB_ICC_DATA_BLOCK: u8 = 0x6F;
/// One-byte slot status
pub const USB_ICC_GET_STATUS: u8 = 0xA0;

/// bmRequestType: vendor, interface, host to device
pub const USB_REQUEST_OUT: u8 = 0x41;
/// bmRequestType: vendor, interface, device to host
pub const USB_REQUEST_IN: u8 = 0xC1;

/// Interval between busy GET_STATUS polls
pub const BUSY_POLL_INTERVAL_MS: u64 = 10;
/// Stalled-counter rounds before a busy wait times out
pub const BUSY_POLL_ROUNDS: usize = 200;
