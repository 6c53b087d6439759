#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{bytes, create_file_fcp, do_info_iso};
use rutokens::protocol::TagReader;
use rutokens::Error;

#[test]
fn fcp_body_tags() {
    let fcp = create_file_fcp();
    let body = TagReader::new(&fcp[2..]);
    assert_eq!(body.find(0x82).unwrap(), &[0x01, 0x00]);
    assert_eq!(body.find_exact(0x86, 40).unwrap()[0], 0x43);
    assert!(matches!(body.find(0x81), Err(Error::TagNotFound { tag: 0x81 })));
}

#[test]
fn do_info_extension_found_after_security_attribute() {
    let iso = do_info_iso();
    let r = TagReader::new(&iso);
    assert_eq!(r.find_array::<3>(0xA5).unwrap(), [0xC1, 0xC2, 0xC3]);
}

#[test]
fn truncated_entry_is_a_scan_failure() {
    let data = bytes("83 02 3f 00 86 28 00 00");
    let r = TagReader::new(&data);
    assert!(matches!(r.find(0xA5), Err(Error::MalformedTlv { .. })));
    assert_eq!(r.find(0x83).unwrap(), &[0x3F, 0x00]);
}
