#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{bytes, create_file_apdu, create_file_fcp, do_info_iso, do_info_record, file_record};
use proptest::prelude::*;
use rutokens::protocol::records::{DataObjectInfo, FileDescriptor};
use rutokens::protocol::{FormatTranscoder, TagReader, TlvWriter};

#[test]
fn create_file_is_sent_as_record() {
    common::init_logging();
    let out = FormatTranscoder::default().outbound(&create_file_apdu());
    let mut expected = bytes("00 e0 00 00 20");
    expected.extend_from_slice(&file_record());
    assert_eq!(out, expected);
}

#[test]
fn file_record_becomes_fcp_with_original_ids() {
    let mut resp = file_record();
    resp.extend_from_slice(&[0x90, 0x00]);
    let out = FormatTranscoder::default().inbound(&bytes("00 a4 00 00 02 10 01"), resp);
    assert_eq!(out.len(), 65);

    let fd = FileDescriptor::from_fcp(&out[..63]).unwrap();
    let original = FileDescriptor::from_fcp(&create_file_fcp()).unwrap();
    assert_eq!(fd.file_type, original.file_type);
    assert_eq!(fd.file_id, original.file_id);
    assert_eq!(fd.size, original.size);
}

#[test]
fn do_info_both_directions() {
    let mut create = bytes("00 da 01 65");
    let iso = do_info_iso();
    create.push(iso.len() as u8);
    create.extend_from_slice(&iso);
    let out = FormatTranscoder::default().outbound(&create);
    assert_eq!(out[4] as usize, do_info_record().len());
    assert_eq!(&out[5..], &do_info_record()[..]);

    let mut resp = do_info_record();
    resp.extend_from_slice(&[0x90, 0x00]);
    let back = FormatTranscoder::default().inbound(&bytes("80 30 00 01 00"), resp);
    assert_eq!(&back[..back.len() - 2], &iso[..]);
}

#[test]
fn do_info_record_with_short_extension_stays_raw() {
    // size low byte says 3, only 1 extension byte delivered
    let mut resp = do_info_record();
    resp.truncate(33);
    resp.extend_from_slice(&[0x90, 0x00]);
    let out = FormatTranscoder::default().inbound(&bytes("80 30 00 01 00"), resp.clone());
    assert_eq!(out, resp);
    assert!(DataObjectInfo::from_record(&resp[..33]).is_err());
}

#[test]
fn delete_file_swaps_identifier() {
    let out = FormatTranscoder::default().outbound(&bytes("00 e4 00 00 02 10 01"));
    assert_eq!(out, bytes("00 e4 00 00 02 01 10"));
}

#[test]
fn unrelated_commands_pass_through() {
    let t = FormatTranscoder::default();
    let update = bytes("00 d6 00 00 02 01 02");
    assert_eq!(t.outbound(&update), update);
    let resp = bytes("01 02 03 04 90 00");
    assert_eq!(t.inbound(&bytes("00 b0 00 00 04"), resp.clone()), resp);
}

proptest! {
    // FCP -> record -> FCP keeps type, id and sizes numerically equal
    #[test]
    fn fcp_record_fcp(file_type in any::<[u8; 2]>(), id in any::<u16>(), size in any::<u16>(), complete in any::<u16>()) {
        let mut w = TlvWriter::new();
        w.push(0x81, &complete.to_be_bytes()).unwrap();
        w.push(0x80, &size.to_be_bytes()).unwrap();
        w.push(0x82, &file_type).unwrap();
        w.push(0x83, &id.to_be_bytes()).unwrap();
        let fcp = w.into_template(0x62).unwrap();

        let record = FileDescriptor::from_fcp(&fcp).unwrap().to_record();
        let rebuilt = FileDescriptor::from_record(&record).unwrap().to_fcp().unwrap();
        let body = TagReader::new(&rebuilt[2..]);
        prop_assert_eq!(body.find(0x82).unwrap(), &file_type[..]);
        prop_assert_eq!(body.find(0x83).unwrap(), &id.to_be_bytes()[..]);
        prop_assert_eq!(body.find(0x80).unwrap(), &size.to_be_bytes()[..]);
        prop_assert_eq!(body.find(0x81).unwrap(), &complete.to_be_bytes()[..]);
    }
}

#[test]
fn broken_trailing_entry_keeps_create_do_conversion() {
    // 0x99 claims 5 bytes, 1 follows; no size tag, so no extension
    let apdu = bytes("00 da 01 62 0c 83 02 02 01 85 03 00 01 0a 99 05 01");
    let out = FormatTranscoder::default().outbound(&apdu);
    assert_eq!(out[4], 0x20);
    let info = DataObjectInfo::from_record(&out[5..]).unwrap();
    assert_eq!(info.size, 0);
    assert_eq!(info.type_id, [0x02, 0x01]);
    assert_eq!(info.options, [0x00, 0x01, 0x0A]);
    assert_eq!(info.security, [0u8; 15]);
}

#[test]
fn broken_trailing_entry_keeps_create_file_conversion() {
    let apdu = bytes("00 e0 00 00 0d 62 0b 82 02 01 00 83 02 10 01 99 09 00");
    let out = FormatTranscoder::default().outbound(&apdu);
    assert_eq!(out[4], 32);
    let fd = FileDescriptor::from_record(&out[5..]).unwrap();
    assert_eq!(fd.file_type, [0x01, 0x00]);
    assert_eq!(fd.file_id, 0x1001);
    assert_eq!((fd.size, fd.complete_size), (0, 0));
}

#[test]
fn do_info_size_tag_needs_low_byte() {
    // size 0x0100: low byte zero, no extension
    let mut resp = vec![0u8; 32];
    resp[0..2].copy_from_slice(&[0x00, 0x01]);
    resp.extend_from_slice(&[0x90, 0x00]);
    let out = FormatTranscoder::default().inbound(&bytes("80 30 00 01 00"), resp);
    let iso = &out[..out.len() - 2];
    let r = TagReader::new(iso);
    assert!(r.find(0x80).is_err());
    assert_eq!(&iso[..2], &[0x83, 0x02]);
}
