#[path = "../common/mod.rs"]
mod common;

use rutokens::tpdu::TpduEngine;
use rutokens::transport::MockTransport;
use rutokens::types::SlotStatus;
use rutokens::Error;

#[test]
fn transmit_failure_and_recovery() {
    let mut m = MockTransport::new();
    m.set_transmit_failures(1);
    common::script_status_word(&mut m, [0x90, 0x00]);

    // first exchange fails on the header, nothing is consumed
    let err = TpduEngine::new(&mut m)
        .transceive(&[0x00, 0x44, 0x00, 0x00])
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_communication());
    assert!(m.sent.is_empty());

    let resp = TpduEngine::new(&mut m)
        .transceive(&[0x00, 0x44, 0x00, 0x00])
        .unwrap();
    assert_eq!(resp, vec![0x90, 0x00]);
}

#[test]
fn card_removed_mid_exchange() {
    let mut m = MockTransport::new();
    common::script_data_phase(&mut m);
    // no status word scripted: the slot reads as mute
    let err = TpduEngine::new(&mut m)
        .transceive(&[0x00, 0xD6, 0x00, 0x00, 0x01, 0xAA])
        .unwrap_err();
    assert!(matches!(err, Error::DeviceMute));
    assert_eq!(m.sent.len(), 2);
}

#[test]
fn unexpected_slot_status_is_protocol_violation() {
    let mut m = MockTransport::new();
    m.push_status(SlotStatus::Unknown(0x33));
    let err = TpduEngine::new(&mut m)
        .transceive(&[0x00, 0x44, 0x00, 0x00])
        .unwrap_err();
    assert!(matches!(err, Error::ProtocolViolation(_)));
}

#[test]
fn truncated_status_word() {
    let mut m = MockTransport::new();
    m.push_status(SlotStatus::StatusReady);
    m.push_response(vec![0x90]);
    let err = TpduEngine::new(&mut m)
        .transceive(&[0x00, 0x44, 0x00, 0x00])
        .unwrap_err();
    assert!(matches!(err, Error::ProtocolViolation(_)));
}

#[test]
fn receive_timeout_propagates() {
    let mut m = MockTransport::new();
    m.push_status(SlotStatus::DataReady);
    let err = TpduEngine::new(&mut m)
        .transceive(&[0x00, 0xB0, 0x00, 0x00, 0x04])
        .unwrap_err();
    assert!(matches!(err, Error::Timeout));
}
