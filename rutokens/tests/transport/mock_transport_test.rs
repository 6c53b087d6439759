#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use rutokens::transport::{BusyPoll, MockTransport, Transport};
use rutokens::types::SlotStatus;
use rutokens::Error;

#[test]
fn mock_transport_transmit_and_receive() {
    let mut m = MockTransport::new();
    m.push_response(vec![0x01, 0x02, 0x03]);
    m.transmit(&[0x00, 0xB0, 0x00, 0x00, 0x02]).unwrap();
    assert_eq!(m.sent.len(), 1);

    // payload longer than requested is cut
    let r = m.receive(2).unwrap();
    assert_eq!(r, vec![0x01, 0x02]);
    assert_eq!(m.receive_requests, vec![2]);
    assert_eq!(m.pop_sent(), Some(vec![0x00, 0xB0, 0x00, 0x00, 0x02]));
}

#[test]
fn mock_transport_runs_dry() {
    let mut m = MockTransport::new();
    assert!(matches!(m.receive(2), Err(Error::Timeout)));
    assert_eq!(m.status().unwrap(), SlotStatus::Mute);
    assert!(m.is_drained());
}

#[test]
fn mock_transport_status_order() {
    let mut m = MockTransport::new();
    common::script_data(&mut m, &[0xAA]);
    common::script_status_word(&mut m, [0x90, 0x00]);
    assert!(!m.is_drained());
    assert_eq!(m.status().unwrap(), SlotStatus::DataReady);
    assert_eq!(m.receive(1).unwrap(), vec![0xAA]);
    assert_eq!(m.status().unwrap(), SlotStatus::StatusReady);
    assert_eq!(m.receive(2).unwrap(), vec![0x90, 0x00]);
    assert!(m.is_drained());
}

#[test]
fn mock_transport_power() {
    let mut m = MockTransport::with_atr(&[0x3B, 0x6F]);
    assert_eq!(m.power_on().unwrap(), vec![0x3B, 0x6F]);
    assert!(m.powered);
    m.power_off().unwrap();
    assert!(!m.powered);
    m.set_read_timeout(250);
    assert_eq!(m.read_timeout_ms, Some(250));
}

#[test]
fn busy_poll_over_scripted_statuses() {
    let mut m = MockTransport::new();
    for s in [SlotStatus::Busy(2), SlotStatus::Busy(3), SlotStatus::StatusReady] {
        m.push_status(s);
    }
    let poll = BusyPoll {
        interval: Duration::ZERO,
        rounds: 1,
    };
    let raw = poll
        .wait(SlotStatus::Busy(1).to_raw(), || m.status().map(|s| s.to_raw()), |_| {})
        .unwrap();
    assert_eq!(SlotStatus::from_raw(raw), SlotStatus::StatusReady);
}
