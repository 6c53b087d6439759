#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{bytes, rutoken_atr};
use rutokens::constants::MAX_READERS;
use rutokens::reader::{Reader, ReaderConfig, ReaderRegistry, Unpowered};
use rutokens::transport::MockTransport;
use rutokens::types::{IccPresence, SlotStatus};
use rutokens::Error;

fn reader(mock: MockTransport) -> Reader<Unpowered> {
    Reader::new_with_transport(Box::new(mock), ReaderConfig::default())
}

fn card() -> MockTransport {
    let mut mock = MockTransport::with_atr(&rutoken_atr());
    mock.push_status(SlotStatus::Idle);
    mock
}

#[test]
fn capacity_is_bounded() {
    let mut registry = ReaderRegistry::new();
    let handles: Vec<_> = (0..MAX_READERS)
        .map(|_| registry.insert(reader(MockTransport::new())).unwrap())
        .collect();
    assert_eq!(registry.len(), MAX_READERS);
    assert!(matches!(
        registry.insert(reader(MockTransport::new())),
        Err(Error::ReaderLimitReached { max }) if max == MAX_READERS
    ));

    // a released slot is reused
    registry.remove(handles[3]).unwrap();
    let again = registry.insert(reader(MockTransport::new())).unwrap();
    assert_eq!(again, handles[3]);
}

#[test]
fn released_handle_is_unknown() {
    let mut registry = ReaderRegistry::new();
    let h = registry.insert(reader(MockTransport::new())).unwrap();
    registry.remove(h).unwrap();
    assert!(registry.is_empty());
    assert!(matches!(registry.presence(h), Err(Error::UnknownReader(x)) if x == h));
    assert!(matches!(registry.remove(h), Err(Error::UnknownReader(_))));
}

#[test]
fn exchange_requires_power() {
    let mut registry = ReaderRegistry::new();
    let h = registry.insert(reader(card())).unwrap();
    assert!(matches!(
        registry.exchange(h, &bytes("00 84 00 00 08")),
        Err(Error::UnsupportedOperation(_))
    ));
}

#[test]
fn power_cycle_and_exchange() {
    common::init_logging();
    let mut mock = card();
    common::script_data(&mut mock, &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
    common::script_status_word(&mut mock, [0x90, 0x00]);
    let mut registry = ReaderRegistry::new();
    let h = registry.insert(reader(mock)).unwrap();

    let atr = registry.power_on(h).unwrap();
    assert_eq!(atr.as_bytes(), &rutoken_atr()[..]);
    assert!(registry.get_mut(h).unwrap().is_powered());

    let resp = registry.exchange(h, &bytes("00 84 00 00 08")).unwrap();
    assert_eq!(resp, bytes("11 22 33 44 55 66 77 88 90 00"));

    registry.power_off(h).unwrap();
    assert!(!registry.get_mut(h).unwrap().is_powered());
    // powering off twice is harmless
    registry.power_off(h).unwrap();
}

#[test]
fn failed_power_on_keeps_session() {
    let mut registry = ReaderRegistry::new();
    let h = registry.insert(reader(MockTransport::new())).unwrap();
    assert!(matches!(registry.power_on(h), Err(Error::DeviceMute)));
    assert_eq!(registry.len(), 1);
    assert!(!registry.get_mut(h).unwrap().is_powered());
    assert_eq!(registry.presence(h).unwrap(), IccPresence::Absent);
}

#[test]
fn sessions_are_independent() {
    let mut first = card();
    common::script_no_data(&mut first);
    common::script_status_word(&mut first, [0x6A, 0x82]);
    let mut second = card();
    common::script_no_data(&mut second);
    common::script_status_word(&mut second, [0x90, 0x00]);

    let mut registry = ReaderRegistry::new();
    let a = registry.insert(reader(first)).unwrap();
    let b = registry.insert(reader(second)).unwrap();
    assert_ne!(a, b);
    registry.power_on(a).unwrap();
    registry.power_on(b).unwrap();

    let apdu = bytes("00 b0 00 00 04");
    assert_eq!(registry.exchange(b, &apdu).unwrap(), vec![0x90, 0x00]);
    assert_eq!(registry.exchange(a, &apdu).unwrap(), vec![0x6A, 0x82]);
}
