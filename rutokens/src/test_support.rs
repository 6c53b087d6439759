//! Test support helpers intended for use by unit and integration tests.
//!
//! These centralize MockTransport scripting so tests across the crate and
//! the tests/ directory describe card behaviour the same way.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::reader::{Powered, Reader, ReaderBuilder, ReaderConfig};
use crate::transport::{MockTransport, Transport};
use crate::types::SlotStatus;
use crate::Result;

/// Card accepts the data block the engine is about to send.
#[doc(hidden)]
pub fn script_data_phase(mock: &mut MockTransport) {
    mock.push_status(SlotStatus::DataReady);
}

/// Card hands over `data` in a Case 2S data phase.
#[doc(hidden)]
pub fn script_data(mock: &mut MockTransport, data: &[u8]) {
    mock.push_status(SlotStatus::DataReady);
    mock.push_response(data.to_vec());
}

/// Card has no data and goes straight to the status word.
#[doc(hidden)]
pub fn script_no_data(mock: &mut MockTransport) {
    mock.push_status(SlotStatus::StatusReady);
}

/// Card reports `sw`.
#[doc(hidden)]
pub fn script_status_word(mock: &mut MockTransport, sw: [u8; 2]) {
    mock.push_status(SlotStatus::StatusReady);
    mock.push_response(sw.to_vec());
}

/// Transport wrapper that delegates into a shared MockTransport so tests
/// can inspect sent blocks after a Reader took ownership of the transport.
#[doc(hidden)]
pub struct SharedTransport {
    inner: Rc<RefCell<MockTransport>>,
}

impl SharedTransport {
    /// Delegate to `inner`.
    pub fn new(inner: Rc<RefCell<MockTransport>>) -> Self {
        Self { inner }
    }
}

impl Transport for SharedTransport {
    fn transmit(&mut self, data: &[u8]) -> Result<()> {
        self.inner.borrow_mut().transmit(data)
    }
    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>> {
        self.inner.borrow_mut().receive(max_len)
    }
    fn status(&mut self) -> Result<SlotStatus> {
        self.inner.borrow_mut().status()
    }
    fn power_on(&mut self) -> Result<Vec<u8>> {
        self.inner.borrow_mut().power_on()
    }
    fn power_off(&mut self) -> Result<()> {
        self.inner.borrow_mut().power_off()
    }
    fn set_read_timeout(&mut self, timeout_ms: u64) {
        self.inner.borrow_mut().set_read_timeout(timeout_ms)
    }
}

/// Box a MockTransport for a Reader while keeping a handle for assertions.
#[doc(hidden)]
pub fn shared_mock(mock: MockTransport) -> (Rc<RefCell<MockTransport>>, Box<dyn Transport>) {
    let inner = Rc::new(RefCell::new(mock));
    let boxed: Box<dyn Transport> = Box::new(SharedTransport::new(inner.clone()));
    (inner, boxed)
}

/// Convenience: a powered Reader over `mock`. The power-on sequence
/// (power off, status, ATR) is scripted here; `mock` must carry an ATR and
/// may already hold the exchange script.
#[doc(hidden)]
pub fn powered_mock_reader(
    mut mock: MockTransport,
    config: ReaderConfig,
) -> Result<(Rc<RefCell<MockTransport>>, Reader<Powered>)> {
    mock.statuses.push_front(SlotStatus::Idle);
    let (inner, boxed) = shared_mock(mock);
    let (reader, _atr) = ReaderBuilder::new()
        .with_transport(boxed)
        .with_config(config)
        .build()?
        .power_on()?;
    // the exchange script should start with an empty log
    inner.borrow_mut().sent.clear();
    Ok((inner, reader))
}
