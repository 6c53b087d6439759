// rutokens/src/transport/traits.rs

use crate::types::SlotStatus;
use crate::{Error, Result};

/// Character-level reader transport consumed by the TPDU engine.
///
/// Every call blocks until the reader answers. Waiting out a busy card is
/// the transport's job: `status` never returns `SlotStatus::Busy` unless the
/// implementation gave up polling, in which case it should fail instead.
pub trait Transport {
    /// Send a header or data block to the card
    fn transmit(&mut self, data: &[u8]) -> Result<()>;

    /// Read up to `max_len` bytes from the card
    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>>;

    /// Query the slot status byte
    fn status(&mut self) -> Result<SlotStatus>;

    /// Power the card on and return its ATR. Transports without slot power
    /// control report `UnsupportedOperation`.
    fn power_on(&mut self) -> Result<Vec<u8>> {
        Err(Error::UnsupportedOperation("power_on".into()))
    }

    /// Cut card power.
    fn power_off(&mut self) -> Result<()> {
        Err(Error::UnsupportedOperation("power_off".into()))
    }

    /// Deadline applied to each read. Transports without a notion of
    /// timeout ignore it.
    fn set_read_timeout(&mut self, _timeout_ms: u64) {}
}
