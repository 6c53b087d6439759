// rutokens/src/transport/mock.rs

use std::collections::VecDeque;

use crate::transport::traits::Transport;
use crate::types::SlotStatus;
use crate::{Error, Result};

/// Mock transport for unit tests. It records transmitted blocks and replays
/// queued status bytes and receive payloads in order.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every transmitted block, in order
    pub sent: Vec<Vec<u8>>,
    /// Payloads handed out by `receive`
    pub responses: VecDeque<Vec<u8>>,
    /// Values handed out by `status`; `Mute` once empty
    pub statuses: VecDeque<SlotStatus>,
    /// `max_len` of every receive call
    pub receive_requests: Vec<usize>,
    /// ATR returned by `power_on`; `None` behaves like a missing card
    pub atr: Option<Vec<u8>>,
    /// Current power state
    pub powered: bool,
    /// Successful `power_on` calls
    pub power_cycles: usize,
    /// Last value passed to `set_read_timeout`
    pub read_timeout_ms: Option<u64>,
    /// Testing hook: number of subsequent transmit calls that fail
    pub transmit_failures: usize,
}

impl MockTransport {
    /// Empty script, no card
    pub fn new() -> Self {
        Self::default()
    }

    /// Card that answers `power_on` with `atr`
    pub fn with_atr(atr: &[u8]) -> Self {
        Self {
            atr: Some(atr.to_vec()),
            ..Self::default()
        }
    }

    /// Queue a `receive` payload.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(resp);
    }

    /// Queue a `status` value.
    pub fn push_status(&mut self, status: SlotStatus) {
        self.statuses.push_back(status);
    }

    /// Set how many subsequent transmit calls should fail (for tests).
    pub fn set_transmit_failures(&mut self, n: usize) {
        self.transmit_failures = n;
    }

    /// Remove and return the last transmitted block
    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }

    /// True once every scripted status and response was consumed
    pub fn is_drained(&self) -> bool {
        self.responses.is_empty() && self.statuses.is_empty()
    }
}

impl Transport for MockTransport {
    fn transmit(&mut self, data: &[u8]) -> Result<()> {
        if self.transmit_failures > 0 {
            self.transmit_failures -= 1;
            return Err(Error::Transport("scripted transmit failure".into()));
        }
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>> {
        self.receive_requests.push(max_len);
        let mut resp = self.responses.pop_front().ok_or(Error::Timeout)?;
        resp.truncate(max_len);
        Ok(resp)
    }

    fn status(&mut self) -> Result<SlotStatus> {
        // An unscripted status query looks like a card that went away
        Ok(self.statuses.pop_front().unwrap_or(SlotStatus::Mute))
    }

    fn power_on(&mut self) -> Result<Vec<u8>> {
        let atr = self.atr.clone().ok_or(Error::DeviceMute)?;
        self.powered = true;
        self.power_cycles += 1;
        Ok(atr)
    }

    fn power_off(&mut self) -> Result<()> {
        self.powered = false;
        Ok(())
    }

    fn set_read_timeout(&mut self, timeout_ms: u64) {
        self.read_timeout_ms = Some(timeout_ms);
    }
}
