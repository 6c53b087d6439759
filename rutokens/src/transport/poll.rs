// rutokens/src/transport/poll.rs

//! Busy-wait on the slot status byte.
//!
//! While the card works on a command the reader reports `0x4N`, where the
//! low nibble is a counter advanced once per tick. Polling goes on as long
//! as that counter keeps moving; a stalled counter ends one round, and the
//! wait gives up after a fixed number of rounds.

use std::time::Duration;

use crate::constants::{BUSY_POLL_INTERVAL_MS, BUSY_POLL_ROUNDS, ICC_STATUS_BUSY_COMMON};
use crate::utils::ms;
use crate::{Error, Result};

fn is_busy(raw: u8) -> bool {
    raw & 0xF0 == ICC_STATUS_BUSY_COMMON
}

fn counter_advanced(prev: u8, current: u8) -> bool {
    ((prev & 0x0F) + 1) & 0x0F == current & 0x0F
}

/// Polling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyPoll {
    /// Sleep before each poll
    pub interval: Duration,
    /// Stalled rounds tolerated
    pub rounds: usize,
}

impl Default for BusyPoll {
    fn default() -> Self {
        Self {
            interval: ms(BUSY_POLL_INTERVAL_MS),
            rounds: BUSY_POLL_ROUNDS,
        }
    }
}

impl BusyPoll {
    /// Starting from `first`, call `poll` until the status is no longer busy
    /// and return that status. `sleep` runs before every poll.
    pub fn wait<P, S>(&self, first: u8, mut poll: P, mut sleep: S) -> Result<u8>
    where
        P: FnMut() -> Result<u8>,
        S: FnMut(Duration),
    {
        if !is_busy(first) {
            return Ok(first);
        }
        log::debug!("card busy: {:#04x}", first);

        let mut status = first;
        for round in 0..self.rounds {
            loop {
                sleep(self.interval);
                let prev = status;
                status = poll()?;
                if !is_busy(status) {
                    return Ok(status);
                }
                if !counter_advanced(prev, status) {
                    log::warn!(
                        "busy counter stalled at {:#04x} (round {})",
                        status,
                        round + 1
                    );
                    break;
                }
            }
        }
        Err(Error::Timeout)
    }
}
