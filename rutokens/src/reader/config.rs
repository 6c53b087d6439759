// rutokens/src/reader/config.rs

use crate::constants::{DEFAULT_MAX_CONTINUATIONS, MAX_RESPONSE_LEN, SW_LEN};
use crate::protocol::transcode::FormatTranscoder;
use crate::utils::DEFAULT_READ_TIMEOUT_MS;
use crate::{Error, Result};

/// Per-reader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
/// Per-reader settings.
pub struct ReaderConfig {
    /// Size of the caller's response buffer, status word included. A
    /// rebuilt ISO response larger than this is returned unconverted.
    pub response_capacity: usize,
    /// Follow-up rounds (Le correction, GET RESPONSE) allowed per exchange
    pub max_continuations: usize,
    /// Convert payloads between ISO and proprietary layouts
    pub transcode: bool,
    /// Read deadline handed to the transport
    pub read_timeout_ms: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            response_capacity: MAX_RESPONSE_LEN,
            max_continuations: DEFAULT_MAX_CONTINUATIONS,
            transcode: true,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl ReaderConfig {
    /// Reject a response capacity too small for a status word.
    pub fn validate(&self) -> Result<()> {
        if self.response_capacity < SW_LEN {
            return Err(Error::InvalidLength {
                expected: SW_LEN,
                actual: self.response_capacity,
            });
        }
        Ok(())
    }

    /// Transcoder for this reader, `None` when disabled
    pub fn transcoder(&self) -> Option<FormatTranscoder> {
        self.transcode
            .then(|| FormatTranscoder::new(self.response_capacity))
    }
}
