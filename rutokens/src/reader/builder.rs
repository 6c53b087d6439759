// rutokens/src/reader/builder.rs

use crate::reader::config::ReaderConfig;
use crate::reader::handle::{Reader, Unpowered};
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a Reader with optional configuration.
#[derive(Default)]
pub struct ReaderBuilder {
    transport: Option<Box<dyn Transport>>,
    config: ReaderConfig,
}

impl ReaderBuilder {
    /// Builder with default configuration and no transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// See `ReaderConfig::response_capacity`
    pub fn response_capacity(mut self, capacity: usize) -> Self {
        self.config.response_capacity = capacity;
        self
    }

    /// See `ReaderConfig::max_continuations`
    pub fn max_continuations(mut self, limit: usize) -> Self {
        self.config.max_continuations = limit;
        self
    }

    /// See `ReaderConfig::transcode`
    pub fn transcode(mut self, enabled: bool) -> Self {
        self.config.transcode = enabled;
        self
    }

    /// See `ReaderConfig::read_timeout_ms`
    pub fn read_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.read_timeout_ms = timeout_ms;
        self
    }

    /// Consume the builder and return an unpowered Reader.
    /// Requires a transport to be provided; otherwise returns DeviceNotFound.
    pub fn build(self) -> Result<Reader<Unpowered>> {
        self.config.validate()?;
        match self.transport {
            Some(t) => Ok(Reader::new_with_transport(t, self.config)),
            None => Err(Error::DeviceNotFound),
        }
    }

    /// Open the first Rutoken S on the USB bus and build a Reader over it.
    #[cfg(feature = "usb")]
    pub fn open_usb(self) -> Result<Reader<Unpowered>> {
        let transport = crate::transport::UsbTransport::open()?;
        self.with_transport(Box::new(transport)).build()
    }
}
