// rutokens/src/reader/handle.rs

use std::marker::PhantomData;

use crate::reader::config::ReaderConfig;
use crate::tpdu::TpduEngine;
use crate::transport::Transport;
use crate::types::{Atr, IccPresence};
use crate::utils::bytes_to_hex_spaced;
use crate::Result;

/// Type-state markers
#[derive(Debug)]
pub struct Unpowered;
/// Card powered, exchanges allowed
#[derive(Debug)]
pub struct Powered;

/// One reader slot. APDUs can only be exchanged once the card is powered,
/// which is enforced at compile time.
pub struct Reader<State = Unpowered> {
    transport: Box<dyn Transport>,
    config: ReaderConfig,
    atr: Option<Atr>,
    _state: PhantomData<State>,
}

impl<State> Reader<State> {
    /// Settings this reader was built with
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Card presence: a mute slot means no card, anything else a card that
    /// answers.
    pub fn presence(&mut self) -> Result<IccPresence> {
        let status = self.transport.status()?;
        Ok(IccPresence::from(status))
    }

    fn into_state<Next>(self, atr: Option<Atr>) -> Reader<Next> {
        Reader {
            transport: self.transport,
            config: self.config,
            atr,
            _state: PhantomData,
        }
    }
}

impl Reader<Unpowered> {
    /// Wrap an existing transport (e.g. MockTransport in tests).
    pub fn new_with_transport(mut transport: Box<dyn Transport>, config: ReaderConfig) -> Self {
        transport.set_read_timeout(config.read_timeout_ms);
        Self {
            transport,
            config,
            atr: None,
            _state: PhantomData,
        }
    }

    /// Power the card and read its ATR. The slot is powered off first so
    /// the card's state machine starts from reset.
    pub fn power_on(mut self) -> Result<(Reader<Powered>, Atr)> {
        let atr = self.reset_and_read_atr()?;
        Ok((self.into_powered(atr.clone()), atr))
    }

    /// I/O half of `power_on`; leaves `self` usable when it fails.
    pub(crate) fn reset_and_read_atr(&mut self) -> Result<Atr> {
        self.transport.power_off()?;
        let status = self.transport.status()?;
        log::debug!("slot status before power on: {:?}", status);
        let raw = self.transport.power_on()?;
        let atr = Atr::try_from(raw.as_slice())?;
        log::debug!("atr: {}", bytes_to_hex_spaced(atr.as_bytes()));
        Ok(atr)
    }

    pub(crate) fn into_powered(self, atr: Atr) -> Reader<Powered> {
        self.into_state(Some(atr))
    }
}

impl Reader<Powered> {
    /// Send one command APDU; returns response data followed by SW1 SW2.
    pub fn exchange(&mut self, apdu: &[u8]) -> Result<Vec<u8>> {
        let mut engine = TpduEngine::new(&mut *self.transport)
            .with_max_continuations(self.config.max_continuations);
        if let Some(transcoder) = self.config.transcoder() {
            engine = engine.with_transcoder(transcoder);
        }
        engine.exchange(apdu)
    }

    /// ATR read at power-on
    pub fn atr(&self) -> Option<&Atr> {
        self.atr.as_ref()
    }

    /// Cut card power and return the unpowered session.
    pub fn power_off(mut self) -> Result<Reader<Unpowered>> {
        self.cut_power()?;
        Ok(self.into_unpowered())
    }

    pub(crate) fn cut_power(&mut self) -> Result<()> {
        log::debug!("powering off");
        self.transport.power_off()
    }

    /// State change without I/O, for callers that power-cycle anyway
    pub(crate) fn into_unpowered(self) -> Reader<Unpowered> {
        self.into_state(None)
    }
}
