// rutokens/src/reader/registry.rs

use crate::constants::MAX_READERS;
use crate::reader::handle::{Powered, Reader, Unpowered};
use crate::types::{Atr, IccPresence, ReaderHandle};
use crate::{Error, Result};

/// A registered session in either power state.
pub enum ReaderSlot {
    /// Registered, card not powered
    Unpowered(Reader<Unpowered>),
    /// Card powered
    Powered(Reader<Powered>),
}

impl ReaderSlot {
    /// True once powered
    pub fn is_powered(&self) -> bool {
        matches!(self, Self::Powered(_))
    }

    /// Card presence in this slot
    pub fn presence(&mut self) -> Result<IccPresence> {
        match self {
            Self::Unpowered(r) => r.presence(),
            Self::Powered(r) => r.presence(),
        }
    }

    fn into_unpowered(self) -> Reader<Unpowered> {
        match self {
            Self::Unpowered(r) => r,
            Self::Powered(r) => r.into_unpowered(),
        }
    }
}

/// Fixed-capacity arena of reader sessions addressed by opaque handles.
/// Each session owns its transport and protocol state; nothing is shared
/// between slots.
pub struct ReaderRegistry {
    slots: Vec<Option<ReaderSlot>>,
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderRegistry {
    /// Registry with all slots free
    pub fn new() -> Self {
        Self {
            slots: (0..MAX_READERS).map(|_| None).collect(),
        }
    }

    /// Register a session in the first free slot.
    pub fn insert(&mut self, reader: Reader<Unpowered>) -> Result<ReaderHandle> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(Error::ReaderLimitReached { max: MAX_READERS })?;
        self.slots[index] = Some(ReaderSlot::Unpowered(reader));
        let handle = ReaderHandle(index);
        log::debug!("registered {}", handle);
        Ok(handle)
    }

    /// Session behind `handle`
    pub fn get_mut(&mut self, handle: ReaderHandle) -> Result<&mut ReaderSlot> {
        self.slots
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownReader(handle))
    }

    /// Release `handle`, handing back its session.
    pub fn remove(&mut self, handle: ReaderHandle) -> Result<ReaderSlot> {
        let slot = self
            .slots
            .get_mut(handle.0)
            .and_then(Option::take)
            .ok_or(Error::UnknownReader(handle))?;
        log::debug!("released {}", handle);
        Ok(slot)
    }

    /// Registered sessions
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// No session registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Power (or power-cycle) the card in `handle`'s slot. On failure the
    /// session stays registered, unpowered.
    pub fn power_on(&mut self, handle: ReaderHandle) -> Result<Atr> {
        let mut reader = self.remove(handle)?.into_unpowered();
        let result = reader.reset_and_read_atr();
        self.slots[handle.0] = Some(match &result {
            Ok(atr) => ReaderSlot::Powered(reader.into_powered(atr.clone())),
            Err(_) => ReaderSlot::Unpowered(reader),
        });
        result
    }

    /// Cut power in `handle`'s slot. An unpowered slot is left as is.
    pub fn power_off(&mut self, handle: ReaderHandle) -> Result<()> {
        match self.remove(handle)? {
            ReaderSlot::Powered(mut reader) => {
                let result = reader.cut_power();
                self.slots[handle.0] = Some(if result.is_ok() {
                    ReaderSlot::Unpowered(reader.into_unpowered())
                } else {
                    ReaderSlot::Powered(reader)
                });
                result
            }
            slot @ ReaderSlot::Unpowered(_) => {
                self.slots[handle.0] = Some(slot);
                Ok(())
            }
        }
    }

    /// Exchange an APDU on a powered slot.
    pub fn exchange(&mut self, handle: ReaderHandle, apdu: &[u8]) -> Result<Vec<u8>> {
        match self.get_mut(handle)? {
            ReaderSlot::Powered(reader) => reader.exchange(apdu),
            ReaderSlot::Unpowered(_) => Err(Error::UnsupportedOperation(format!(
                "{} is not powered",
                handle
            ))),
        }
    }

    /// Card presence in `handle`'s slot
    pub fn presence(&mut self, handle: ReaderHandle) -> Result<IccPresence> {
        self.get_mut(handle)?.presence()
    }
}
