// rutokens/src/transport/usb/mod.rs

#![cfg(feature = "usb")]

use std::time::Duration;

use crate::constants::{
    RUTOKEN_ATR_LEN, USB_ICC_DATA_BLOCK, USB_ICC_GET_STATUS, USB_ICC_POWER_OFF, USB_ICC_POWER_ON,
    USB_ICC_XFR_BLOCK, USB_REQUEST_IN, USB_REQUEST_OUT,
};
use crate::transport::poll::BusyPoll;
use crate::transport::traits::Transport;
use crate::types::SlotStatus;
use crate::utils::{DEFAULT_READ_TIMEOUT_MS, bytes_to_hex_spaced, ms};
use crate::{Error, Result};

use rusb::{Context, DeviceHandle, UsbContext};

mod descriptor;
use descriptor::{find_interface, is_rutoken};

/// Rutoken S reader driven through vendor control transfers on endpoint 0.
///
/// Every transmit and receive is followed by a status poll so the card has
/// finished with the block before the next step starts.
pub struct UsbTransport {
    handle: DeviceHandle<Context>,
    interface: u8,
    timeout_ms: u64,
    busy: BusyPoll,
}

impl UsbTransport {
    /// Open the first Rutoken S found on the bus.
    pub fn open() -> Result<Self> {
        let ctx = Context::new()?;
        for device in ctx.devices()?.iter() {
            let dd = device.device_descriptor()?;
            if !is_rutoken(&dd) {
                continue;
            }
            let interface = find_interface(&device).unwrap_or(0);
            let mut handle = device.open()?;

            if let Ok(true) = handle.kernel_driver_active(interface) {
                // claim_interface reports the hard failure if this does not help
                let _ = handle.detach_kernel_driver(interface);
            }
            handle.claim_interface(interface)?;

            log::debug!(
                "opened rutoken on bus {} addr {} (interface {})",
                device.bus_number(),
                device.address(),
                interface
            );
            return Ok(UsbTransport {
                handle,
                interface,
                timeout_ms: DEFAULT_READ_TIMEOUT_MS,
                busy: BusyPoll::default(),
            });
        }

        Err(Error::DeviceNotFound)
    }

    fn timeout(&self) -> Duration {
        ms(self.timeout_ms)
    }

    fn control_out(&mut self, request: u8, data: &[u8]) -> Result<()> {
        log::trace!("ctrl out {:#04x}: {}", request, bytes_to_hex_spaced(data));
        self.handle.write_control(
            USB_REQUEST_OUT,
            request,
            0,
            self.interface as u16,
            data,
            self.timeout(),
        )?;
        Ok(())
    }

    fn control_in(&mut self, request: u8, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let n = self.handle.read_control(
            USB_REQUEST_IN,
            request,
            0,
            self.interface as u16,
            &mut buf,
            self.timeout(),
        )?;
        buf.truncate(n);
        log::trace!("ctrl in {:#04x}: {}", request, bytes_to_hex_spaced(&buf));
        Ok(buf)
    }

    fn raw_status(&mut self) -> Result<u8> {
        let buf = self.control_in(USB_ICC_GET_STATUS, 1)?;
        buf.first()
            .copied()
            .ok_or_else(|| Error::Transport("empty GET_STATUS reply".into()))
    }

    /// GET_STATUS, waiting out a busy card
    fn settled_status(&mut self) -> Result<u8> {
        let first = self.raw_status()?;
        let busy = self.busy;
        busy.wait(first, || self.raw_status(), std::thread::sleep)
    }
}

impl Transport for UsbTransport {
    fn transmit(&mut self, data: &[u8]) -> Result<()> {
        self.control_out(USB_ICC_XFR_BLOCK, data)?;
        self.settled_status()?;
        Ok(())
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>> {
        let data = self.control_in(USB_ICC_DATA_BLOCK, max_len)?;
        self.settled_status()?;
        Ok(data)
    }

    fn status(&mut self) -> Result<SlotStatus> {
        self.settled_status().map(SlotStatus::from_raw)
    }

    fn power_on(&mut self) -> Result<Vec<u8>> {
        self.control_in(USB_ICC_POWER_ON, RUTOKEN_ATR_LEN)
    }

    fn power_off(&mut self) -> Result<()> {
        self.control_out(USB_ICC_POWER_OFF, &[])
    }

    fn set_read_timeout(&mut self, timeout_ms: u64) {
        self.timeout_ms = timeout_ms;
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        let _ = self.handle.release_interface(self.interface);
    }
}
