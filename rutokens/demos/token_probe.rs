//! Power a Rutoken S, print its ATR and the answers to a few read-only
//! commands.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p rutokens --example token_probe --features usb

use anyhow::Context;
use rutokens::prelude::*;

const PROBES: &[(&str, &[u8])] = &[
    ("select MF", &[0x00, 0xA4, 0x00, 0x00, 0x02, 0x3F, 0x00]),
    ("serial number", &[0x00, 0xCA, 0x01, 0x81, 0x04]),
    ("free memory", &[0x00, 0xCA, 0x01, 0x8A, 0x04]),
];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut reader = ReaderBuilder::new()
        .open_usb()
        .context("opening Rutoken S")?;
    println!("presence: {:?}", reader.presence()?);

    let (mut reader, atr) = reader.power_on().context("powering the card")?;
    println!("ATR: {}", atr.to_hex());

    for (name, apdu) in PROBES {
        match reader.exchange(apdu) {
            Ok(resp) => println!("{}: {}", name, bytes_to_hex_spaced(&resp)),
            Err(e) => println!("{}: failed: {}", name, e),
        }
    }

    reader.power_off()?;
    Ok(())
}
