#![cfg(feature = "usb")]

#[path = "common.rs"]
mod common;

use serial_test::serial;

// These tests need a Rutoken S plugged in. They are `#[ignore]`d so CI
// skips them, and serialized because they share the one token. Run with:
//
// cargo test -p rutokens --test hardware --features usb -- --ignored

#[test]
#[ignore]
#[serial]
fn power_on_reads_atr() -> anyhow::Result<()> {
    if let Some((reader, atr)) = common::open_and_power_on()? {
        assert_eq!(atr.as_bytes()[0], 0x3B);
        reader.power_off()?;
    }
    Ok(())
}

#[test]
#[ignore]
#[serial]
fn select_master_file() -> anyhow::Result<()> {
    let Some((mut reader, _)) = common::open_and_power_on()? else {
        return Ok(());
    };
    let resp = reader.exchange(&[0x00, 0xA4, 0x00, 0x00, 0x02, 0x3F, 0x00])?;
    // FCP template followed by 9000
    assert_eq!(resp[0], 0x62);
    assert_eq!(&resp[resp.len() - 2..], &[0x90, 0x00]);
    reader.power_off()?;
    Ok(())
}

#[test]
#[ignore]
#[serial]
fn read_serial_number() -> anyhow::Result<()> {
    let Some((mut reader, _)) = common::open_and_power_on()? else {
        return Ok(());
    };
    let resp = reader.exchange(&[0x00, 0xCA, 0x01, 0x81, 0x04])?;
    assert_eq!(resp.len(), 4 + 2);
    reader.power_off()?;
    Ok(())
}
