// Commonly used APDUs, records and TLV payloads

/// Decode a readable hex fixture; whitespace is allowed.
pub fn bytes(s: &str) -> Vec<u8> {
    let compact: String = s.split_whitespace().collect();
    hex::decode(compact).expect("valid hex fixture")
}

/// ATR reported by Rutoken S on power-on (19 bytes)
pub fn rutoken_atr() -> Vec<u8> {
    bytes("3b 6f 00 ff 00 56 72 75 54 6f 6b 6e 73 30 20 00 00 90 00")
}

/// SELECT FILE 3F00 (Case 3S)
pub fn select_mf() -> Vec<u8> {
    bytes("00 a4 00 00 02 3f 00")
}

/// FCP for a transparent EF 1001 of 0x20 bytes with a security attribute
pub fn create_file_fcp() -> Vec<u8> {
    bytes(
        "62 36
         80 02 00 20
         82 02 01 00
         83 02 10 01
         86 28 43 00 00 00 00 00 00 00 01 00 00 00 02 00 00 00
               03 00 00 00 04 00 00 00 05 00 00 00 06 00 00 00
               07 00 00 00 00 00 00 00",
    )
}

/// CREATE FILE carrying `create_file_fcp` (Case 3S)
pub fn create_file_apdu() -> Vec<u8> {
    let fcp = create_file_fcp();
    let mut apdu = vec![0x00, 0xE0, 0x00, 0x00, fcp.len() as u8];
    apdu.extend_from_slice(&fcp);
    apdu
}

/// Firmware record for the EF described by `create_file_fcp`
pub fn file_record() -> Vec<u8> {
    bytes(
        "00 00 20 00 01 00 01 10 00 00 00 00 00 00 00 00
         00 43 00 00 00 00 00 00 00 01 02 03 04 05 06 07",
    )
}

/// Data-object header with a 3-byte extension (size low byte = 3)
pub fn do_info_record() -> Vec<u8> {
    bytes(
        "03 00 02 05 00 01 0a 00 00 00 00 00 00 00 00 00
         00 11 11 11 11 11 11 11 11 22 22 22 22 22 22 22
         c1 c2 c3",
    )
}

/// ISO data-object info matching `do_info_record`
pub fn do_info_iso() -> Vec<u8> {
    bytes(
        "80 02 00 03
         83 02 02 05
         85 03 00 01 0a
         86 28 11 11 11 11 11 11 11 11 22 00 00 00 22 00 00 00
               22 00 00 00 22 00 00 00 22 00 00 00 22 00 00 00
               22 00 00 00 00 00 00 00
         a5 03 c1 c2 c3",
    )
}
