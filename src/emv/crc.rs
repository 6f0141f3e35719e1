//! CRC-16/CCITT-FALSE checksum used as the merchant QR integrity suffix
//!
//! Parameters: polynomial `0x1021`, initial register `0xFFFF`, no input or
//! output reflection, no final XOR. This is the `CRC_16_IBM_3740` entry of the
//! `crc` catalogue and the checksum EMVCo merchant-presented QR codes carry in
//! tag `63`.

use crc::{CRC_16_IBM_3740, Crc};

const CCITT_FALSE: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);

/// Compute the CRC-16/CCITT-FALSE checksum of `text`'s UTF-8 bytes.
///
/// The empty string yields the untouched initial register, `0xFFFF`.
#[must_use]
pub fn crc16(text: &str) -> u16 {
    crc16_bytes(text.as_bytes())
}

/// Compute the checksum over raw bytes.
#[must_use]
pub fn crc16_bytes(bytes: &[u8]) -> u16 {
    CCITT_FALSE.checksum(bytes)
}

/// Format a checksum as 4 uppercase, zero-padded hex digits.
#[must_use]
pub fn format_crc(value: u16) -> String {
    format!("{value:04X}")
}

/// Checksum `text` and format it as the 4-digit suffix appended after `6304`.
#[must_use]
pub fn crc16_hex(text: &str) -> String {
    format_crc(crc16(text))
}
