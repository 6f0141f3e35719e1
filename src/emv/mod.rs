//! EMVCo-style merchant QR building blocks
//!
//! - [`tlv`]: tag-length-value segments and stream parsing
//! - [`crc`]: CRC-16/CCITT-FALSE checksum for the `63` segment
//! - [`merchant`]: bKash / Nagad layout constants and payload inspection

pub mod crc;
pub mod merchant;
pub mod tlv;

pub use crc::{crc16, crc16_hex};
pub use merchant::{MerchantPayload, MerchantProvider};
pub use tlv::Segment;
