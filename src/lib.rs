//! qrwiz - structured QR payload builder
//!
//! Turns typed form input (WiFi credentials, contact cards, payment links,
//! bKash/Nagad merchant requests, ...) into the exact text a QR code or barcode
//! should carry, and optionally renders that text as an image.
//!
//! # Features
//!
//! - **Payload encoding**: one sub-encoder per content kind behind a closed enum
//! - **Merchant QR**: EMVCo-style TLV assembly with CRC-16/CCITT-FALSE suffix
//! - **Inspection**: reparse merchant payloads and verify their checksum
//! - **Rendering**: PNG, JPEG and SVG export with colour and ECC options
//!
//! # Example
//!
//! ```
//! use qrwiz::payload::{ContentRequest, MerchantRequest, WifiRequest};
//! use qrwiz::emv::crc16_hex;
//!
//! let wifi = ContentRequest::Wifi(WifiRequest {
//!     ssid: "HomeNet".to_string(),
//!     password: "secret1".to_string(),
//!     ..WifiRequest::default()
//! });
//! assert_eq!(
//!     qrwiz::encode(&wifi).as_str(),
//!     "WIFI:S:HomeNet;T:WPA;P:secret1;H:false;"
//! );
//!
//! let bkash = ContentRequest::Bkash(MerchantRequest {
//!     number: "01712345678".to_string(),
//!     amount: Some(100.0),
//!     reference: String::new(),
//! });
//! let payload = qrwiz::encode(&bkash);
//! let (body, crc) = payload.as_str().split_at(payload.len() - 4);
//! assert_eq!(crc16_hex(body), crc);
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod emv;
pub mod error;
pub mod logging;
pub mod output;
pub mod payload;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{EncoderOptions, LogRotation, LoggingOptions, QrwizConfig, RenderOptions};
pub use emv::{MerchantPayload, MerchantProvider, crc16};
pub use payload::{ContentKind, ContentRequest, EncodedPayload, PayloadEncoder, encode};
pub use qr::{ExportFormat, QrDecoder, QrRenderer, RenderConfig, ScannedCode};
