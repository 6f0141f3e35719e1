//! Error types for qrwiz operations
//!
//! Payload encoding itself never fails: missing required fields produce an
//! empty payload. These errors cover the surrounding operations (rendering,
//! scanning, inspection, configuration, request parsing).

use thiserror::Error;

/// Result type alias using qrwiz's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrwiz operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code rendering failed (e.g. payload too long for any QR version)
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// The payload was empty, so there is nothing to render
    #[error("Payload is empty; required fields are missing")]
    EmptyPayload,

    /// Malformed tag-length-value stream
    #[error("Invalid TLV data: {0}")]
    Tlv(String),

    /// A content request could not be built from the supplied input
    #[error("Invalid content request: {0}")]
    InvalidRequest(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidRequest(format!("JSON error: {}", e))
    }
}
