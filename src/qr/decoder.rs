//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::ScannedCode;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// QR code decoder
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Open an image file and decode the first QR code in it
    pub fn decode_file(&self, path: &Path) -> Result<ScannedCode> {
        let img = image::open(path)?;
        self.decode(&img)
    }

    /// Decode a QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<ScannedCode> {
        let gray = img.to_luma8();

        self.decode_gray(gray)
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: GrayImage) -> Result<ScannedCode> {
        let mut prepared = rqrr::PreparedImage::prepare(img);

        let grids = prepared.detect_grids();

        // Take the first detected QR code
        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );

                Ok(ScannedCode::from_bytes(content.into_bytes()))
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}
