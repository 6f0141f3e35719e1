//! QR code rendering and scanning
//!
//! The payload encoder only produces text. This module turns that text into
//! an image (PNG, JPEG or SVG) and, for inspection, reads QR codes back out of
//! images.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::QrRenderer;

use crate::error::{Error, Result};
use image::Rgb;
use qrcode::EcLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Raw contents of a scanned QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedCode {
    /// The raw decoded data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl ScannedCode {
    /// Create a scanned code from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Get the contents as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Image formats the renderer can export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG raster
    #[default]
    Png,
    /// JPEG raster
    Jpeg,
    /// SVG vector
    Svg,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
        }
    }

    /// MIME type of the exported bytes
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Guess the format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            other => Err(format!(
                "Unsupported export format '{other}', expected png, jpg, or svg"
            )),
        }
    }
}

/// Fully resolved rendering parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Target side length in pixels
    pub size: u32,
    /// Error-correction level
    pub ecc: EcLevel,
    /// Module colour
    pub dark: Rgb<u8>,
    /// Background colour
    pub light: Rgb<u8>,
    /// Draw the quiet zone border
    pub quiet_zone: bool,
    /// Format used when none is requested explicitly
    pub format: ExportFormat,
}

impl RenderConfig {
    /// Smallest accepted size
    pub const MIN_SIZE: u32 = 100;
    /// Largest accepted size
    pub const MAX_SIZE: u32 = 4096;
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 300,
            ecc: EcLevel::Q,
            dark: Rgb([0x00, 0x00, 0x00]),
            light: Rgb([0xFF, 0xFF, 0xFF]),
            quiet_zone: true,
            format: ExportFormat::Png,
        }
    }
}

/// Parse an error-correction level letter (case-insensitive).
pub fn parse_ecc_level(value: &str) -> Option<EcLevel> {
    match value.trim().to_ascii_uppercase().as_str() {
        "L" => Some(EcLevel::L),
        "M" => Some(EcLevel::M),
        "Q" => Some(EcLevel::Q),
        "H" => Some(EcLevel::H),
        _ => None,
    }
}

/// Parse a `#rrggbb` (or `rrggbb`) colour.
pub fn parse_color(value: &str) -> Result<Rgb<u8>> {
    let digits = value.trim().trim_start_matches('#');
    let bytes = hex::decode(digits)
        .map_err(|e| Error::Config(format!("Invalid colour '{value}': {e}")))?;
    match bytes.as_slice() {
        [r, g, b] => Ok(Rgb([*r, *g, *b])),
        _ => Err(Error::Config(format!(
            "Invalid colour '{value}': expected 6 hex digits"
        ))),
    }
}

/// Format a colour as lowercase `#rrggbb`.
pub fn format_color(color: Rgb<u8>) -> String {
    format!("#{}", hex::encode(color.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanned_code_from_bytes() {
        let code = ScannedCode::from_bytes(b"hello world".to_vec());
        assert_eq!(code.as_str(), Some("hello world"));

        let binary = ScannedCode::from_bytes(vec![0xFF, 0xFE]);
        assert!(binary.as_str().is_none()); // Invalid UTF-8
        assert_eq!(binary.as_bytes(), &[0xFF, 0xFE]);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#1a2B3c").unwrap(), Rgb([0x1A, 0x2B, 0x3C]));
        assert_eq!(parse_color("ffffff").unwrap(), Rgb([0xFF, 0xFF, 0xFF]));
        assert!(parse_color("#fff").is_err());
        assert!(parse_color("#gggggg").is_err());
        assert_eq!(format_color(Rgb([0x1A, 0x2B, 0x3C])), "#1a2b3c");
    }

    #[test]
    fn test_export_format() {
        assert_eq!("JPEG".parse::<ExportFormat>(), Ok(ExportFormat::Jpeg));
        assert_eq!(
            ExportFormat::from_path(Path::new("out/qr-code-wifi.svg")),
            Some(ExportFormat::Svg)
        );
        assert_eq!(ExportFormat::from_path(Path::new("noext")), None);
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_parse_ecc_level() {
        assert_eq!(parse_ecc_level("m"), Some(EcLevel::M));
        assert_eq!(parse_ecc_level("X"), None);
    }
}
