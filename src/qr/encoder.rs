//! QR code renderer

use crate::error::{Error, Result};
use crate::payload::EncodedPayload;
use crate::qr::{ExportFormat, RenderConfig, format_color};
use image::{DynamicImage, ImageFormat, Rgb};
use qrcode::QrCode;
use qrcode::render::svg;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Renders encoded payloads as QR code images
pub struct QrRenderer {
    config: RenderConfig,
}

impl QrRenderer {
    /// Create a renderer with default settings (300px, ECC Q, black on white)
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
        }
    }

    /// Create a renderer with explicit settings
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Active render settings
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn code(&self, payload: &EncodedPayload) -> Result<QrCode> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }

        QrCode::with_error_correction_level(payload.as_bytes(), self.config.ecc)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))
    }

    /// Render a payload into a raster image
    pub fn render(&self, payload: &EncodedPayload) -> Result<DynamicImage> {
        let code = self.code(payload)?;
        let size = self.config.size;

        let image = code
            .render::<Rgb<u8>>()
            .dark_color(self.config.dark)
            .light_color(self.config.light)
            .quiet_zone(self.config.quiet_zone)
            .min_dimensions(size, size)
            .max_dimensions(size, size)
            .build();

        Ok(DynamicImage::ImageRgb8(image))
    }

    /// Render a payload into an SVG document
    pub fn render_svg(&self, payload: &EncodedPayload) -> Result<String> {
        let code = self.code(payload)?;
        let size = self.config.size;
        let dark = format_color(self.config.dark);
        let light = format_color(self.config.light);

        Ok(code
            .render::<svg::Color>()
            .dark_color(svg::Color(&dark))
            .light_color(svg::Color(&light))
            .quiet_zone(self.config.quiet_zone)
            .min_dimensions(size, size)
            .max_dimensions(size, size)
            .build())
    }

    /// Render and encode a payload into the bytes of `format`
    pub fn export(&self, payload: &EncodedPayload, format: ExportFormat) -> Result<Vec<u8>> {
        let image_format = match format {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
            ExportFormat::Svg => return Ok(self.render_svg(payload)?.into_bytes()),
        };

        let image = self.render(payload)?;
        let mut buffer = Vec::new();
        image.write_to(&mut Cursor::new(&mut buffer), image_format)?;
        Ok(buffer)
    }

    /// Render a payload to `path`, choosing the format from its extension
    /// (falling back to the configured default). Returns the format used.
    pub fn save(&self, payload: &EncodedPayload, path: &Path) -> Result<ExportFormat> {
        let format = ExportFormat::from_path(path).unwrap_or(self.config.format);
        let bytes = self.export(payload, format)?;
        fs::write(path, &bytes)?;

        tracing::info!(
            path = %path.display(),
            format = %format,
            bytes = bytes.len(),
            "QR code exported"
        );
        Ok(format)
    }
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new()
    }
}
