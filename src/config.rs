//! qrwiz runtime configuration handling

use crate::error::{Error, Result};
use crate::payload::AppDownloadPolicy;
use crate::qr::{ExportFormat, RenderConfig, parse_color, parse_ecc_level};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure loaded from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrwizConfig {
    /// QR rendering overrides
    pub render: RenderOptions,
    /// Payload encoder policies
    pub encoder: EncoderOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrwizConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrwiz.toml / qrwiz.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrwiz.toml", "qrwiz.yaml", "qrwiz.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrwiz");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.render.apply_env_overrides();
        self.encoder.apply_env_overrides();
        self.logging.apply_env_overrides();
    }

    /// Produce a fully resolved render configuration.
    pub fn render_config(&self) -> Result<RenderConfig> {
        self.render.to_render_config()
    }
}

/// User-friendly render overrides merged on top of `RenderConfig::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Side length of raster output in pixels
    pub size: Option<u32>,
    /// Error-correction level (L, M, Q, H)
    pub ecc: Option<String>,
    /// Module colour as `#rrggbb`
    pub dark_color: Option<String>,
    /// Background colour as `#rrggbb`
    pub light_color: Option<String>,
    /// Whether to draw the 4-module quiet zone
    pub quiet_zone: Option<bool>,
    /// Default export format (png, jpg, svg)
    pub format: Option<String>,
}

impl RenderOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(size) = env::var("QRWIZ_QR_SIZE") {
            self.size = size.parse::<u32>().ok();
        }
        if let Ok(ecc) = env::var("QRWIZ_QR_ECC") {
            self.ecc = Some(ecc);
        }
        if let Ok(dark) = env::var("QRWIZ_QR_DARK") {
            self.dark_color = Some(dark);
        }
        if let Ok(light) = env::var("QRWIZ_QR_LIGHT") {
            self.light_color = Some(light);
        }
        if let Ok(format) = env::var("QRWIZ_QR_FORMAT") {
            self.format = Some(format);
        }
    }

    /// Merge overrides onto the default render configuration.
    pub fn to_render_config(&self) -> Result<RenderConfig> {
        let mut config = RenderConfig::default();

        if let Some(size) = self.size {
            config.size = size.clamp(RenderConfig::MIN_SIZE, RenderConfig::MAX_SIZE);
        }

        if let Some(ecc) = &self.ecc {
            config.ecc = parse_ecc_level(ecc).ok_or_else(|| {
                Error::Config(format!(
                    "Unknown error-correction level '{ecc}'. Use L, M, Q, or H"
                ))
            })?;
        }

        if let Some(dark) = &self.dark_color {
            config.dark = parse_color(dark)?;
        }

        if let Some(light) = &self.light_color {
            config.light = parse_color(light)?;
        }

        if let Some(quiet_zone) = self.quiet_zone {
            config.quiet_zone = quiet_zone;
        }

        if let Some(format) = &self.format {
            config.format = format.parse::<ExportFormat>().map_err(Error::Config)?;
        }

        Ok(config)
    }
}

/// Payload encoder policies
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// How app-download requests with both store links are encoded
    pub app_download: AppDownloadPolicy,
}

impl EncoderOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(policy) = env::var("QRWIZ_APP_DOWNLOAD") {
            if let Some(parsed) = AppDownloadPolicy::parse(&policy) {
                self.app_download = parsed;
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRWIZ_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in console logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRWIZ_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRWIZ_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRWIZ_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRWIZ_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use qrcode::EcLevel;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = QrwizConfig::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.encoder.app_download, AppDownloadPolicy::PreferAndroid);

        let render = config.render_config().unwrap();
        assert_eq!(render, RenderConfig::default());
    }

    #[test]
    fn test_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r##"
[render]
size = 512
ecc = "h"
dark_color = "#112233"

[encoder]
app_download = "both-lines"

[logging]
level = "debug"
rotation = "daily"
"##
        )
        .unwrap();

        let config = QrwizConfig::from_file(file.path()).unwrap();
        assert_eq!(config.encoder.app_download, AppDownloadPolicy::BothLines);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));

        let render = config.render_config().unwrap();
        assert_eq!(render.size, 512);
        assert_eq!(render.ecc, EcLevel::H);
        assert_eq!(render.dark, Rgb([0x11, 0x22, 0x33]));
        assert_eq!(render.light, Rgb([0xFF, 0xFF, 0xFF]));
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "render:\n  format: svg\n  quiet_zone: false\nlogging:\n  color: false\n"
        )
        .unwrap();

        let config = QrwizConfig::from_file(file.path()).unwrap();
        assert!(!config.logging.color);
        let render = config.render_config().unwrap();
        assert_eq!(render.format, ExportFormat::Svg);
        assert!(!render.quiet_zone);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(matches!(
            QrwizConfig::from_file(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_render_values() {
        let options = RenderOptions {
            ecc: Some("Z".to_string()),
            ..RenderOptions::default()
        };
        assert!(matches!(options.to_render_config(), Err(Error::Config(_))));

        let options = RenderOptions {
            dark_color: Some("black".to_string()),
            ..RenderOptions::default()
        };
        assert!(matches!(options.to_render_config(), Err(Error::Config(_))));
    }

    #[test]
    fn test_size_is_clamped() {
        let options = RenderOptions {
            size: Some(1),
            ..RenderOptions::default()
        };
        assert_eq!(
            options.to_render_config().unwrap().size,
            RenderConfig::MIN_SIZE
        );
    }
}
