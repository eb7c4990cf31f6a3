//! Studio-wide defaults for generation.
//!
//! Loaded from a JSON file (every field optional) and then overridden by
//! `BARCODE_*` environment variables.

use crate::error::{BarcodeError, Result};
use crate::models::{GenerationOptions, Margins, QrErrorLevel, Symbology};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Requested symbol width
    pub width: u32,
    /// Requested symbol height
    pub height: u32,
    /// Outer margins
    pub margins: Margins,
    /// Print the label under linear symbols
    pub show_text: bool,
    /// Label font size
    pub font_size: u32,
    /// QR error correction
    pub qr_error_level: QrErrorLevel,
    /// PDF417 error correction level
    pub pdf417_error_level: u8,
    /// Aztec error correction percentage
    pub aztec_error_percent: u8,
}

impl Default for StudioConfig {
    fn default() -> Self {
        let opts = GenerationOptions::default();
        Self {
            width: opts.width,
            height: opts.height,
            margins: opts.margins,
            show_text: opts.show_text,
            font_size: opts.font_size,
            qr_error_level: opts.qr_error_level,
            pdf417_error_level: opts.pdf417_error_level,
            aztec_error_percent: opts.aztec_error_percent,
        }
    }
}

fn parse_u32(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u32> {
    lookup(name).and_then(|v| v.trim().parse::<u32>().ok())
}

fn parse_bool_u8(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<bool> {
    lookup(name)
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
}

impl StudioConfig {
    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| BarcodeError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Apply `BARCODE_WIDTH`, `BARCODE_HEIGHT`, `BARCODE_MARGIN`,
    /// `BARCODE_FONT_SIZE` and `BARCODE_SHOW_TEXT` (0/1) from the process
    /// environment. Unparseable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with a
    /// custom variable source
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = parse_u32(&lookup, "BARCODE_WIDTH") {
            self.width = v;
        }
        if let Some(v) = parse_u32(&lookup, "BARCODE_HEIGHT") {
            self.height = v;
        }
        if let Some(v) = parse_u32(&lookup, "BARCODE_MARGIN") {
            self.margins = Margins::uniform(v);
        }
        if let Some(v) = parse_u32(&lookup, "BARCODE_FONT_SIZE") {
            self.font_size = v;
        }
        if let Some(v) = parse_bool_u8(&lookup, "BARCODE_SHOW_TEXT") {
            self.show_text = v;
        }
        self
    }

    /// Generation options seeded with these defaults
    pub fn options_for(&self, symbology: Symbology, content: impl Into<String>) -> GenerationOptions {
        GenerationOptions::new(symbology, content)
            .size(self.width, self.height)
            .margins(self.margins)
            .show_text(self.show_text)
            .font_size(self.font_size)
            .qr_error_level(self.qr_error_level)
            .pdf417_error_level(self.pdf417_error_level)
            .aztec_error_percent(self.aztec_error_percent)
    }
}
