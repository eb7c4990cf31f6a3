use super::Symbology;
use serde::{Deserialize, Serialize};
use std::fmt;

/// QR Code error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QrErrorLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    #[default]
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl fmt::Display for QrErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QrErrorLevel::L => "L",
            QrErrorLevel::M => "M",
            QrErrorLevel::Q => "Q",
            QrErrorLevel::H => "H",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for QrErrorLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(QrErrorLevel::L),
            "M" => Ok(QrErrorLevel::M),
            "Q" => Ok(QrErrorLevel::Q),
            "H" => Ok(QrErrorLevel::H),
            other => Err(format!("invalid QR error level: {other}")),
        }
    }
}

/// Outer margins in output pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: u32,
    /// Right margin
    pub right: u32,
    /// Bottom margin
    pub bottom: u32,
    /// Left margin
    pub left: u32,
}

impl Margins {
    /// Same margin on all four sides
    pub fn uniform(margin: u32) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }

    /// Left + right
    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    /// Top + bottom
    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

/// Everything needed to generate one barcode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Text to encode
    pub content: String,
    /// Target symbology
    pub symbology: Symbology,
    /// Symbol width in pixels (without margins)
    pub width: u32,
    /// Symbol height in pixels (without margins)
    pub height: u32,
    /// Outer margins
    pub margins: Margins,
    /// Print the human-readable label under linear symbols
    pub show_text: bool,
    /// Label font size in pixels
    pub font_size: u32,
    /// Request GS1 encoding (ignored by symbologies without GS1 support)
    pub gs1: bool,
    /// QR Code error correction
    pub qr_error_level: QrErrorLevel,
    /// PDF417 error correction level (0-8)
    pub pdf417_error_level: u8,
    /// PDF417 compact (truncated) mode
    pub pdf417_compact: bool,
    /// Aztec error correction as a percentage of the symbol
    pub aztec_error_percent: u8,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            content: String::new(),
            symbology: Symbology::QrCode,
            width: 300,
            height: 300,
            margins: Margins::uniform(10),
            show_text: true,
            font_size: 14,
            gs1: false,
            qr_error_level: QrErrorLevel::M,
            pdf417_error_level: 2,
            pdf417_compact: false,
            aztec_error_percent: 33,
        }
    }
}

impl GenerationOptions {
    /// Options for `content` in `symbology` with default layout
    pub fn new(symbology: Symbology, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            symbology,
            ..Self::default()
        }
    }

    /// Set the symbol size in pixels
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set all four margins
    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the same margin on every side
    pub fn margin(self, margin: u32) -> Self {
        self.margins(Margins::uniform(margin))
    }

    /// Whether to print the label under linear symbols
    pub fn show_text(mut self, show: bool) -> Self {
        self.show_text = show;
        self
    }

    /// Set the label font size
    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Request GS1 encoding
    pub fn gs1(mut self, gs1: bool) -> Self {
        self.gs1 = gs1;
        self
    }

    /// Set the QR Code error correction level
    pub fn qr_error_level(mut self, level: QrErrorLevel) -> Self {
        self.qr_error_level = level;
        self
    }

    /// Set the PDF417 error correction level
    pub fn pdf417_error_level(mut self, level: u8) -> Self {
        self.pdf417_error_level = level;
        self
    }

    /// Enable PDF417 compact mode
    pub fn pdf417_compact(mut self, compact: bool) -> Self {
        self.pdf417_compact = compact;
        self
    }

    /// Set the Aztec error correction percentage
    pub fn aztec_error_percent(mut self, percent: u8) -> Self {
        self.aztec_error_percent = percent;
        self
    }
}
