//! Translate generic generation options into codec parameters.

use crate::error::{BarcodeError, Result};
use crate::models::{GenerationOptions, ParamSet, QrErrorLevel};
use serde::Serialize;

/// Highest PDF417 error correction level
pub const PDF417_MAX_ERROR_LEVEL: u8 = 8;

/// Symbology-specific error correction setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCorrection {
    /// QR Code level
    Qr(QrErrorLevel),
    /// PDF417 level, 0-8
    Pdf417(u8),
    /// Aztec error correction as a percentage, 0-100
    AztecPercent(u8),
}

/// Parameters handed to the codec for one encode call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecParams {
    /// Requested symbol width in pixels
    pub width: u32,
    /// Requested symbol height in pixels
    pub height: u32,
    /// Margin the codec should add itself, in modules
    pub margin: u32,
    /// Error correction, for symbologies that take one
    pub error_correction: Option<ErrorCorrection>,
    /// Encode as GS1
    pub gs1: bool,
    /// Encode the bare symbol without any built-in quiet zone. Backends
    /// without a dedicated switch honour it by encoding with zero margin.
    pub pure: bool,
    /// PDF417 compact mode
    pub compact: bool,
}

/// Builds [`CodecParams`] from [`GenerationOptions`]
pub struct FormatOptionsBuilder;

impl FormatOptionsBuilder {
    /// Map `options` to codec parameters.
    ///
    /// Fails with [`BarcodeError::Validation`] when the content is empty or
    /// whitespace. Outer margins never reach the codec: they are applied to
    /// the finished bitmap and vector output instead.
    pub fn build(options: &GenerationOptions) -> Result<CodecParams> {
        if options.content.trim().is_empty() {
            return Err(BarcodeError::Validation(
                "Content must not be empty".to_string(),
            ));
        }

        let info = options.symbology.info();
        let mut params = CodecParams {
            width: options.width,
            height: options.height,
            margin: info.codec_margin,
            error_correction: None,
            gs1: false,
            pure: false,
            compact: false,
        };

        match info.params {
            ParamSet::Basic => {}
            ParamSet::Qr => {
                params.error_correction = Some(ErrorCorrection::Qr(options.qr_error_level));
                params.gs1 = options.gs1;
            }
            ParamSet::DataMatrix => {
                params.gs1 = options.gs1;
            }
            ParamSet::Code128 => {
                params.gs1 = options.gs1;
                params.pure = true;
            }
            ParamSet::Pdf417 => {
                params.error_correction = Some(ErrorCorrection::Pdf417(
                    options.pdf417_error_level.min(PDF417_MAX_ERROR_LEVEL),
                ));
                params.compact = options.pdf417_compact;
            }
            ParamSet::Aztec => {
                params.error_correction = Some(ErrorCorrection::AztecPercent(
                    options.aztec_error_percent.min(100),
                ));
            }
        }

        Ok(params)
    }
}
