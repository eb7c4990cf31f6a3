//! Codec backend built on the `rxing` multi-format reader/writer.

use super::{BarcodeCodec, CodecError, EncodedSymbol};
use crate::encoder::bitmap::paint_modules;
use crate::encoder::format_options::{CodecParams, ErrorCorrection};
use crate::models::{DecodedResult, ModuleGrid, Point, ResultMetadata, Symbology};
use crate::utils::luma::rgba_to_luma;
use image::RgbaImage;
use rxing::common::BitMatrix;
use rxing::{
    BarcodeFormat, DecodeHintType, DecodeHintValue, DecodingHintDictionary, EncodeHintType,
    EncodeHintValue, EncodingHintDictionary, Exceptions, MultiFormatWriter, RXingResult,
    RXingResultMetadataType, RXingResultMetadataValue, Writer,
};
use std::collections::HashMap;
use tracing::debug;

/// [`BarcodeCodec`] backed by `rxing`
#[derive(Debug, Default, Clone, Copy)]
pub struct RxingCodec;

impl RxingCodec {
    /// Create the backend
    pub fn new() -> Self {
        Self
    }
}

fn writer_format(symbology: Symbology) -> Option<BarcodeFormat> {
    let format = match symbology {
        Symbology::Aztec => BarcodeFormat::AZTEC,
        Symbology::Codabar => BarcodeFormat::CODABAR,
        Symbology::Code39 => BarcodeFormat::CODE_39,
        Symbology::Code93 => BarcodeFormat::CODE_93,
        Symbology::Code128 => BarcodeFormat::CODE_128,
        Symbology::DataMatrix => BarcodeFormat::DATA_MATRIX,
        Symbology::Ean8 => BarcodeFormat::EAN_8,
        Symbology::Ean13 => BarcodeFormat::EAN_13,
        Symbology::Itf => BarcodeFormat::ITF,
        Symbology::Pdf417 => BarcodeFormat::PDF_417,
        Symbology::QrCode => BarcodeFormat::QR_CODE,
        Symbology::UpcA => BarcodeFormat::UPC_A,
        Symbology::UpcE => BarcodeFormat::UPC_E,
        _ => return None,
    };
    Some(format)
}

fn reader_symbology(format: &BarcodeFormat) -> Option<Symbology> {
    let symbology = match format {
        BarcodeFormat::AZTEC => Symbology::Aztec,
        BarcodeFormat::CODABAR => Symbology::Codabar,
        BarcodeFormat::CODE_39 => Symbology::Code39,
        BarcodeFormat::CODE_93 => Symbology::Code93,
        BarcodeFormat::CODE_128 => Symbology::Code128,
        BarcodeFormat::DATA_MATRIX => Symbology::DataMatrix,
        BarcodeFormat::EAN_8 => Symbology::Ean8,
        BarcodeFormat::EAN_13 => Symbology::Ean13,
        BarcodeFormat::ITF => Symbology::Itf,
        BarcodeFormat::MAXICODE => Symbology::MaxiCode,
        BarcodeFormat::PDF_417 => Symbology::Pdf417,
        BarcodeFormat::QR_CODE => Symbology::QrCode,
        BarcodeFormat::RSS_14 => Symbology::DataBar,
        BarcodeFormat::RSS_EXPANDED => Symbology::DataBarExpanded,
        BarcodeFormat::UPC_A => Symbology::UpcA,
        BarcodeFormat::UPC_E => Symbology::UpcE,
        _ => return None,
    };
    Some(symbology)
}

fn encode_hints(params: &CodecParams) -> EncodingHintDictionary {
    let mut hints: EncodingHintDictionary = HashMap::new();
    // rxing has no pure-symbol switch; a zero margin gives the bare symbol.
    let margin = if params.pure { 0 } else { params.margin };
    hints.insert(
        EncodeHintType::MARGIN,
        EncodeHintValue::Margin(margin.to_string()),
    );
    if let Some(ec) = params.error_correction {
        let level = match ec {
            ErrorCorrection::Qr(level) => level.to_string(),
            ErrorCorrection::Pdf417(level) => level.to_string(),
            ErrorCorrection::AztecPercent(percent) => percent.to_string(),
        };
        hints.insert(
            EncodeHintType::ERROR_CORRECTION,
            EncodeHintValue::ErrorCorrection(level),
        );
    }
    if params.gs1 {
        hints.insert(EncodeHintType::GS1_FORMAT, EncodeHintValue::Gs1Format(true));
    }
    if params.compact {
        hints.insert(
            EncodeHintType::PDF417_COMPACT,
            EncodeHintValue::Pdf417Compact("true".to_string()),
        );
    }
    hints
}

fn to_grid(matrix: &BitMatrix) -> ModuleGrid {
    let (w, h) = (matrix.getWidth(), matrix.getHeight());
    let mut grid = ModuleGrid::new(w as usize, h as usize);
    for y in 0..h {
        for x in 0..w {
            if matrix.get(x, y) {
                grid.set(x as usize, y as usize, true);
            }
        }
    }
    grid
}

fn to_decoded(result: &RXingResult) -> Option<DecodedResult> {
    let Some(symbology) = reader_symbology(result.getBarcodeFormat()) else {
        debug!(format = ?result.getBarcodeFormat(), "Skipping result in unmapped format");
        return None;
    };

    let mut metadata = ResultMetadata::default();
    for (key, value) in result.getRXingResultMetadata() {
        match (key, value) {
            (
                RXingResultMetadataType::SYMBOLOGY_IDENTIFIER,
                RXingResultMetadataValue::SymbologyIdentifier(id),
            ) => metadata.symbology_identifier = Some(id.clone()),
            (
                RXingResultMetadataType::ERROR_CORRECTION_LEVEL,
                RXingResultMetadataValue::ErrorCorrectionLevel(level),
            ) => metadata.error_correction_level = Some(level.clone()),
            _ => {
                metadata
                    .extra
                    .insert(format!("{key:?}"), format!("{value:?}"));
            }
        }
    }

    let raw = result.getRawBytes();
    Some(DecodedResult {
        text: result.getText().to_string(),
        symbology,
        points: result
            .getPoints()
            .iter()
            .map(|p| Point::new(p.x, p.y))
            .collect(),
        metadata,
        raw_bytes: (!raw.is_empty()).then(|| raw.to_vec()),
    })
}

impl BarcodeCodec for RxingCodec {
    fn encode(
        &self,
        content: &str,
        symbology: Symbology,
        params: &CodecParams,
    ) -> Result<EncodedSymbol, CodecError> {
        let format = writer_format(symbology).ok_or(CodecError::Unsupported(symbology))?;
        let hints = encode_hints(params);

        // Zero size asks the writer for the native module matrix.
        let matrix = MultiFormatWriter::default()
            .encode_with_hints(content, &format, 0, 0, &hints)
            .map_err(|e| CodecError::Rejected(e.to_string()))?;
        let modules = to_grid(&matrix);
        let image = paint_modules(&modules, params.width, params.height);

        Ok(EncodedSymbol { image, modules })
    }

    fn decode(&self, image: &RgbaImage, try_harder: bool) -> Result<Vec<DecodedResult>, CodecError> {
        let (width, height) = image.dimensions();
        let luma = rgba_to_luma(image.as_raw(), width as usize, height as usize);

        let mut hints: DecodingHintDictionary = HashMap::new();
        hints.insert(
            DecodeHintType::TRY_HARDER,
            DecodeHintValue::TryHarder(try_harder),
        );

        match rxing::helpers::detect_multiple_in_luma_with_hints(luma, width, height, &mut hints) {
            Ok(results) => Ok(results.iter().filter_map(to_decoded).collect()),
            Err(Exceptions::NotFoundException(_)) => Ok(Vec::new()),
            Err(e) => Err(CodecError::Failed(e.to_string())),
        }
    }
}
