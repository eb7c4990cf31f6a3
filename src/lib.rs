//! barcode_studio - barcode generation and reading core
//!
//! Everything around a symbology codec that is not the symbology math:
//! per-format option mapping, check-digit labels for retail codes, module
//! grid to SVG conversion, and the decode pipeline's image sniffing,
//! quiet-zone padding and coordinate correction. The codec itself sits
//! behind [`codec::BarcodeCodec`]; the `rxing` feature provides one.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Seam to the external symbology codec
pub mod codec;
/// Studio defaults loaded from JSON and the environment
pub mod config;
/// Generate path (options, labels, raster and vector output)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (Symbology, ModuleGrid, DecodedResult, ...)
pub mod models;
/// Decode path (preprocessing, GS1 classification, highlighting)
pub mod reader;
/// Helpers shared by the command-line tool
pub mod tools;
/// Pixel helpers
pub mod utils;

pub use codec::{BarcodeCodec, CodecError, EncodedSymbol};
pub use error::{BarcodeError, Result};
pub use models::{
    DecodedResult, Dimension, GenerationOptions, Margins, ModuleGrid, Point, QrErrorLevel,
    Symbology,
};
pub use reader::{highlight, is_gs1};

#[cfg(feature = "rxing")]
pub use codec::RxingCodec;

use encoder::bitmap::{draw_label_band, encode_png, frame};
use encoder::{FormatOptionsBuilder, VectorLayout, display_label, rasterize};
use rayon::prelude::*;
use reader::{preprocess, restore_coordinates};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument, warn};

/// A generated barcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedBarcode {
    /// PNG bytes, margins included
    #[serde(skip)]
    pub png: Vec<u8>,
    /// SVG document, absent when vector output failed
    pub svg: Option<String>,
    /// Text printed under a linear symbol
    pub label: Option<String>,
    /// PNG width in pixels
    pub width: u32,
    /// PNG height in pixels
    pub height: u32,
}

/// Generation and reading on top of a codec backend
#[derive(Debug, Clone, Default)]
pub struct BarcodeStudio<C> {
    codec: C,
}

#[cfg(feature = "rxing")]
impl BarcodeStudio<RxingCodec> {
    /// Studio backed by `rxing`
    pub fn new() -> Self {
        Self::with_codec(RxingCodec::new())
    }
}

impl<C: BarcodeCodec> BarcodeStudio<C> {
    /// Studio backed by `codec`
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    /// The underlying codec
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Generate a barcode.
    ///
    /// Empty content fails before the codec is called. Codec rejections are
    /// wrapped into [`BarcodeError::Encode`]. If only the vector rendering
    /// fails, the PNG is still returned with `svg` set to `None`.
    #[instrument(skip_all, fields(symbology = %options.symbology))]
    pub fn generate(&self, options: &GenerationOptions) -> Result<GeneratedBarcode> {
        let params = FormatOptionsBuilder::build(options)?;
        let symbol = self
            .codec
            .encode(&options.content, options.symbology, &params)
            .map_err(|source| BarcodeError::Encode {
                symbology: options.symbology,
                source,
            })?;

        let framed = frame(&symbol.image, options.margins);

        // Label only; the codec computes the real check digit for the bars.
        let label = (options.show_text && options.symbology.is_1d())
            .then(|| display_label(options.symbology, &options.content));

        let mut layout = VectorLayout::fit(
            &symbol.modules,
            params.width,
            params.height,
            options.margins,
        );
        if let Some(text) = &label {
            layout = layout.with_label(text.clone(), options.font_size);
        }
        let vector = match rasterize(&symbol.modules, &layout) {
            Ok(vector) => Some(vector),
            Err(e) => {
                warn!(error = %e, "Vector output failed, returning raster only");
                None
            }
        };

        let framed = match vector
            .as_ref()
            .and_then(|v| v.label.as_ref().map(|placed| (placed, v.height)))
        {
            Some((placed, height)) => draw_label_band(&framed, placed, height),
            None => framed,
        };
        let png = encode_png(&framed)?;
        let svg = vector.map(|v| v.to_svg());

        debug!(
            width = framed.width(),
            height = framed.height(),
            has_svg = svg.is_some(),
            "Generated barcode"
        );

        Ok(GeneratedBarcode {
            png,
            svg,
            label,
            width: framed.width(),
            height: framed.height(),
        })
    }

    /// Find every barcode in an uploaded image.
    ///
    /// Never fails: unreadable input and codec errors are logged and give
    /// an empty list, the same as an image with no barcode in it. Points
    /// are reported in the coordinates of the image as uploaded.
    #[instrument(skip_all, fields(len = bytes.len(), content_type = ?content_type))]
    pub fn read_barcodes(&self, bytes: &[u8], content_type: Option<&str>) -> Vec<DecodedResult> {
        match self.try_read(bytes, content_type) {
            Ok(results) => {
                debug!(count = results.len(), "Read barcodes");
                results
            }
            Err(e) => {
                warn!(error = %e, "Could not read image");
                Vec::new()
            }
        }
    }

    fn try_read(&self, bytes: &[u8], content_type: Option<&str>) -> Result<Vec<DecodedResult>> {
        let padded = preprocess(bytes, content_type)?;
        let mut results = self
            .codec
            .decode(&padded.image, true)
            .map_err(BarcodeError::Decode)?;
        restore_coordinates(&mut results, padded.offset);
        Ok(results)
    }

    /// Read several images in parallel.
    ///
    /// Items are independent. Once `cancel` is set, items that have not
    /// started yet are skipped and reported as `None`; items already
    /// running finish normally.
    pub fn read_batch(
        &self,
        items: &[(&[u8], Option<&str>)],
        cancel: &AtomicBool,
    ) -> Vec<Option<Vec<DecodedResult>>> {
        items
            .par_iter()
            .map(|(bytes, content_type)| {
                if cancel.load(Ordering::Relaxed) {
                    return None;
                }
                Some(self.read_barcodes(bytes, *content_type))
            })
            .collect()
    }
}

/// "1D" or "2D" for a symbology
pub fn get_dimension(symbology: Symbology) -> Dimension {
    symbology.dimension()
}

/// Whether the symbology can carry GS1 data
pub fn supports_gs1(symbology: Symbology) -> bool {
    symbology.supports_gs1()
}

/// Whether the symbology is linear
pub fn is_1d_format(symbology: Symbology) -> bool {
    symbology.is_1d()
}
