//! Seam to the symbology codec.
//!
//! Finder patterns, error correction and bar patterns belong to the codec;
//! this crate only prepares its inputs and post-processes its outputs.

#[cfg(feature = "rxing")]
pub mod rxing;

use crate::encoder::format_options::CodecParams;
use crate::models::{DecodedResult, ModuleGrid, Symbology};
use image::RgbaImage;
use thiserror::Error;

#[cfg(feature = "rxing")]
pub use self::rxing::RxingCodec;

/// Errors a codec backend can report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Content is not valid for the symbology or options
    #[error("{0}")]
    Rejected(String),
    /// Backend has no writer or reader for the symbology
    #[error("{0} is not supported by this codec")]
    Unsupported(Symbology),
    /// Any other backend failure
    #[error("codec failure: {0}")]
    Failed(String),
}

/// Output of one encode call
#[derive(Debug, Clone)]
pub struct EncodedSymbol {
    /// Rendered symbol at the requested size, without outer margins
    pub image: RgbaImage,
    /// Module grid at native resolution
    pub modules: ModuleGrid,
}

/// A barcode encoder/decoder backend
pub trait BarcodeCodec: Send + Sync {
    /// Encode `content` with the given parameters
    fn encode(
        &self,
        content: &str,
        symbology: Symbology,
        params: &CodecParams,
    ) -> Result<EncodedSymbol, CodecError>;

    /// Find every barcode in `image`. `try_harder` trades speed for recall.
    fn decode(&self, image: &RgbaImage, try_harder: bool) -> Result<Vec<DecodedResult>, CodecError>;
}

impl<C: BarcodeCodec + ?Sized> BarcodeCodec for &C {
    fn encode(
        &self,
        content: &str,
        symbology: Symbology,
        params: &CodecParams,
    ) -> Result<EncodedSymbol, CodecError> {
        (**self).encode(content, symbology, params)
    }

    fn decode(&self, image: &RgbaImage, try_harder: bool) -> Result<Vec<DecodedResult>, CodecError> {
        (**self).decode(image, try_harder)
    }
}
