//! Error types for barcode generation and reading

use crate::codec::CodecError;
use crate::models::Symbology;
use thiserror::Error;

/// Errors surfaced by the studio
#[derive(Debug, Error)]
pub enum BarcodeError {
    /// Input rejected before the codec was called
    #[error("{0}")]
    Validation(String),

    /// The codec refused the content for the chosen symbology or options
    #[error("Failed to generate {symbology} barcode: {source}")]
    Encode {
        /// Symbology that was requested
        symbology: Symbology,
        /// What the codec reported
        #[source]
        source: CodecError,
    },

    /// The codec failed while reading an image
    #[error("Failed to read barcodes: {0}")]
    Decode(#[source] CodecError),

    /// Raster image could not be decoded or encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Vector image could not be parsed or rendered
    #[error("Vector image error: {0}")]
    Vector(String),

    /// Module grid has no cells
    #[error("Module grid is empty")]
    EmptyGrid,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BarcodeError>;
