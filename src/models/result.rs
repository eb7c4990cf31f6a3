use super::{Point, Symbology};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extra information a reader reports alongside the text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// AIM symbology identifier, e.g. `]Q3` or `]C1`
    pub symbology_identifier: Option<String>,
    /// Error correction level as reported by the reader
    pub error_correction_level: Option<String>,
    /// Anything else the backend reported
    pub extra: BTreeMap<String, String>,
}

/// A barcode found in an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedResult {
    /// Decoded text
    pub text: String,
    /// Symbology the barcode was read as
    pub symbology: Symbology,
    /// Localization points (polygon corners) in pixel space
    pub points: Vec<Point>,
    /// Reader metadata
    pub metadata: ResultMetadata,
    /// Raw payload bytes, when the reader provides them
    pub raw_bytes: Option<Vec<u8>>,
}

impl DecodedResult {
    /// Result with text and symbology only
    pub fn new(text: impl Into<String>, symbology: Symbology) -> Self {
        Self {
            text: text.into(),
            symbology,
            points: Vec::new(),
            metadata: ResultMetadata::default(),
            raw_bytes: None,
        }
    }

    /// Attach localization points
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    /// Attach a symbology identifier
    pub fn with_symbology_identifier(mut self, id: impl Into<String>) -> Self {
        self.metadata.symbology_identifier = Some(id.into());
        self
    }
}
