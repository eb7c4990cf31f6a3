/// Bit-packed module grid
pub mod grid;
/// Generation options and margins
pub mod options;
pub mod point;
/// Decode results
pub mod result;
/// Symbology enum and its dispatch table
pub mod symbology;

pub use grid::ModuleGrid;
pub use options::{GenerationOptions, Margins, QrErrorLevel};
pub use point::Point;
pub use result::{DecodedResult, ResultMetadata};
pub use symbology::{Dimension, LabelRule, ParamSet, Symbology, SymbologyInfo, UnknownSymbology};
