//! Generate path: option mapping, printed labels, raster and vector output.

pub mod bitmap;
pub mod check_digit;
pub mod format_options;
pub mod rasterizer;

pub use check_digit::{check_digit, display_label, expand_upce};
pub use format_options::{CodecParams, ErrorCorrection, FormatOptionsBuilder};
pub use rasterizer::{InkRect, VectorLayout, VectorOutput, merge_runs, rasterize};
