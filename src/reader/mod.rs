//! Decode path: preprocessing, GS1 classification and result highlighting.

pub mod gs1;
pub mod highlight;
pub mod preprocess;

pub use gs1::is_gs1;
pub use highlight::{HighlightBox, highlight, highlight_box};
pub use preprocess::{ImageKind, PaddedImage, preprocess, restore_coordinates};
