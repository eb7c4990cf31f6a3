//! Decode-path image preparation.
//!
//! Uploaded images are sniffed (vector or raster), turned into a bitmap,
//! and padded with a white quiet zone before detection. Localization points
//! coming back from the codec are shifted back by the same padding so they
//! refer to the original image.

use crate::encoder::bitmap::PAPER;
use crate::error::{BarcodeError, Result};
use crate::models::DecodedResult;
use image::RgbaImage;
use resvg::{tiny_skia, usvg};
use tracing::debug;

/// Number of leading characters inspected when sniffing for SVG
pub const SNIFF_CHARS: usize = 100;
/// Canvas used when an SVG reports no usable size
pub const FALLBACK_SVG_SIZE: u32 = 500;
/// Smallest quiet zone added around decode input
pub const MIN_PADDING: u32 = 20;

/// Kind of uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// SVG document
    Vector,
    /// PNG, JPEG, ...
    Raster,
}

/// Bitmap ready for detection plus the padding that was added on each side
#[derive(Debug, Clone)]
pub struct PaddedImage {
    /// Padded bitmap
    pub image: RgbaImage,
    /// Padding added on every side, in pixels
    pub offset: u32,
}

/// Decide whether `bytes` hold a vector or raster image.
///
/// A declared content type wins when it names SVG; otherwise the first
/// characters of the payload are checked for an XML or SVG prologue.
pub fn sniff(bytes: &[u8], content_type: Option<&str>) -> ImageKind {
    if content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("svg")) {
        return ImageKind::Vector;
    }
    let head: String = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_CHARS * 4)])
        .chars()
        .take(SNIFF_CHARS)
        .collect();
    let head = head.trim_start_matches('\u{feff}').trim_start();
    if head.starts_with("<?xml") || head.starts_with("<svg") || head.contains("<svg") {
        ImageKind::Vector
    } else {
        ImageKind::Raster
    }
}

/// Rasterize an SVG document onto a white bitmap at its intrinsic size
pub fn rasterize_svg(bytes: &[u8]) -> Result<RgbaImage> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| BarcodeError::Vector(e.to_string()))?;
    let size = tree.size();
    let (width, height) = if size.width() >= 1.0 && size.height() >= 1.0 {
        (size.width().ceil() as u32, size.height().ceil() as u32)
    } else {
        (FALLBACK_SVG_SIZE, FALLBACK_SVG_SIZE)
    };

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BarcodeError::Vector(format!("cannot allocate {width}x{height} canvas")))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // Opaque background: premultiplied and straight RGBA coincide.
    RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| BarcodeError::Vector("pixel buffer size mismatch".to_string()))
}

/// Turn uploaded bytes into a bitmap
pub fn load_bitmap(bytes: &[u8], kind: ImageKind) -> Result<RgbaImage> {
    match kind {
        ImageKind::Vector => rasterize_svg(bytes),
        ImageKind::Raster => Ok(image::load_from_memory(bytes)?.to_rgba8()),
    }
}

/// Quiet zone for an image: 10% of the shorter side, at least 20 pixels
pub fn quiet_zone_padding(width: u32, height: u32) -> u32 {
    (width.min(height) / 10).max(MIN_PADDING)
}

/// Centre `image` on a white canvas grown by the quiet zone on every side
pub fn pad(image: &RgbaImage) -> PaddedImage {
    let (w, h) = image.dimensions();
    let offset = quiet_zone_padding(w, h);
    let mut canvas = RgbaImage::from_pixel(w + 2 * offset, h + 2 * offset, PAPER);
    image::imageops::overlay(&mut canvas, image, offset as i64, offset as i64);
    PaddedImage {
        image: canvas,
        offset,
    }
}

/// Sniff, load and pad uploaded bytes
pub fn preprocess(bytes: &[u8], content_type: Option<&str>) -> Result<PaddedImage> {
    let kind = sniff(bytes, content_type);
    let bitmap = load_bitmap(bytes, kind)?;
    let padded = pad(&bitmap);
    debug!(
        ?kind,
        width = bitmap.width(),
        height = bitmap.height(),
        padding = padded.offset,
        "Prepared image for decoding"
    );
    Ok(padded)
}

/// Move localization points from padded space back to the original image.
///
/// Apply exactly once per [`preprocess`] call.
pub fn restore_coordinates(results: &mut [DecodedResult], offset: u32) {
    let d = offset as f32;
    for result in results {
        for p in &mut result.points {
            *p = p.translate(-d, -d);
        }
    }
}
