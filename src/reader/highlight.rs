//! Bounding-box overlay for a selected decode result.

use crate::encoder::bitmap::encode_png;
use crate::error::Result;
use crate::models::Point;
use crate::models::point::bounds;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::warn;

/// Stroke colour of the highlight
pub const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Rectangle to stroke, in pixel coordinates (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightBox {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge
    pub right: i32,
    /// Bottom edge
    pub bottom: i32,
    /// Padding applied around the points
    pub padding: u32,
    /// Stroke width
    pub stroke_width: u32,
}

/// Compute the highlight rectangle for `points` on a `width` x `height` image.
///
/// The bounding box of the points grows by `max(3, min(w, h) / 50)` and is
/// clamped to the image. Returns `None` for fewer than two points.
pub fn highlight_box(width: u32, height: u32, points: &[Point]) -> Option<HighlightBox> {
    if points.len() < 2 || width == 0 || height == 0 {
        return None;
    }
    let (min, max) = bounds(points)?;
    let short_side = width.min(height);
    let padding = (short_side / 50).max(3);
    let stroke_width = (short_side / 100).max(3);

    let pad = padding as f32;
    let clamp_x = |v: f32| (v.round() as i32).clamp(0, width as i32 - 1);
    let clamp_y = |v: f32| (v.round() as i32).clamp(0, height as i32 - 1);
    Some(HighlightBox {
        left: clamp_x(min.x - pad),
        top: clamp_y(min.y - pad),
        right: clamp_x(max.x + pad),
        bottom: clamp_y(max.y + pad),
        padding,
        stroke_width,
    })
}

/// Stroke `bbox` onto `image`, one nested rectangle per stroke pixel,
/// centred on the box edge
pub fn draw_highlight(image: &mut RgbaImage, bbox: &HighlightBox) {
    let sw = bbox.stroke_width as i32;
    for i in 0..sw {
        let grow = sw / 2 - i;
        let left = bbox.left - grow;
        let top = bbox.top - grow;
        let w = bbox.right - bbox.left + 1 + 2 * grow;
        let h = bbox.bottom - bbox.top + 1 + 2 * grow;
        if w <= 0 || h <= 0 {
            continue;
        }
        draw_hollow_rect_mut(image, Rect::at(left, top).of_size(w as u32, h as u32), HIGHLIGHT_COLOR);
    }
}

fn try_highlight(image_bytes: &[u8], points: &[Point]) -> Result<Option<Vec<u8>>> {
    let mut image = image::load_from_memory(image_bytes)?.to_rgba8();
    let Some(bbox) = highlight_box(image.width(), image.height(), points) else {
        return Ok(None);
    };
    draw_highlight(&mut image, &bbox);
    encode_png(&image).map(Some)
}

/// Draw a highlight around `points` on a copy of the image and re-encode it
/// as PNG.
///
/// With fewer than two points, or if the image cannot be processed, the
/// input bytes come back unchanged.
pub fn highlight(image_bytes: &[u8], points: &[Point]) -> Vec<u8> {
    if points.len() < 2 {
        return image_bytes.to_vec();
    }
    match try_highlight(image_bytes, points) {
        Ok(Some(png)) => png,
        Ok(None) => image_bytes.to_vec(),
        Err(e) => {
            warn!("Failed to highlight barcode: {}", e);
            image_bytes.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::bitmap::PAPER;

    fn square() -> Vec<Point> {
        vec![
            Point::new(10.0, 10.0),
            Point::new(50.0, 10.0),
            Point::new(50.0, 50.0),
            Point::new(10.0, 50.0),
        ]
    }

    #[test]
    fn test_box_expands_by_padding() {
        let bbox = highlight_box(200, 200, &square()).unwrap();
        let p = bbox.padding as i32;
        assert_eq!(p, 4);
        assert_eq!((bbox.left, bbox.top), (10 - p, 10 - p));
        assert_eq!((bbox.right, bbox.bottom), (50 + p, 50 + p));
        assert_eq!(bbox.stroke_width, 3);
    }

    #[test]
    fn test_small_image_uses_minimums() {
        let bbox = highlight_box(100, 120, &square()).unwrap();
        assert_eq!(bbox.padding, 3);
        assert_eq!(bbox.stroke_width, 3);
        assert_eq!((bbox.left, bbox.right), (7, 53));
    }

    #[test]
    fn test_box_is_clamped() {
        let pts = [Point::new(1.0, 2.0), Point::new(58.0, 59.0)];
        let bbox = highlight_box(60, 60, &pts).unwrap();
        assert_eq!((bbox.left, bbox.top, bbox.right, bbox.bottom), (0, 0, 59, 59));
    }

    #[test]
    fn test_too_few_points() {
        assert!(highlight_box(100, 100, &[]).is_none());
        assert!(highlight_box(100, 100, &[Point::new(5.0, 5.0)]).is_none());
    }

    #[test]
    fn test_highlight_returns_input_for_single_point() {
        let bytes = b"not even an image".to_vec();
        assert_eq!(highlight(&bytes, &[Point::new(1.0, 1.0)]), bytes);
    }

    #[test]
    fn test_highlight_returns_input_for_bad_image() {
        let bytes = b"not even an image".to_vec();
        assert_eq!(highlight(&bytes, &square()), bytes);
    }

    #[test]
    fn test_highlight_draws_stroke() {
        let png = encode_png(&RgbaImage::from_pixel(200, 200, PAPER)).unwrap();
        let out = highlight(&png, &square());
        let img = image::load_from_memory(&out).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (200, 200));
        // box edge at x = 6, stroke spans 5..=7
        assert_eq!(*img.get_pixel(6, 30), HIGHLIGHT_COLOR);
        assert_eq!(*img.get_pixel(5, 30), HIGHLIGHT_COLOR);
        assert_eq!(*img.get_pixel(7, 30), HIGHLIGHT_COLOR);
        assert_eq!(*img.get_pixel(3, 30), PAPER);
        assert_eq!(*img.get_pixel(30, 30), PAPER);
        assert_eq!(*img.get_pixel(30, 54), HIGHLIGHT_COLOR);
    }
}
