//! Raster side of generation: painting module grids and framing bitmaps.

use super::rasterizer::{PlacedLabel, cell_size, escape_xml, merge_runs};
use crate::error::Result;
use crate::models::{Margins, ModuleGrid};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use resvg::{tiny_skia, usvg};
use std::io::Cursor;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Ink colour
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Paper colour
pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Paint a module grid scaled to roughly `width` x `height`.
///
/// Uses the same cell size as the vector output, so both renderings agree
/// module for module.
pub fn paint_modules(grid: &ModuleGrid, width: u32, height: u32) -> RgbaImage {
    let (cw, ch) = cell_size(grid, width, height);
    let img_w = (grid.width() as u32 * cw).max(1);
    let img_h = (grid.height() as u32 * ch).max(1);
    let mut img = RgbaImage::from_pixel(img_w, img_h, PAPER);
    for r in merge_runs(grid) {
        let rect = Rect::at((r.x * cw) as i32, (r.y * ch) as i32).of_size(r.width * cw, r.height * ch);
        draw_filled_rect_mut(&mut img, rect, INK);
    }
    img
}

/// Place `image` on a white canvas grown by `margins`
pub fn frame(image: &RgbaImage, margins: Margins) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        image.width() + margins.horizontal(),
        image.height() + margins.vertical(),
        PAPER,
    );
    image::imageops::replace(&mut canvas, image, margins.left as i64, margins.top as i64);
    canvas
}

fn system_fonts() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            debug!(faces = db.len(), "Loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Extend `image` down to `height` with white and print `label` into it.
///
/// Positions come from the vector layout so both outputs place the text
/// identically. Glyphs come from the system fonts; when none are installed
/// the band stays blank.
pub fn draw_label_band(image: &RgbaImage, label: &PlacedLabel, height: u32) -> RgbaImage {
    let (w, h) = (image.width(), image.height().max(height));
    let mut canvas = RgbaImage::from_pixel(w, h, PAPER);
    image::imageops::replace(&mut canvas, image, 0, 0);

    let doc = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><text x="{}" y="{}" font-family="monospace" font-size="{}" text-anchor="middle" fill="#000000">{}</text></svg>"##,
        label.x,
        label.y,
        label.font_size,
        escape_xml(&label.text)
    );
    let options = usvg::Options {
        fontdb: system_fonts(),
        ..usvg::Options::default()
    };
    let tree = match usvg::Tree::from_str(&doc, &options) {
        Ok(tree) => tree,
        Err(e) => {
            warn!(error = %e, "Label could not be laid out");
            return canvas;
        }
    };
    let Some(mut pixmap) = tiny_skia::Pixmap::new(w, h) else {
        return canvas;
    };
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // Premultiplied source over the opaque canvas
    for (dst, src) in canvas.pixels_mut().zip(pixmap.pixels()) {
        let a = src.alpha() as u16;
        if a == 0 {
            continue;
        }
        let blend = |s: u8, d: u8| (s as u16 + d as u16 * (255 - a) / 255) as u8;
        *dst = Rgba([
            blend(src.red(), dst[0]),
            blend(src.green(), dst[1]),
            blend(src.blue(), dst[2]),
            255,
        ]);
    }
    canvas
}

/// Encode as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(image.clone()).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
