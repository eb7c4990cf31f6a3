//! RGBA to 8-bit luminance for codec input
//!
//! Y = 0.299*R + 0.587*G + 0.114*B, computed with integer weights:
//! Y = (76*R + 150*G + 29*B) >> 8
//!
//! Transparent pixels are composited over white first, so a transparent
//! PNG reads as paper rather than ink.

use rayon::prelude::*;

const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Images with at least this many pixels are converted in parallel
pub const PARALLEL_THRESHOLD: usize = 512 * 512;

#[inline]
fn pixel_luma(px: &[u8]) -> u8 {
    let a = px[3] as u32;
    let over_white = |c: u8| (c as u32 * a + 255 * (255 - a)) / 255;
    let lum = (COEF_R * over_white(px[0]) + COEF_G * over_white(px[1]) + COEF_B * over_white(px[2])) >> 8;
    lum.min(255) as u8
}

/// Convert packed RGBA bytes to luminance
pub fn rgba_to_luma(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let rgba = &rgba[..pixel_count * 4];
    if pixel_count >= PARALLEL_THRESHOLD {
        rgba.par_chunks_exact(4).map(pixel_luma).collect()
    } else {
        rgba.chunks_exact(4).map(pixel_luma).collect()
    }
}
