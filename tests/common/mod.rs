//! Stub codec for driving `BarcodeStudio` without a real backend.
#![allow(dead_code)]

use barcode_studio::encoder::CodecParams;
use barcode_studio::encoder::bitmap::{INK, encode_png, paint_modules};
use barcode_studio::{BarcodeCodec, CodecError, DecodedResult, EncodedSymbol, ModuleGrid, Point, Symbology};
use image::{Rgba, RgbaImage};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Encodes the content's bits as modules and "decodes" by locating ink.
#[derive(Default)]
pub struct StubCodec {
    /// Hand back an empty module grid
    pub empty_grid: bool,
    /// Fail every decode call
    pub fail_decode: bool,
    /// Text reported for every located symbol
    pub text: String,
    /// Symbology identifier reported with results
    pub symbology_identifier: Option<String>,
    /// Number of encode calls seen
    pub encodes: AtomicUsize,
}

impl StubCodec {
    pub fn reading(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn encode_calls(&self) -> usize {
        self.encodes.load(Ordering::SeqCst)
    }
}

/// One row of bits for linear symbols, one row per byte otherwise.
pub fn content_grid(content: &str, linear: bool) -> ModuleGrid {
    let bits = |b: u8| (0..8).rev().map(move |i| (b >> i) & 1 == 1);
    if linear {
        let row: Vec<bool> = content.bytes().flat_map(bits).collect();
        ModuleGrid::from_rows(&[row])
    } else {
        let rows: Vec<Vec<bool>> = content.bytes().map(|b| bits(b).collect()).collect();
        ModuleGrid::from_rows(&rows)
    }
}

impl BarcodeCodec for StubCodec {
    fn encode(
        &self,
        content: &str,
        symbology: Symbology,
        params: &CodecParams,
    ) -> Result<EncodedSymbol, CodecError> {
        self.encodes.fetch_add(1, Ordering::SeqCst);
        let numeric = matches!(
            symbology,
            Symbology::Ean8 | Symbology::Ean13 | Symbology::UpcA | Symbology::UpcE
        );
        if numeric && !content.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::Rejected("contents must be digits".to_string()));
        }

        let modules = if self.empty_grid {
            ModuleGrid::default()
        } else {
            content_grid(content, symbology.is_1d())
        };
        let image = paint_modules(&modules, params.width, params.height);
        Ok(EncodedSymbol { image, modules })
    }

    fn decode(&self, image: &RgbaImage, _try_harder: bool) -> Result<Vec<DecodedResult>, CodecError> {
        if self.fail_decode {
            return Err(CodecError::Failed("stub failure".to_string()));
        }

        let ink: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        if ink.is_empty() {
            return Ok(Vec::new());
        }
        let min_x = ink.iter().map(|p| p.0).min().unwrap_or(0) as f32;
        let min_y = ink.iter().map(|p| p.1).min().unwrap_or(0) as f32;
        let max_x = ink.iter().map(|p| p.0).max().unwrap_or(0) as f32 + 1.0;
        let max_y = ink.iter().map(|p| p.1).max().unwrap_or(0) as f32 + 1.0;

        let mut result = DecodedResult::new(self.text.clone(), Symbology::QrCode).with_points(vec![
            Point::new(min_x, min_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
            Point::new(min_x, max_y),
        ]);
        result.metadata.symbology_identifier = self.symbology_identifier.clone();
        Ok(vec![result])
    }
}

/// White PNG with a black block at (x, y) of size w x h
pub fn png_with_block(width: u32, height: u32, x: u32, y: u32, w: u32, h: u32) -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    for py in y..y + h {
        for px in x..x + w {
            img.put_pixel(px, py, INK);
        }
    }
    encode_png(&img).unwrap()
}
