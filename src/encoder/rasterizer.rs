//! Module grid to vector (SVG) conversion.
//!
//! Ink modules are merged into rectangles with a single row-major pass:
//! each horizontal run of ink is grown downward while the rows below carry
//! ink across exactly the same columns. Cells taken by a rectangle are
//! cleared on a working copy, so every ink module lands in exactly one
//! rectangle. This is fast, not minimal.

use crate::error::{BarcodeError, Result};
use crate::models::{Margins, ModuleGrid};
use std::borrow::Cow;
use std::fmt;

/// Extra height reserved under the symbol for the label, on top of the font size
pub const LABEL_BAND_PADDING: u32 = 8;

/// Axis-aligned filled rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl InkRect {
    /// Check if the rectangle covers (x, y)
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Check if two rectangles share any cell
    pub fn overlaps(&self, other: &InkRect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Label placed under a linear symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    /// Text to print (unescaped)
    pub text: String,
    /// Font size in output units
    pub font_size: u32,
}

/// How module cells map to output units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorLayout {
    /// Outer margins in output units
    pub margins: Margins,
    /// Width of one module
    pub cell_width: u32,
    /// Height of one module
    pub cell_height: u32,
    /// Optional label under the symbol
    pub label: Option<TextLabel>,
}

impl VectorLayout {
    /// One output unit per module
    pub fn new(margins: Margins) -> Self {
        Self {
            margins,
            cell_width: 1,
            cell_height: 1,
            label: None,
        }
    }

    /// Scale cells so the grid fills roughly `width` x `height`.
    ///
    /// Each axis is scaled independently; a one-row linear grid therefore
    /// becomes full-height bars.
    pub fn fit(grid: &ModuleGrid, width: u32, height: u32, margins: Margins) -> Self {
        let (cell_width, cell_height) = cell_size(grid, width, height);
        Self {
            margins,
            cell_width,
            cell_height,
            label: None,
        }
    }

    /// Attach a label
    pub fn with_label(mut self, text: impl Into<String>, font_size: u32) -> Self {
        self.label = Some(TextLabel {
            text: text.into(),
            font_size,
        });
        self
    }
}

/// Integer module size that fits a grid into `width` x `height` (at least 1)
pub fn cell_size(grid: &ModuleGrid, width: u32, height: u32) -> (u32, u32) {
    let scale = |target: u32, modules: usize| {
        if modules == 0 {
            1
        } else {
            (target / modules as u32).max(1)
        }
    };
    (scale(width, grid.width()), scale(height, grid.height()))
}

/// Label with its baseline position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLabel {
    /// Text to print (unescaped)
    pub text: String,
    /// Horizontal centre
    pub x: u32,
    /// Baseline
    pub y: u32,
    /// Font size
    pub font_size: u32,
}

/// Vector rendering of a module grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorOutput {
    /// Document width
    pub width: u32,
    /// Document height
    pub height: u32,
    /// Ink rectangles in emission order, in output units
    pub rects: Vec<InkRect>,
    /// Optional trailing label
    pub label: Option<PlacedLabel>,
}

impl VectorOutput {
    /// Serialize as an SVG document
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VectorOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(
            f,
            r##"<rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
            self.width, self.height
        )?;
        for r in &self.rects {
            writeln!(
                f,
                r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#000000"/>"##,
                r.x, r.y, r.width, r.height
            )?;
        }
        if let Some(label) = &self.label {
            writeln!(
                f,
                r##"<text x="{}" y="{}" font-family="monospace" font-size="{}" text-anchor="middle" fill="#000000">{}</text>"##,
                label.x,
                label.y,
                label.font_size,
                escape_xml(&label.text)
            )?;
        }
        write!(f, "</svg>")
    }
}

/// Merge ink modules into rectangles, in module units.
///
/// The input grid is left untouched; consumed cells are cleared on a copy.
pub fn merge_runs(grid: &ModuleGrid) -> Vec<InkRect> {
    let (w, h) = (grid.width(), grid.height());
    let mut work = grid.clone();
    let mut rects = Vec::new();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if !work.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            while x < w && work.get(x, y) {
                work.set(x, y, false);
                x += 1;
            }

            let mut height = 1;
            while y + height < h && (start..x).all(|cx| work.get(cx, y + height)) {
                for cx in start..x {
                    work.set(cx, y + height, false);
                }
                height += 1;
            }

            rects.push(InkRect {
                x: start as u32,
                y: y as u32,
                width: (x - start) as u32,
                height: height as u32,
            });
        }
    }

    rects
}

/// Convert a module grid into vector output.
///
/// Rectangles are scaled by the layout's cell size and offset by the
/// margins. A label, when present, is centred under the grid with its
/// baseline one font size below it, inside a band of `font_size + 8`.
pub fn rasterize(grid: &ModuleGrid, layout: &VectorLayout) -> Result<VectorOutput> {
    if grid.is_empty() {
        return Err(BarcodeError::EmptyGrid);
    }

    let VectorLayout {
        margins,
        cell_width: cw,
        cell_height: ch,
        ..
    } = *layout;
    let content_w = grid.width() as u32 * cw;
    let content_h = grid.height() as u32 * ch;

    let rects: Vec<InkRect> = merge_runs(grid)
        .into_iter()
        .map(|r| InkRect {
            x: margins.left + r.x * cw,
            y: margins.top + r.y * ch,
            width: r.width * cw,
            height: r.height * ch,
        })
        .collect();

    let label = layout.label.as_ref().map(|l| PlacedLabel {
        text: l.text.clone(),
        x: margins.left + content_w / 2,
        y: margins.top + content_h + l.font_size,
        font_size: l.font_size,
    });
    let band = layout
        .label
        .as_ref()
        .map_or(0, |l| l.font_size + LABEL_BAND_PADDING);

    tracing::debug!(
        modules = grid.ink_count(),
        rects = rects.len(),
        "Merged ink modules into rectangles"
    );

    Ok(VectorOutput {
        width: content_w + margins.horizontal(),
        height: content_h + margins.vertical() + band,
        rects,
        label,
    })
}

/// Escape text for use inside XML character data or attributes
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
