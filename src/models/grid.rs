/// Module grid of a generated symbol: one bit per module, `true` = ink.
///
/// Stored at native symbol resolution without any quiet zone. Bits are
/// packed row-major, eight modules per byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ModuleGrid {
    /// Create an empty (all white) grid
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a grid from rows of booleans. Short rows are padded with white.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, &ink) in row.as_ref().iter().enumerate() {
                grid.set(x, y, ink);
            }
        }
        grid
    }

    /// Parse a picture of the grid: `#` or `1` is ink, anything else is white.
    /// One line per row.
    pub fn from_ascii(picture: &str) -> Self {
        let rows: Vec<Vec<bool>> = picture
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().map(|c| c == '#' || c == '1').collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Grid width in modules
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in modules
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the grid has no cells at all
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get module at (x, y); out of range reads as white
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set module at (x, y); out of range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, ink: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        if ink {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Number of ink modules
    pub fn ink_count(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Coordinates of every ink module in row-major order
    pub fn ink_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get(x, y))
    }
}

impl Default for ModuleGrid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
