//! The membership bitmap and its conversion to a grayscale image.

use errors::MandelbrotError;
use image::png::PNGEncoder;
use image::ColorType;
use std::fs::File;
use std::path::Path;

/// A square grid of cells, 1 for points inside the set and 0 for
/// points that escaped.  Stored row-major; row `j` holds the points
/// whose imaginary part is the `j`th step up from the low bound.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    size: usize,
    cells: Vec<u8>,
}

impl Bitmap {
    /// Assembles a bitmap out of rows.  Every row must be exactly
    /// `rows.len()` cells wide; the renderers guarantee it.
    pub(crate) fn from_rows(rows: Vec<Vec<u8>>) -> Bitmap {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            assert_eq!(row.len(), size, "bitmap rows must be square");
            cells.extend(row);
        }
        Bitmap { size, cells }
    }

    /// The width and height of the bitmap.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The cells of one row.
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// The value of the cell at `row`, `column`.
    pub fn get(&self, row: usize, column: usize) -> u8 {
        self.row(row)[column]
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of cells found to be inside the set.
    pub fn count_bounded(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == 1).count()
    }

    /// Scales each cell to a gray level: members are white, everything
    /// else black.
    pub fn to_grayscale(&self) -> Vec<u8> {
        self.cells.iter().map(|&cell| cell * 255).collect()
    }

    /// Writes the bitmap as an 8-bit grayscale PNG, replacing any
    /// existing file at `path`.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<(), MandelbrotError> {
        let output = File::create(path)?;
        let pixels = self.to_grayscale();
        PNGEncoder::new(output).encode(
            &pixels,
            self.size as u32,
            self.size as u32,
            ColorType::Gray(8),
        )?;
        Ok(())
    }
}
