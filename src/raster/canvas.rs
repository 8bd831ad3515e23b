// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

/// Highest intensity of a [Canvas] cell (white).
pub const MAX_INTENSITY: u8 = 255;

/// A fixed-size, row-major grid of grayscale intensities.
///
/// Writes outside of the grid are silently ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Canvas {
    /// Creates a white canvas with the provided dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize` or the buffer can't be allocated.
    /// Use [Canvas::try_new] to handle that case.
    pub fn new(rows: usize, cols: usize) -> Self {
        match Self::try_new(rows, cols) {
            Some(c) => c,
            None => panic!("canvas of {}x{} pixels is too large", rows, cols),
        }
    }

    /// Creates a white canvas with the provided dimensions, or returns `None`
    /// if `rows * cols` overflows `usize` or the buffer can't be allocated.
    pub fn try_new(rows: usize, cols: usize) -> Option<Self> {
        let len = rows.checked_mul(cols)?;
        let mut cells = Vec::default();
        cells.try_reserve_exact(len).ok()?;
        cells.resize(len, MAX_INTENSITY);
        Some(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: i64, col: i64) -> Option<usize> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        let col = usize::try_from(col).ok().filter(|&c| c < self.cols)?;
        Some(row * self.cols + col)
    }

    /// Returns the intensity of a cell, or `None` if it's outside of the canvas.
    pub fn get(&self, row: i64, col: i64) -> Option<u8> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Sets the intensity of a cell. Does nothing if the cell is outside of the canvas.
    pub fn set(&mut self, row: i64, col: i64, intensity: u8) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = intensity;
        }
    }

    /// Returns an iterator over the rows of the canvas.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.rows).map(|row| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Serializes the canvas as a plain (ASCII) [PGM](https://netpbm.sourceforge.net/doc/pgm.html)
    /// image, also known as the `P2` format.
    ///
    /// The writer isn't buffered internally - wrap it in a [io::BufWriter] when needed.
    pub fn write_pgm<W: io::Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "P2")?;
        writeln!(w, "# {}", env!("CARGO_PKG_NAME"))?;
        writeln!(w, "{} {}", self.cols, self.rows)?;
        writeln!(w, "{}", MAX_INTENSITY)?;

        for row in self.iter_rows() {
            let mut values = row.iter();
            if let Some(first) = values.next() {
                write!(w, "{}", first)?;
            }
            for value in values {
                write!(w, " {}", value)?;
            }
            writeln!(w)?;
        }

        w.flush()
    }

    /// Serializes the canvas into an in-memory [PGM](Canvas::write_pgm) image.
    pub fn to_pgm(&self) -> Vec<u8> {
        let mut buf = Vec::default();
        self.write_pgm(&mut buf)
            .expect("writing into a Vec<u8> is infallible");
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_white() {
        let c = Canvas::new(2, 3);
        assert_eq!(c.rows(), 2);
        assert_eq!(c.cols(), 3);
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(c.get(row, col), Some(255));
            }
        }
    }

    #[test]
    fn oversized_canvas() {
        assert_eq!(Canvas::try_new(usize::MAX, 2), None);
        assert_eq!(Canvas::try_new(2, usize::MAX / 2 + 1), None);
        assert_eq!(Canvas::try_new(2, 3), Some(Canvas::new(2, 3)));
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn oversized_canvas_panics() {
        Canvas::new(usize::MAX, usize::MAX);
    }

    #[test]
    fn set_and_get() {
        let mut c = Canvas::new(2, 3);
        c.set(1, 2, 50);
        assert_eq!(c.get(1, 2), Some(50));
        assert_eq!(c.get(2, 1), None);
        assert_eq!(c.get(0, 0), Some(255));
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut c = Canvas::new(2, 3);
        let before = c.clone();
        c.set(-1, 0, 0);
        c.set(0, -1, 0);
        c.set(2, 0, 0);
        c.set(0, 3, 0);
        c.set(i64::MIN, i64::MAX, 0);
        assert_eq!(c, before);
    }

    #[test]
    fn pgm_of_blank_canvas() {
        let c = Canvas::new(3, 3);
        let expected = "P2\n# routemap\n3 3\n255\n255 255 255\n255 255 255\n255 255 255\n";
        assert_eq!(String::from_utf8(c.to_pgm()).unwrap(), expected);
    }

    #[test]
    fn pgm_dimensions_are_columns_then_rows() {
        let mut c = Canvas::new(2, 4);
        c.set(0, 3, 7);
        c.set(1, 0, 180);
        let expected = "P2\n# routemap\n4 2\n255\n255 255 255 7\n180 255 255 255\n";
        assert_eq!(String::from_utf8(c.to_pgm()).unwrap(), expected);
    }

    #[test]
    fn pgm_of_empty_canvas() {
        let c = Canvas::new(0, 5);
        assert_eq!(String::from_utf8(c.to_pgm()).unwrap(), "P2\n# routemap\n5 0\n255\n");
    }
}
