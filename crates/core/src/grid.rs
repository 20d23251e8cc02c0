//! Grid module - the 8x8 tile container
//!
//! Every cell always holds a color; there is no empty state, so matched
//! cells are replaced in place rather than cleared.
//! Uses a flat array for cache locality and cheap copies.
//! Coordinates: (row, col) where row ranges 0..7 (top to bottom), col ranges 0..7 (left to right)

use crate::error::{EngineError, Result};
use crate::rng::TileSource;
use crate::types::{Color, Coord, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};

/// The playfield - 8 columns x 8 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Color; GRID_CELLS],
}

impl Grid {
    /// Create a grid with every cell set to `color`
    pub fn uniform(color: Color) -> Self {
        Self {
            cells: [color; GRID_CELLS],
        }
    }

    /// Fill a new grid from a tile source, row by row
    ///
    /// Runs formed by the fill are left in place.
    pub fn filled<S: TileSource + ?Sized>(source: &mut S) -> Self {
        let mut cells = [Color::Red; GRID_CELLS];
        for cell in cells.iter_mut() {
            *cell = source.next_color();
        }
        Self { cells }
    }

    /// Create from rows
    pub fn from_rows(rows: [[Color; GRID_WIDTH as usize]; GRID_HEIGHT as usize]) -> Self {
        let width = GRID_WIDTH as usize;
        let mut cells = [Color::Red; GRID_CELLS];
        for (r, row) in rows.iter().enumerate() {
            cells[r * width..(r + 1) * width].copy_from_slice(row);
        }
        Self { cells }
    }

    /// Get width of the grid
    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    /// Get height of the grid
    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    #[inline(always)]
    fn index(coord: Coord) -> Result<usize> {
        coord.index().ok_or(EngineError::OutOfBounds {
            row: coord.row,
            col: coord.col,
        })
    }

    /// Get the color at `coord`
    pub fn get(&self, coord: Coord) -> Result<Color> {
        Ok(self.cells[Self::index(coord)?])
    }

    /// Set the color at `coord`
    pub fn set(&mut self, coord: Coord, color: Color) -> Result<()> {
        let idx = Self::index(coord)?;
        self.cells[idx] = color;
        Ok(())
    }

    /// Exchange the colors of two cells
    ///
    /// Adjacency is not checked here. Both coordinates are validated before
    /// either cell is touched.
    pub fn swap(&mut self, a: Coord, b: Coord) -> Result<()> {
        let ia = Self::index(a)?;
        let ib = Self::index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Count cells holding `color`
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Color; GRID_CELLS] {
        &self.cells
    }

    /// Color at a row-major index (callers guarantee `idx < GRID_CELLS`)
    #[inline(always)]
    pub(crate) fn at(&self, idx: usize) -> Color {
        self.cells[idx]
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, idx: usize, color: Color) {
        self.cells[idx] = color;
    }

    /// Row slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> + '_ {
        self.cells.chunks_exact(GRID_WIDTH as usize)
    }

    /// Copy into a 2D array (for snapshots)
    pub fn to_rows(&self) -> [[Color; GRID_WIDTH as usize]; GRID_HEIGHT as usize] {
        let mut out = [[Color::Red; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
        out
    }
}
