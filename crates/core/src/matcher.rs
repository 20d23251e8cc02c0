//! Match detection - finds runs of three or more identical colors
//!
//! Rows are scanned left to right and columns top to bottom. Every cell of a
//! run is marked, so a run of five marks five cells. Results are collected in
//! a [`MatchSet`], a 64-bit cell mask: a cell that sits on both a horizontal
//! and a vertical run is marked once.

use crate::grid::Grid;
use crate::types::{Coord, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH, MIN_RUN};

/// A set of grid cells, one bit per row-major cell index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchSet {
    mask: u64,
}

impl MatchSet {
    pub const fn new() -> Self {
        Self { mask: 0 }
    }

    /// Insert a cell; returns false when it was already present or out of bounds
    pub fn insert(&mut self, coord: Coord) -> bool {
        match coord.index() {
            Some(idx) => self.insert_index(idx),
            None => false,
        }
    }

    #[inline(always)]
    fn insert_index(&mut self, idx: usize) -> bool {
        let bit = 1u64 << idx;
        let fresh = self.mask & bit == 0;
        self.mask |= bit;
        fresh
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord
            .index()
            .map(|idx| self.mask & (1u64 << idx) != 0)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Raw cell mask (bit `row * 8 + col`)
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.indices().filter_map(Coord::from_index)
    }

    pub(crate) fn indices(&self) -> impl Iterator<Item = usize> {
        let mask = self.mask;
        (0..GRID_CELLS).filter(move |&i| mask & (1u64 << i) != 0)
    }
}

impl FromIterator<Coord> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        for coord in iter {
            set.insert(coord);
        }
        set
    }
}

/// Mark every cell that belongs to a run of `MIN_RUN` or more
///
/// Pure: the grid is only read.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let width = GRID_WIDTH as usize;
    let height = GRID_HEIGHT as usize;
    let mut set = MatchSet::new();

    // Horizontal runs
    for row in 0..height {
        scan_line(grid, &mut set, (0..width).map(|col| row * width + col));
    }

    // Vertical runs
    for col in 0..width {
        scan_line(grid, &mut set, (0..height).map(|row| row * width + col));
    }

    set
}

/// Whether the grid holds at least one run
pub fn has_match(grid: &Grid) -> bool {
    !find_matches(grid).is_empty()
}

/// Scan one line of cell indices and mark runs of identical colors
fn scan_line(grid: &Grid, set: &mut MatchSet, line: impl Iterator<Item = usize>) {
    let mut run_start = 0usize;
    let mut run: [usize; GRID_CELLS] = [0; GRID_CELLS];
    let mut len = 0usize;

    for idx in line {
        if len > 0 && grid.at(idx) != grid.at(run[run_start]) {
            mark_run(set, &run[run_start..len]);
            run_start = len;
        }
        run[len] = idx;
        len += 1;
    }
    mark_run(set, &run[run_start..len]);
}

#[inline(always)]
fn mark_run(set: &mut MatchSet, cells: &[usize]) {
    if cells.len() >= MIN_RUN {
        for &idx in cells {
            set.insert_index(idx);
        }
    }
}
