//! Swap hints
//!
//! Brute force over every adjacent pair: swap on a copy of the grid and keep
//! the pairs where a run passes through one of the two swapped cells. Runs
//! already on the grid do not count.

use arrayvec::ArrayVec;

use crate::core::{find_matches, Grid};
use crate::types::{Coord, GRID_HEIGHT, GRID_WIDTH};

/// Number of orthogonally adjacent pairs on the grid
pub const MAX_SWAPS: usize =
    2 * GRID_WIDTH as usize * GRID_HEIGHT as usize - GRID_WIDTH as usize - GRID_HEIGHT as usize;

pub type SwapList = ArrayVec<(Coord, Coord), MAX_SWAPS>;

/// All swaps that would form a run, each pair listed once with the
/// row-major smaller cell first
pub fn find_swaps(grid: &Grid) -> SwapList {
    let mut out = SwapList::new();

    for row in 0..GRID_HEIGHT as i8 {
        for col in 0..GRID_WIDTH as i8 {
            let a = Coord::new(row, col);
            for b in [Coord::new(row, col + 1), Coord::new(row + 1, col)] {
                if b.in_bounds() && forms_run(grid, a, b) {
                    out.push((a, b));
                }
            }
        }
    }

    out
}

fn forms_run(grid: &Grid, a: Coord, b: Coord) -> bool {
    let mut work = *grid;
    if work.swap(a, b).is_err() {
        return false;
    }
    let matches = find_matches(&work);
    matches.contains(a) || matches.contains(b)
}
