//! Obstacle layer - per-cell obstacle state for the active level
//!
//! Obstacles sit on top of tiles and never move. They do not take part in
//! match detection; the only interaction is an explicit clear.

use crate::level::ObstacleSpec;
use crate::types::{Coord, ObstacleKind, GRID_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Obstacle {
    pub coord: Coord,
    pub kind: ObstacleKind,
    pub cleared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleLayer {
    cells: [Option<Obstacle>; GRID_CELLS],
}

impl ObstacleLayer {
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    /// Build from a level's obstacle list. Out-of-grid entries are skipped
    /// (levels are validated before they get here); a later entry for the
    /// same cell replaces an earlier one.
    pub fn from_specs(specs: &[ObstacleSpec]) -> Self {
        let mut layer = Self::new();
        for spec in specs {
            if let Some(idx) = spec.coord.index() {
                layer.cells[idx] = Some(Obstacle {
                    coord: spec.coord,
                    kind: spec.kind,
                    cleared: false,
                });
            }
        }
        layer
    }

    pub fn obstacle_at(&self, coord: Coord) -> Option<&Obstacle> {
        coord.index().and_then(|idx| self.cells[idx].as_ref())
    }

    /// Mark the obstacle at `coord` cleared
    ///
    /// Idempotent. Returns true only when this call changed something.
    pub fn clear(&mut self, coord: Coord) -> bool {
        let Some(idx) = coord.index() else {
            return false;
        };
        match self.cells[idx].as_mut() {
            Some(obstacle) if !obstacle.cleared => {
                obstacle.cleared = true;
                true
            }
            _ => false,
        }
    }

    /// All obstacles, cleared or not, in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.cells.iter().flatten()
    }

    /// Number of obstacles still standing
    pub fn remaining(&self) -> usize {
        self.iter().filter(|o| !o.cleared).count()
    }
}

impl Default for ObstacleLayer {
    fn default() -> Self {
        Self::new()
    }
}
