//! Scoring module - points for cleared tiles and objective progress
//!
//! Every tile replaced by a cascade is worth a fixed number of points; chained
//! passes are not multiplied. Objective progress is a plain count of target
//! colored cells on the settled grid.

use crate::grid::Grid;
use crate::level::Objective;

/// Points awarded for a settled cascade
pub fn calculate_match_score(total_matched: u32, points_per_tile: u32) -> u32 {
    total_matched.saturating_mul(points_per_tile)
}

/// Objective evaluation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectiveProgress {
    /// Cells of the target color currently on the grid
    pub count: u32,
    /// Cells required
    pub target: u32,
}

impl ObjectiveProgress {
    pub fn is_met(&self) -> bool {
        self.count >= self.target
    }
}

/// Count the target color on `grid`
pub fn evaluate_objective(grid: &Grid, objective: &Objective) -> ObjectiveProgress {
    ObjectiveProgress {
        count: grid.count(objective.target_color) as u32,
        target: objective.target_count,
    }
}
