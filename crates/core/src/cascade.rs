//! Cascade resolution - detect, replace, repeat until the grid settles
//!
//! Each pass replaces every matched cell at once with an independently drawn
//! color (no gravity). Passes repeat until a pass finds no run. The number of
//! passes is bounded; exceeding the bound is reported as
//! [`EngineError::CascadeDivergence`].

use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::rng::TileSource;

/// Result of a settled cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeOutcome {
    /// Cells replaced across all passes (a cell replaced twice counts twice)
    pub total_matched: u32,
    /// Passes that found at least one run
    pub iterations: u32,
    /// Cells marked by the first pass (empty when the grid was already stable)
    pub first_pass: MatchSet,
}

impl CascadeOutcome {
    pub fn matched(&self) -> bool {
        self.iterations > 0
    }
}

/// Resolve all runs on `grid`
///
/// Works on a copy; `grid` is only written when the cascade settles within
/// `max_iterations` passes, so a divergent cascade leaves it untouched.
pub fn resolve<S: TileSource + ?Sized>(
    grid: &mut Grid,
    source: &mut S,
    max_iterations: u32,
) -> Result<CascadeOutcome> {
    let mut work = *grid;
    let mut outcome = CascadeOutcome::default();

    loop {
        let matches = find_matches(&work);
        if matches.is_empty() {
            break;
        }
        if outcome.iterations >= max_iterations {
            warn!(
                iterations = outcome.iterations,
                pending = matches.len(),
                "cascade did not settle"
            );
            return Err(EngineError::CascadeDivergence {
                iterations: outcome.iterations,
            });
        }
        if outcome.iterations == 0 {
            outcome.first_pass = matches;
        }

        for idx in matches.indices() {
            work.put(idx, source.next_color());
        }

        outcome.total_matched += matches.len() as u32;
        outcome.iterations += 1;
        debug!(
            pass = outcome.iterations,
            replaced = matches.len(),
            "cascade pass"
        );
    }

    *grid = work;
    Ok(outcome)
}
