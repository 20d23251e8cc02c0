use crate::core::{CascadeOutcome, EngineError, SelectOutcome, SessionController, TileSource};
use crate::types::{Coord, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    NotPlayable,
    OutOfBounds,
    NotAdjacent,
    Engine(EngineError),
}

impl SwapError {
    pub fn code(self) -> &'static str {
        match self {
            SwapError::NotPlayable => "not_playable",
            SwapError::OutOfBounds | SwapError::NotAdjacent => "invalid_swap",
            SwapError::Engine(err) => err.code(),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapError::NotPlayable => "session is not accepting input",
            SwapError::OutOfBounds => "swap coordinate outside the grid",
            SwapError::NotAdjacent => "tiles are not orthogonally adjacent",
            SwapError::Engine(EngineError::CascadeDivergence { .. }) => {
                "cascade did not settle; swap rolled back"
            }
            SwapError::Engine(_) => "engine rejected the swap",
        }
    }
}

impl From<EngineError> for SwapError {
    fn from(err: EngineError) -> Self {
        SwapError::Engine(err)
    }
}

/// Swap `a` and `b` in one call, as if the player had clicked both.
///
/// Any pending selection is discarded first. On error the grid is unchanged
/// and nothing is selected.
pub fn apply_swap<S: TileSource>(
    session: &mut SessionController<S>,
    a: Coord,
    b: Coord,
) -> Result<CascadeOutcome, SwapError> {
    if session.phase() != Phase::Playing {
        return Err(SwapError::NotPlayable);
    }
    if !a.in_bounds() || !b.in_bounds() {
        return Err(SwapError::OutOfBounds);
    }
    if !a.is_adjacent(b) {
        return Err(SwapError::NotAdjacent);
    }

    session.deselect();
    session.select_tile(a)?;
    match session.select_tile(b) {
        Ok(SelectOutcome::Swapped(outcome)) => Ok(outcome),
        Ok(_) => {
            session.deselect();
            Err(SwapError::NotPlayable)
        }
        Err(err) => {
            session.deselect();
            Err(err.into())
        }
    }
}
