//! Engine error taxonomy
//!
//! Player-visible failures (a life lost, the timer expiring) are normal
//! state-machine output and never show up here. These errors mean the call
//! was rejected and the session was left as it was before the call.

use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("coordinate ({row}, {col}) is outside the grid")]
    OutOfBounds { row: i8, col: i8 },

    #[error("cascade did not settle after {iterations} iterations")]
    CascadeDivergence { iterations: u32 },

    #[error("level index {index} is beyond the {count} defined levels")]
    InvalidLevelIndex { index: usize, count: usize },

    #[error("level {index} is locked ({unlocked} unlocked)")]
    LevelLocked { index: usize, unlocked: usize },

    #[error("a session needs at least one level")]
    NoLevels,

    #[error("level {index} is invalid: {reason}")]
    InvalidLevel { index: usize, reason: &'static str },

    #[error("tile palette is empty")]
    EmptyPalette,
}

impl EngineError {
    /// Stable machine-readable code (used by the protocol adapter)
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::OutOfBounds { .. } => "out_of_bounds",
            EngineError::CascadeDivergence { .. } => "cascade_divergence",
            EngineError::InvalidLevelIndex { .. } => "invalid_level_index",
            EngineError::LevelLocked { .. } => "level_locked",
            EngineError::NoLevels => "no_levels",
            EngineError::InvalidLevel { .. } => "invalid_level",
            EngineError::EmptyPalette => "empty_palette",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
