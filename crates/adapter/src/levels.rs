//! Level file loading
//!
//! ```json
//! {"levels":[{"target_color":"red","target_count":10,"time_limit_secs":60,
//!             "obstacles":[{"row":2,"col":2,"kind":"jelly"}]}]}
//! ```
//!
//! `time_limit_secs` and `obstacles` are optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{EngineError, Level, Objective};
use crate::types::{Color, Coord, ObstacleKind, DEFAULT_TIME_LIMIT_SECS};

#[derive(Debug, Error)]
pub enum LevelFileError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed level file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level {index}: unknown color {name:?}")]
    UnknownColor { index: usize, name: String },

    #[error("level {index}: unknown obstacle kind {name:?}")]
    UnknownObstacle { index: usize, name: String },

    #[error(transparent)]
    Invalid(#[from] EngineError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    pub levels: Vec<LevelEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelEntry {
    pub target_color: String,
    pub target_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_secs: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub obstacles: Vec<ObstacleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleEntry {
    pub row: i8,
    pub col: i8,
    pub kind: String,
}

impl LevelEntry {
    fn to_level(&self, index: usize) -> Result<Level, LevelFileError> {
        let color =
            Color::from_str(&self.target_color).ok_or_else(|| LevelFileError::UnknownColor {
                index,
                name: self.target_color.clone(),
            })?;

        let mut level = Level::new(Objective::new(color, self.target_count))
            .with_time_limit(self.time_limit_secs.unwrap_or(DEFAULT_TIME_LIMIT_SECS));
        for o in &self.obstacles {
            let kind =
                ObstacleKind::from_str(&o.kind).ok_or_else(|| LevelFileError::UnknownObstacle {
                    index,
                    name: o.kind.clone(),
                })?;
            level = level.with_obstacle(Coord::new(o.row, o.col), kind);
        }

        level.validate(index)?;
        Ok(level)
    }
}

/// Parse and validate a level set
pub fn parse_levels(json: &str) -> Result<Vec<Level>, LevelFileError> {
    let file: LevelFile = serde_json::from_str(json)?;
    if file.levels.is_empty() {
        return Err(EngineError::NoLevels.into());
    }
    file.levels
        .iter()
        .enumerate()
        .map(|(i, entry)| entry.to_level(i))
        .collect()
}

pub fn load_levels(path: impl AsRef<Path>) -> Result<Vec<Level>, LevelFileError> {
    let text = std::fs::read_to_string(path)?;
    parse_levels(&text)
}
