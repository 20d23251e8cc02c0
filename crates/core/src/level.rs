//! Level definitions
//!
//! Levels are static configuration handed to the session at construction.
//! Loading them from files is the adapter's job; this module only holds the
//! data and validates it.

use crate::error::{EngineError, Result};
use crate::types::{Color, Coord, ObstacleKind, DEFAULT_TIME_LIMIT_SECS};

/// Win condition: at least `target_count` cells of `target_color` on the
/// settled grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Objective {
    pub target_color: Color,
    pub target_count: u32,
}

impl Objective {
    pub fn new(target_color: Color, target_count: u32) -> Self {
        Self {
            target_color,
            target_count,
        }
    }

    /// Human-readable goal, e.g. "Collect 10 red tiles"
    pub fn describe(&self) -> String {
        format!(
            "Collect {} {} tiles",
            self.target_count,
            self.target_color.as_str()
        )
    }

    pub fn is_met(&self, count: usize) -> bool {
        count as u64 >= self.target_count as u64
    }
}

/// Obstacle placement in a level definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleSpec {
    pub coord: Coord,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub objective: Objective,
    pub obstacles: Vec<ObstacleSpec>,
    pub time_limit_secs: u32,
}

impl Level {
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            obstacles: Vec::new(),
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
        }
    }

    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    pub fn with_obstacle(mut self, coord: Coord, kind: ObstacleKind) -> Self {
        self.obstacles.push(ObstacleSpec { coord, kind });
        self
    }

    /// Check a level for use at position `index`
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.time_limit_secs == 0 {
            return Err(EngineError::InvalidLevel {
                index,
                reason: "time limit must be positive",
            });
        }
        if self.obstacles.iter().any(|o| !o.coord.in_bounds()) {
            return Err(EngineError::InvalidLevel {
                index,
                reason: "obstacle outside the grid",
            });
        }
        Ok(())
    }
}

/// The two-level set used when no level file is supplied
pub fn default_levels() -> Vec<Level> {
    vec![
        Level::new(Objective::new(Color::Red, 10))
            .with_obstacle(Coord::new(2, 2), ObstacleKind::Jelly)
            .with_obstacle(Coord::new(4, 4), ObstacleKind::Chocolate),
        Level::new(Objective::new(Color::Blue, 15))
            .with_obstacle(Coord::new(3, 3), ObstacleKind::Licorice)
            .with_obstacle(Coord::new(5, 5), ObstacleKind::Jelly),
    ]
}
