//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, protocol adapter, presentation layers).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed 8x8 grid:
//!
//! - **Width**: 8 columns (indexed 0-7)
//! - **Height**: 8 rows (indexed 0-7)
//! - **Cells**: stored row-major, cell index = `row * 8 + col`
//!
//! # Session Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `DEFAULT_MAX_LIVES` | 5 | Lives at session start |
//! | `POINTS_PER_TILE` | 10 | Score for each matched tile |
//! | `TICK_SECS` | 1 | Countdown decrement per tick |
//! | `LIFE_REGEN_SECS` | 300 | Regeneration period for one life |
//! | `CASCADE_ITERATION_CAP` | 1000 | Safety bound on cascade passes |
//! | `DEFAULT_TIME_LIMIT_SECS` | 60 | Level time limit when none is given |
//!
//! # Examples
//!
//! ```
//! use tilematch_types::{Color, Coord, Stimulus, GRID_WIDTH, GRID_HEIGHT};
//!
//! // Parse a color (case-insensitive)
//! assert_eq!(Color::from_str("Red"), Some(Color::Red));
//!
//! // Orthogonal neighbours are adjacent, diagonals are not
//! let a = Coord::new(0, 0);
//! assert!(a.is_adjacent(Coord::new(0, 1)));
//! assert!(!a.is_adjacent(Coord::new(1, 1)));
//!
//! // Stimuli carry their protocol names
//! assert_eq!(Stimulus::SelectTile(a).as_str(), "select");
//!
//! assert_eq!(GRID_WIDTH, 8);
//! assert_eq!(GRID_HEIGHT, 8);
//! ```

/// Grid width in cells (8 columns)
pub const GRID_WIDTH: u8 = 8;

/// Grid height in cells (8 rows)
pub const GRID_HEIGHT: u8 = 8;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Number of distinct tile colors
pub const COLOR_COUNT: usize = 5;

/// Shortest run of identical colors that is detected as a match
pub const MIN_RUN: usize = 3;

/// Lives at session start and the regeneration ceiling
pub const DEFAULT_MAX_LIVES: u8 = 5;

/// Score awarded for each tile removed by a cascade
pub const POINTS_PER_TILE: u32 = 10;

/// Seconds removed from the level countdown by one tick
pub const TICK_SECS: u32 = 1;

/// Seconds of regeneration clock needed to restore one life
pub const LIFE_REGEN_SECS: u32 = 300;

/// Maximum detect/replace passes before a cascade is declared divergent
pub const CASCADE_ITERATION_CAP: u32 = 1000;

/// Time limit applied to level definitions that do not carry one
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;

/// Tile colors
///
/// Colors carry no ordering semantics; only equality matters for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
}

impl Color {
    /// Every color, in declaration order. This is the default palette.
    pub const ALL: [Color; COLOR_COUNT] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Orange,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tilematch_types::Color;
    ///
    /// assert_eq!(Color::from_str("blue"), Some(Color::Blue));
    /// assert_eq!(Color::from_str("ORANGE"), Some(Color::Orange));
    /// assert_eq!(Color::from_str("purple"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "orange" => Some(Color::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
        }
    }
}

/// A grid position
///
/// Signed so that out-of-range input (e.g. `-1`) is representable and can be
/// rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Whether the coordinate lies inside the 8x8 grid
    pub fn in_bounds(&self) -> bool {
        self.row >= 0
            && self.row < GRID_HEIGHT as i8
            && self.col >= 0
            && self.col < GRID_WIDTH as i8
    }

    /// Row-major cell index, `None` when out of bounds
    ///
    /// # Examples
    ///
    /// ```
    /// use tilematch_types::Coord;
    ///
    /// assert_eq!(Coord::new(0, 0).index(), Some(0));
    /// assert_eq!(Coord::new(1, 0).index(), Some(8));
    /// assert_eq!(Coord::new(7, 7).index(), Some(63));
    /// assert_eq!(Coord::new(8, 0).index(), None);
    /// assert_eq!(Coord::new(0, -1).index(), None);
    /// ```
    #[inline(always)]
    pub fn index(&self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some((self.row as usize) * (GRID_WIDTH as usize) + (self.col as usize))
    }

    /// Inverse of [`Coord::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= GRID_CELLS {
            return None;
        }
        let width = GRID_WIDTH as usize;
        Some(Self::new((index / width) as i8, (index % width) as i8))
    }

    /// Orthogonal adjacency: Manhattan distance exactly 1 along a single axis
    pub fn is_adjacent(&self, other: Coord) -> bool {
        let dr = (self.row as i16 - other.row as i16).abs();
        let dc = (self.col as i16 - other.col as i16).abs();
        dr + dc == 1
    }
}

/// Obstacle kinds
///
/// Kinds differ only in presentation; every kind is removed by an explicit
/// clear action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Jelly,
    Chocolate,
    Licorice,
}

impl ObstacleKind {
    /// Parse obstacle kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "jelly" => Some(ObstacleKind::Jelly),
            "chocolate" => Some(ObstacleKind::Chocolate),
            "licorice" => Some(ObstacleKind::Licorice),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Jelly => "jelly",
            ObstacleKind::Chocolate => "chocolate",
            ObstacleKind::Licorice => "licorice",
        }
    }
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The last level's objective was met
    Victory,
    /// Lives ran out
    Defeat,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Victory => "victory",
            Outcome::Defeat => "defeat",
        }
    }
}

/// Session state machine phases
///
/// `Loading`, `LevelComplete` and `LevelFailed` are transient: the controller
/// passes through them within a single stimulus. Between stimuli a session is
/// either `Playing` or `GameComplete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Loading,
    Playing,
    LevelComplete,
    LevelFailed,
    GameComplete(Outcome),
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Playing => "playing",
            Phase::LevelComplete => "level_complete",
            Phase::LevelFailed => "level_failed",
            Phase::GameComplete(_) => "game_complete",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameComplete(_))
    }
}

/// External stimuli accepted by a session
///
/// Player input and scheduler ticks share this type so that a single dispatch
/// queue can serialize them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stimulus {
    /// Click on a tile: select, swap with the selection, or reselect
    SelectTile(Coord),
    /// One second of level countdown
    Tick,
    /// One second of life regeneration clock
    RegenTick,
    /// Remove the obstacle at a cell
    ClearObstacle(Coord),
    /// Abandon the current level (one life) for an unlocked level
    SelectLevel(usize),
}

impl Stimulus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stimulus::SelectTile(_) => "select",
            Stimulus::Tick => "tick",
            Stimulus::RegenTick => "regen_tick",
            Stimulus::ClearObstacle(_) => "clear_obstacle",
            Stimulus::SelectLevel(_) => "select_level",
        }
    }
}

/// Notifications emitted by the session for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A swap settled; `count` tiles were replaced over `iterations` passes
    MatchResolved { count: u32, iterations: u32 },
    /// A level was (re)loaded
    LevelChanged { index: usize, restarted: bool },
    /// The countdown expired and a life was spent
    LifeLost { lives: u8 },
    /// The regeneration clock restored a life
    LifeRestored { lives: u8 },
    /// An obstacle was cleared by the player
    ObstacleCleared { coord: Coord },
    /// The session reached its terminal phase
    GameComplete { outcome: Outcome },
}

impl SessionEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEvent::MatchResolved { .. } => "match_resolved",
            SessionEvent::LevelChanged { .. } => "level_changed",
            SessionEvent::LifeLost { .. } => "life_lost",
            SessionEvent::LifeRestored { .. } => "life_restored",
            SessionEvent::ObstacleCleared { .. } => "obstacle_cleared",
            SessionEvent::GameComplete { .. } => "game_complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_defaults() {
        assert_eq!(GRID_CELLS, 64);
        assert_eq!(MIN_RUN, 3);
        assert_eq!(DEFAULT_MAX_LIVES, 5);
        assert_eq!(CASCADE_ITERATION_CAP, 1000);
    }

    #[test]
    fn color_string_roundtrip() {
        for color in Color::ALL {
            assert_eq!(Color::from_str(color.as_str()), Some(color));
        }
    }

    #[test]
    fn coord_index_inverse() {
        for i in 0..GRID_CELLS {
            let c = Coord::from_index(i).unwrap();
            assert_eq!(c.index(), Some(i));
        }
        assert_eq!(Coord::from_index(GRID_CELLS), None);
    }

    #[test]
    fn adjacency_is_single_axis() {
        let c = Coord::new(3, 3);
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(c.is_adjacent(Coord::new(4, 3)));
        assert!(c.is_adjacent(Coord::new(3, 2)));
        assert!(c.is_adjacent(Coord::new(3, 4)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(4, 4)));
        assert!(!c.is_adjacent(Coord::new(3, 5)));
    }

    #[test]
    fn obstacle_kind_parse() {
        assert_eq!(ObstacleKind::from_str("Jelly"), Some(ObstacleKind::Jelly));
        assert_eq!(ObstacleKind::from_str("licorice"), Some(ObstacleKind::Licorice));
        assert_eq!(ObstacleKind::from_str("ice"), None);
    }
}
