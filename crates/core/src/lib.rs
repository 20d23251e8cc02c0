//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the tile-matching rules, state management, and
//! simulation logic. It has **no dependencies** on rendering, networking, or
//! I/O:
//!
//! - **Deterministic**: the same tile source yields identical sessions
//! - **Portable**: runs headless, behind a line protocol, or under a UI
//! - **Copyable**: the grid is a flat 64-cell array, cheap to snapshot and restore
//!
//! # Module Structure
//!
//! - [`grid`]: 8x8 board of colors, bounds-checked access and swaps
//! - [`rng`]: tile sources (seeded LCG and scripted)
//! - [`matcher`]: horizontal/vertical run detection
//! - [`cascade`]: repeated match-and-refill until the grid settles
//! - [`obstacles`]: per-level obstacle overlay
//! - [`level`]: objectives and level definitions
//! - [`scoring`]: match points and objective progress
//! - [`session`]: the session state machine (lives, timer, levels, events)
//! - [`snapshot`]: read-only views for rendering
//!
//! # Rules
//!
//! - A run is three or more equal colors in a row or column
//! - Matched cells are replaced in place by freshly drawn colors; there is no gravity
//! - Only orthogonally adjacent tiles can be swapped; a swap is kept even when
//!   it forms no run
//! - A level is won when the settled grid holds enough cells of the target color
//! - Letting the level timer run out costs one life; losing the last life ends the game
//!
//! # Example
//!
//! ```
//! use tilematch_core::{default_levels, RandomTileSource, SessionController};
//! use tilematch_types::{Coord, Phase};
//!
//! let mut session = SessionController::new(default_levels(), RandomTileSource::new(42)).unwrap();
//! assert_eq!(session.phase(), Phase::Playing);
//!
//! // Select a tile, then an adjacent one to swap
//! session.select_tile(Coord::new(0, 0)).unwrap();
//! session.select_tile(Coord::new(0, 1)).unwrap();
//!
//! // One second of countdown
//! session.tick();
//! assert_eq!(session.phase(), Phase::Playing);
//! assert!(session.state().time_remaining_secs < 60);
//! ```
//!
//! # Timing
//!
//! The core has no clock of its own. The host calls
//! [`SessionController::tick`](session::SessionController::tick) and
//! [`SessionController::regen_tick`](session::SessionController::regen_tick)
//! once per second.

pub mod cascade;
pub mod error;
pub mod grid;
pub mod level;
pub mod matcher;
pub mod obstacles;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tilematch_types as types;

// Re-export commonly used types for convenience
pub use cascade::{resolve, CascadeOutcome};
pub use error::{EngineError, Result};
pub use grid::Grid;
pub use level::{default_levels, Level, Objective, ObstacleSpec};
pub use matcher::{find_matches, has_match, MatchSet};
pub use obstacles::{Obstacle, ObstacleLayer};
pub use rng::{RandomTileSource, ScriptedTileSource, SimpleRng, TileSource};
pub use scoring::{calculate_match_score, evaluate_objective, ObjectiveProgress};
pub use session::{SelectOutcome, SessionConfig, SessionController, SessionState};
pub use snapshot::SessionSnapshot;
