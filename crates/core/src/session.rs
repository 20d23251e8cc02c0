//! Session module - the top-level state machine
//!
//! This module ties together the grid, tile source, match detection, cascades
//! and obstacles. It owns all mutable game state and advances it one stimulus
//! at a time:
//!
//! ```text
//! Loading -> Playing -> LevelComplete -> Loading (next level) | GameComplete(Victory)
//!                    -> LevelFailed   -> Loading (same level) | GameComplete(Defeat)
//! ```
//!
//! `Loading`, `LevelComplete` and `LevelFailed` are passed through within the
//! stimulus that triggers them.

use tracing::{debug, info};

use crate::cascade::{self, CascadeOutcome};
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::level::{Level, Objective};
use crate::obstacles::ObstacleLayer;
use crate::rng::{RandomTileSource, TileSource};
use crate::scoring::{calculate_match_score, evaluate_objective, ObjectiveProgress};
use crate::snapshot::SessionSnapshot;
use crate::types::*;

/// Tunables for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_lives: u8,
    pub points_per_tile: u32,
    /// Seconds of regeneration clock per restored life (0 disables regeneration)
    pub life_regen_secs: u32,
    pub cascade_iteration_cap: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_lives: DEFAULT_MAX_LIVES,
            points_per_tile: POINTS_PER_TILE,
            life_regen_secs: LIFE_REGEN_SECS,
            cascade_iteration_cap: CASCADE_ITERATION_CAP,
        }
    }
}

/// Player-facing counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub current_level_index: usize,
    pub unlocked_level_count: usize,
    pub lives: u8,
    pub score: u32,
    pub time_remaining_secs: u32,
    pub selected: Option<Coord>,
}

/// What a tile selection did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The session is not accepting input
    Ignored,
    /// Nothing was selected; `coord` is now selected
    Selected(Coord),
    /// `coord` was not adjacent to the selection and replaces it
    Reselected(Coord),
    /// The two tiles were swapped and the grid settled
    Swapped(CascadeOutcome),
}

/// One play session: owns the grid, obstacles and counters of the active
/// level and advances them one stimulus at a time
pub struct SessionController<S: TileSource = RandomTileSource> {
    levels: Vec<Level>,
    config: SessionConfig,
    source: S,
    grid: Grid,
    obstacles: ObstacleLayer,
    state: SessionState,
    phase: Phase,
    regen_clock_secs: u32,
    events: Vec<SessionEvent>,
}

impl<S: TileSource> SessionController<S> {
    /// Start a session at level 0 with default tunables
    pub fn new(levels: Vec<Level>, source: S) -> Result<Self> {
        Self::with_config(levels, source, SessionConfig::default())
    }

    pub fn with_config(levels: Vec<Level>, source: S, config: SessionConfig) -> Result<Self> {
        if levels.is_empty() {
            return Err(EngineError::NoLevels);
        }
        for (i, level) in levels.iter().enumerate() {
            level.validate(i)?;
        }

        let config = SessionConfig {
            max_lives: config.max_lives.max(1),
            ..config
        };

        let mut session = Self {
            levels,
            config,
            source,
            grid: Grid::uniform(Color::Red),
            obstacles: ObstacleLayer::new(),
            state: SessionState {
                current_level_index: 0,
                unlocked_level_count: 1,
                lives: config.max_lives,
                score: 0,
                time_remaining_secs: 0,
                selected: None,
            },
            phase: Phase::Loading,
            regen_clock_secs: 0,
            events: Vec::new(),
        };
        session.load_level(0, false);
        Ok(session)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn obstacles(&self) -> &ObstacleLayer {
        &self.obstacles
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.state.current_level_index]
    }

    pub fn objective(&self) -> &Objective {
        &self.current_level().objective
    }

    pub fn objective_progress(&self) -> ObjectiveProgress {
        evaluate_objective(&self.grid, self.objective())
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Seconds accumulated toward the next restored life
    pub fn regen_clock_secs(&self) -> u32 {
        self.regen_clock_secs
    }

    /// Take and clear the events emitted since the last call, oldest first
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a stimulus. Returns whether it changed anything.
    pub fn apply(&mut self, stimulus: Stimulus) -> Result<bool> {
        match stimulus {
            Stimulus::SelectTile(coord) => self
                .select_tile(coord)
                .map(|outcome| outcome != SelectOutcome::Ignored),
            Stimulus::Tick => Ok(self.tick()),
            Stimulus::RegenTick => Ok(self.regen_tick()),
            Stimulus::ClearObstacle(coord) => self.clear_obstacle(coord),
            Stimulus::SelectLevel(index) => self.select_level(index),
        }
    }

    /// Click on a tile
    ///
    /// With nothing selected the tile becomes the selection. With an adjacent
    /// tile selected the two are swapped, the cascade runs and the objective
    /// is checked. Any other tile replaces the selection.
    ///
    /// An out-of-bounds click is rejected with `OutOfBounds` and keeps any
    /// existing selection. On error the grid and selection are left as they
    /// were before the call.
    pub fn select_tile(&mut self, coord: Coord) -> Result<SelectOutcome> {
        if self.phase != Phase::Playing {
            return Ok(SelectOutcome::Ignored);
        }
        if !coord.in_bounds() {
            return Err(EngineError::OutOfBounds {
                row: coord.row,
                col: coord.col,
            });
        }

        match self.state.selected {
            None => {
                self.state.selected = Some(coord);
                debug!(row = coord.row, col = coord.col, "tile selected");
                Ok(SelectOutcome::Selected(coord))
            }
            Some(first) if first.is_adjacent(coord) => {
                let outcome = self.swap_and_settle(first, coord)?;
                Ok(SelectOutcome::Swapped(outcome))
            }
            Some(_) => {
                self.state.selected = Some(coord);
                debug!(row = coord.row, col = coord.col, "tile reselected");
                Ok(SelectOutcome::Reselected(coord))
            }
        }
    }

    /// Drop the current selection, returning it
    pub fn deselect(&mut self) -> Option<Coord> {
        self.state.selected.take()
    }

    fn swap_and_settle(&mut self, first: Coord, second: Coord) -> Result<CascadeOutcome> {
        let saved = self.grid;
        self.grid.swap(first, second)?;
        self.state.selected = None;

        let outcome = match cascade::resolve(
            &mut self.grid,
            &mut self.source,
            self.config.cascade_iteration_cap,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.grid = saved;
                self.state.selected = Some(first);
                return Err(err);
            }
        };

        debug!(
            from_row = first.row,
            from_col = first.col,
            to_row = second.row,
            to_col = second.col,
            matched = outcome.total_matched,
            iterations = outcome.iterations,
            "swap settled"
        );

        if outcome.matched() {
            self.state.score = self.state.score.saturating_add(calculate_match_score(
                outcome.total_matched,
                self.config.points_per_tile,
            ));
            self.events.push(SessionEvent::MatchResolved {
                count: outcome.total_matched,
                iterations: outcome.iterations,
            });
        }

        if self.objective_progress().is_met() {
            self.complete_level();
        }

        Ok(outcome)
    }

    /// One second of level countdown. Returns false when not playing.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        self.state.time_remaining_secs = self.state.time_remaining_secs.saturating_sub(TICK_SECS);
        if self.state.time_remaining_secs == 0 {
            self.fail_level();
        }
        true
    }

    /// One second of life regeneration clock
    ///
    /// Runs independently of the level countdown. The clock only accumulates
    /// while lives are below the maximum.
    pub fn regen_tick(&mut self) -> bool {
        if self.phase.is_terminal() || self.config.life_regen_secs == 0 {
            return false;
        }
        if self.state.lives >= self.config.max_lives {
            self.regen_clock_secs = 0;
            return false;
        }

        self.regen_clock_secs += TICK_SECS;
        if self.regen_clock_secs >= self.config.life_regen_secs {
            self.regen_clock_secs = 0;
            self.state.lives += 1;
            info!(lives = self.state.lives, "life restored");
            self.events.push(SessionEvent::LifeRestored {
                lives: self.state.lives,
            });
        }
        true
    }

    /// Remove the obstacle at `coord`
    ///
    /// The tile underneath is replaced with a fresh color. Runs formed this way
    /// are not resolved. Returns false when there was nothing to clear.
    pub fn clear_obstacle(&mut self, coord: Coord) -> Result<bool> {
        if self.phase != Phase::Playing {
            return Ok(false);
        }
        if !coord.in_bounds() {
            return Err(EngineError::OutOfBounds {
                row: coord.row,
                col: coord.col,
            });
        }
        if !self.obstacles.clear(coord) {
            return Ok(false);
        }

        let color = self.source.next_color();
        self.grid.set(coord, color)?;
        debug!(row = coord.row, col = coord.col, "obstacle cleared");
        self.events.push(SessionEvent::ObstacleCleared { coord });
        Ok(true)
    }

    /// Abandon the current level and play an unlocked one (possibly the same)
    ///
    /// Leaving a level in progress costs a life, exactly like letting its
    /// timer run out. When that was the last life the session ends in defeat
    /// and nothing is loaded.
    pub fn select_level(&mut self, index: usize) -> Result<bool> {
        if self.phase.is_terminal() {
            return Ok(false);
        }
        if index >= self.levels.len() {
            return Err(EngineError::InvalidLevelIndex {
                index,
                count: self.levels.len(),
            });
        }
        if index >= self.state.unlocked_level_count {
            return Err(EngineError::LevelLocked {
                index,
                unlocked: self.state.unlocked_level_count,
            });
        }

        let current = self.state.current_level_index;
        self.phase = Phase::LevelFailed;
        info!(level = current, target = index, "level abandoned");
        if self.spend_life() {
            return Ok(true);
        }

        self.state.current_level_index = index;
        self.load_level(index, index == current);
        Ok(true)
    }

    fn load_level(&mut self, index: usize, restarted: bool) {
        self.phase = Phase::Loading;

        let level = &self.levels[index];
        self.obstacles = ObstacleLayer::from_specs(&level.obstacles);
        self.state.time_remaining_secs = level.time_limit_secs;
        self.state.selected = None;
        self.grid = Grid::filled(&mut self.source);

        info!(
            level = index,
            restarted,
            objective = %self.levels[index].objective.describe(),
            time_limit_secs = self.state.time_remaining_secs,
            "level loaded"
        );
        self.events
            .push(SessionEvent::LevelChanged { index, restarted });
        self.phase = Phase::Playing;
    }

    fn complete_level(&mut self) {
        self.phase = Phase::LevelComplete;
        let index = self.state.current_level_index;
        info!(level = index, score = self.state.score, "level complete");

        if index + 1 >= self.levels.len() {
            self.finish(Outcome::Victory);
            return;
        }

        let next = index + 1;
        self.state.current_level_index = next;
        self.state.unlocked_level_count = self.state.unlocked_level_count.max(next + 1);
        self.load_level(next, false);
    }

    fn fail_level(&mut self) {
        self.phase = Phase::LevelFailed;
        info!(level = self.state.current_level_index, "time expired");
        if !self.spend_life() {
            self.load_level(self.state.current_level_index, true);
        }
    }

    /// Take one life. Returns true when it was the last and the game is over.
    fn spend_life(&mut self) -> bool {
        self.state.lives = self.state.lives.saturating_sub(1);
        info!(lives = self.state.lives, "life lost");
        self.events.push(SessionEvent::LifeLost {
            lives: self.state.lives,
        });

        if self.state.lives == 0 {
            self.finish(Outcome::Defeat);
            return true;
        }
        false
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::GameComplete(outcome);
        self.state.selected = None;
        info!(
            outcome = outcome.as_str(),
            score = self.state.score,
            "game complete"
        );
        self.events.push(SessionEvent::GameComplete { outcome });
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.grid = self.grid.to_rows();
        out.obstacles.clear();
        out.obstacles.extend(self.obstacles.iter().copied());
        out.phase = self.phase;
        out.level_index = self.state.current_level_index;
        out.level_count = self.levels.len();
        out.unlocked_level_count = self.state.unlocked_level_count;
        out.lives = self.state.lives;
        out.max_lives = self.config.max_lives;
        out.score = self.state.score;
        out.time_remaining_secs = self.state.time_remaining_secs;
        out.selected = self.state.selected;
        out.objective = *self.objective();
        out.objective_progress = self.objective_progress().count;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
