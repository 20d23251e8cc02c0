//! Runner configuration from environment variables
//!
//! - `TILEMATCH_LEVELS`: level file path (built-in levels when unset)
//! - `TILEMATCH_SEED`: tile source seed (random when unset)
//! - `TILEMATCH_TICK_MS`: countdown period in milliseconds (default 1000, 0 disables)
//! - `TILEMATCH_MAX_LIVES`: lives per session (default 5)
//! - `TILEMATCH_REGEN_SECS`: seconds per restored life (default 300, 0 disables)
//! - `TILEMATCH_PALETTE`: comma-separated colors (default all five)
//! - `TILEMATCH_LOG`: tracing filter (default "info")
//!
//! Values that fail to parse fall back to the default.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::SessionConfig;
use crate::types::{Color, DEFAULT_MAX_LIVES, LIFE_REGEN_SECS};

pub const DEFAULT_TICK_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub levels_path: Option<PathBuf>,
    pub seed: Option<u32>,
    pub tick_ms: u64,
    pub max_lives: u8,
    pub life_regen_secs: u32,
    pub palette: Vec<Color>,
    pub log_filter: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            levels_path: None,
            seed: None,
            tick_ms: DEFAULT_TICK_MS,
            max_lives: DEFAULT_MAX_LIVES,
            life_regen_secs: LIFE_REGEN_SECS,
            palette: Color::ALL.to_vec(),
            log_filter: "info".to_string(),
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            var(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let levels_path = non_empty("TILEMATCH_LEVELS").map(PathBuf::from);
        let seed = non_empty("TILEMATCH_SEED").and_then(|s| s.parse().ok());
        let tick_ms = non_empty("TILEMATCH_TICK_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.tick_ms);
        let max_lives = non_empty("TILEMATCH_MAX_LIVES")
            .and_then(|s| s.parse::<u8>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_lives);
        let life_regen_secs = non_empty("TILEMATCH_REGEN_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.life_regen_secs);
        let palette = non_empty("TILEMATCH_PALETTE")
            .map(|s| parse_palette(&s))
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults.palette);
        let log_filter = non_empty("TILEMATCH_LOG").unwrap_or(defaults.log_filter);

        Self {
            levels_path,
            seed,
            tick_ms,
            max_lives,
            life_regen_secs,
            palette,
            log_filter,
        }
    }

    /// Countdown period, or None when the scheduler is disabled
    pub fn tick_interval(&self) -> Option<Duration> {
        (self.tick_ms > 0).then(|| Duration::from_millis(self.tick_ms))
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_lives: self.max_lives,
            life_regen_secs: self.life_regen_secs,
            ..SessionConfig::default()
        }
    }
}

/// Unknown names are skipped
fn parse_palette(s: &str) -> Vec<Color> {
    s.split(',').filter_map(|name| Color::from_str(name.trim())).collect()
}
