#![allow(dead_code)]

use tilematch::core::{Grid, Level, Objective, ScriptedTileSource, SessionConfig, SessionController};
use tilematch::types::{Color, Coord, GRID_CELLS};

/// Row-major colors with no run anywhere: `(row + 2 * col) % 4` over four colors
pub fn stable_cells() -> Vec<Color> {
    let palette = [Color::Blue, Color::Green, Color::Yellow, Color::Orange];
    (0..GRID_CELLS)
        .map(|i| palette[(i / 8 + 2 * (i % 8)) % 4])
        .collect()
}

pub fn stable_grid() -> Grid {
    let mut grid = Grid::uniform(Color::Blue);
    for (i, color) in stable_cells().into_iter().enumerate() {
        let coord = Coord::from_index(i).unwrap();
        grid.set(coord, color).unwrap();
    }
    grid
}

pub fn level(color: Color, count: u32, secs: u32) -> Level {
    Level::new(Objective::new(color, count)).with_time_limit(secs)
}

pub fn scripted_session(
    levels: Vec<Level>,
    script: Vec<Color>,
    config: SessionConfig,
) -> SessionController<ScriptedTileSource> {
    SessionController::with_config(levels, ScriptedTileSource::new(script).unwrap(), config)
        .unwrap()
}
