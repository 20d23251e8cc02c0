//! Cascade resolution tests

mod common;

use common::stable_grid;
use tilematch::core::{
    find_matches, resolve, EngineError, Grid, RandomTileSource, ScriptedTileSource,
};
use tilematch::types::{Color, Coord, CASCADE_ITERATION_CAP};

fn scenario_grid() -> Grid {
    use Color::*;
    let mut grid = stable_grid();
    let row0 = [Red, Red, Red, Blue, Blue, Blue, Blue, Green];
    for (col, color) in row0.into_iter().enumerate() {
        grid.set(Coord::new(0, col as i8), color).unwrap();
    }
    grid
}

#[test]
fn test_scenario_first_pass_marks_both_runs() {
    let grid = scenario_grid();

    let matches = find_matches(&grid);
    let cells: Vec<Coord> = matches.iter().collect();
    assert_eq!(cells, (0..7).map(|c| Coord::new(0, c)).collect::<Vec<_>>());

    let mut settled = grid;
    let mut source = ScriptedTileSource::new(vec![Color::Orange, Color::Yellow]).unwrap();
    let outcome = resolve(&mut settled, &mut source, CASCADE_ITERATION_CAP).unwrap();

    assert_eq!(outcome.first_pass, matches);
    assert_eq!(outcome.total_matched, 7);
    assert_eq!(outcome.iterations, 1);
    assert_eq!(source.drawn(), 7);
    assert_eq!(settled.get(Coord::new(0, 7)), Ok(Color::Green));
    assert!(find_matches(&settled).is_empty());
}

#[test]
fn test_resolve_is_idempotent_at_fixpoint() {
    for seed in 1..50u32 {
        let mut source = RandomTileSource::new(seed);
        let mut grid = Grid::filled(&mut source);
        resolve(&mut grid, &mut source, CASCADE_ITERATION_CAP).unwrap();

        let settled = grid;
        let again = resolve(&mut grid, &mut source, CASCADE_ITERATION_CAP).unwrap();
        assert_eq!(again.total_matched, 0, "seed {}", seed);
        assert_eq!(again.iterations, 0);
        assert_eq!(grid, settled);
    }
}

#[test]
fn test_settled_grid_stays_in_palette() {
    let mut source = RandomTileSource::with_palette(11, &[Color::Red, Color::Blue, Color::Green]).unwrap();
    let mut grid = Grid::filled(&mut source);
    resolve(&mut grid, &mut source, CASCADE_ITERATION_CAP).unwrap();

    let total: usize = [Color::Red, Color::Blue, Color::Green]
        .iter()
        .map(|&c| grid.count(c))
        .sum();
    assert_eq!(total, 64);
}

#[test]
fn test_divergence_leaves_grid_untouched() {
    let grid = scenario_grid();
    let mut work = grid;
    let mut source = ScriptedTileSource::new(vec![Color::Red]).unwrap();

    let err = resolve(&mut work, &mut source, 10).unwrap_err();
    assert_eq!(err, EngineError::CascadeDivergence { iterations: 10 });
    assert_eq!(work, grid);
}

#[test]
fn test_stable_grid_draws_nothing() {
    let mut grid = stable_grid();
    let mut source = ScriptedTileSource::new(vec![Color::Red]).unwrap();
    let outcome = resolve(&mut grid, &mut source, CASCADE_ITERATION_CAP).unwrap();
    assert!(!outcome.matched());
    assert_eq!(source.drawn(), 0);
}
