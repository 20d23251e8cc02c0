//! Session controller tests - end-to-end play through the facade crate

mod common;

use common::{level, scripted_session, stable_cells};
use tilematch::core::{
    default_levels, EngineError, Level, Objective, RandomTileSource, SelectOutcome, SessionConfig,
    SessionController,
};
use tilematch::types::{
    Color, Coord, ObstacleKind, Outcome, Phase, SessionEvent, Stimulus, DEFAULT_MAX_LIVES,
    DEFAULT_TIME_LIMIT_SECS, LIFE_REGEN_SECS,
};

/// Stable board with 10 reds on (even row, even col) cells
fn ten_reds() -> Vec<Color> {
    let mut cells = stable_cells();
    for (r, c) in [
        (0, 0),
        (0, 2),
        (0, 4),
        (0, 6),
        (2, 0),
        (2, 2),
        (2, 4),
        (2, 6),
        (4, 0),
        (4, 2),
    ] {
        cells[r * 8 + c] = Color::Red;
    }
    cells
}

#[test]
fn test_adjacent_selection_swaps_and_settles_once() {
    // Row 0: R R B R ...; swapping (0,2)/(0,3) lines up three reds, the first
    // refill lines up three yellows in their place, the second settles.
    let mut script = stable_cells();
    script[0] = Color::Red;
    script[1] = Color::Red;
    script[3] = Color::Red;
    script.extend([Color::Yellow, Color::Yellow, Color::Yellow]);
    script.extend([Color::Orange, Color::Green, Color::Orange]);
    let mut session = scripted_session(
        vec![level(Color::Red, 64, 30)],
        script,
        SessionConfig::default(),
    );
    session.take_events();

    assert_eq!(
        session.select_tile(Coord::new(0, 2)),
        Ok(SelectOutcome::Selected(Coord::new(0, 2)))
    );
    let outcome = session.select_tile(Coord::new(0, 3)).unwrap();
    let SelectOutcome::Swapped(settled) = outcome else {
        panic!("expected a swap, got {:?}", outcome);
    };

    assert_eq!(settled.iterations, 2);
    assert_eq!(settled.total_matched, 6);
    assert_eq!(settled.first_pass.len(), 3);
    assert_eq!(session.state().score, 60);
    assert_eq!(session.state().selected, None);
    assert_eq!(
        session.take_events(),
        vec![SessionEvent::MatchResolved {
            count: 6,
            iterations: 2
        }]
    );
}

#[test]
fn test_adjacent_distinct_colors_swap_without_match() {
    let mut session = scripted_session(
        vec![level(Color::Red, 64, 30)],
        stable_cells(),
        SessionConfig::default(),
    );
    let before = *session.grid();

    session.select_tile(Coord::new(0, 0)).unwrap();
    session.select_tile(Coord::new(0, 1)).unwrap();

    assert_eq!(session.grid().get(Coord::new(0, 0)), before.get(Coord::new(0, 1)));
    assert_eq!(session.grid().get(Coord::new(0, 1)), before.get(Coord::new(0, 0)));
    assert_eq!(session.state().score, 0);
}

#[test]
fn test_non_adjacent_click_replaces_selection() {
    let mut session = scripted_session(
        vec![level(Color::Red, 64, 30)],
        stable_cells(),
        SessionConfig::default(),
    );
    let before = *session.grid();

    session.select_tile(Coord::new(0, 0)).unwrap();
    // Diagonal is not adjacent
    session.select_tile(Coord::new(1, 1)).unwrap();
    assert_eq!(session.state().selected, Some(Coord::new(1, 1)));
    // Re-clicking the selected tile is not adjacent either
    session.select_tile(Coord::new(1, 1)).unwrap();
    assert_eq!(session.state().selected, Some(Coord::new(1, 1)));
    assert_eq!(*session.grid(), before);
}

#[test]
fn test_ticking_out_the_level_costs_exactly_one_life() {
    let mut session = SessionController::new(default_levels(), RandomTileSource::new(5)).unwrap();
    session.take_events();

    for _ in 1..DEFAULT_TIME_LIMIT_SECS {
        assert!(session.tick());
    }
    assert_eq!(session.state().lives, DEFAULT_MAX_LIVES);
    assert_eq!(session.state().time_remaining_secs, 1);
    assert!(session.take_events().is_empty());

    assert!(session.tick());
    assert_eq!(session.state().lives, DEFAULT_MAX_LIVES - 1);
    assert_eq!(session.state().time_remaining_secs, DEFAULT_TIME_LIMIT_SECS);
    assert_eq!(session.state().current_level_index, 0);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(
        session.take_events(),
        vec![
            SessionEvent::LifeLost {
                lives: DEFAULT_MAX_LIVES - 1
            },
            SessionEvent::LevelChanged {
                index: 0,
                restarted: true
            },
        ]
    );
}

#[test]
fn test_objective_threshold_after_settle() {
    // Swapping (7,6)/(7,7) forms no run and leaves the red count alone
    let swap = [Coord::new(7, 6), Coord::new(7, 7)];
    let levels = || vec![level(Color::Red, 10, 30), level(Color::Blue, 64, 30)];

    let mut nine = ten_reds();
    nine[4 * 8 + 2] = Color::Green;
    let mut session = scripted_session(levels(), nine, SessionConfig::default());
    session.select_tile(swap[0]).unwrap();
    session.select_tile(swap[1]).unwrap();
    assert_eq!(session.objective_progress().count, 9);
    assert_eq!(session.state().current_level_index, 0);

    let mut session = scripted_session(levels(), ten_reds(), SessionConfig::default());
    session.take_events();
    session.select_tile(swap[0]).unwrap();
    session.select_tile(swap[1]).unwrap();
    assert_eq!(session.state().current_level_index, 1);
    assert_eq!(session.state().unlocked_level_count, 2);
    assert_eq!(
        session.take_events(),
        vec![SessionEvent::LevelChanged {
            index: 1,
            restarted: false
        }]
    );
}

#[test]
fn test_completing_last_level_is_victory_and_terminal() {
    let mut session = scripted_session(
        vec![level(Color::Red, 10, 30)],
        ten_reds(),
        SessionConfig::default(),
    );
    session.select_tile(Coord::new(7, 6)).unwrap();
    session.select_tile(Coord::new(7, 7)).unwrap();

    assert_eq!(session.phase(), Phase::GameComplete(Outcome::Victory));
    let grid = *session.grid();
    let state = *session.state();

    for stimulus in [
        Stimulus::SelectTile(Coord::new(0, 0)),
        Stimulus::Tick,
        Stimulus::RegenTick,
        Stimulus::ClearObstacle(Coord::new(0, 0)),
        Stimulus::SelectLevel(0),
    ] {
        assert_eq!(session.apply(stimulus), Ok(false));
    }
    assert_eq!(*session.grid(), grid);
    assert_eq!(*session.state(), state);
}

#[test]
fn test_last_life_lost_is_defeat() {
    let config = SessionConfig {
        max_lives: 2,
        ..SessionConfig::default()
    };
    let mut session = scripted_session(vec![level(Color::Red, 64, 2)], stable_cells(), config);

    for _ in 0..4 {
        session.tick();
    }
    assert_eq!(session.state().lives, 0);
    assert_eq!(session.phase(), Phase::GameComplete(Outcome::Defeat));
    let events = session.take_events();
    assert_eq!(
        events.last(),
        Some(&SessionEvent::GameComplete {
            outcome: Outcome::Defeat
        })
    );
}

#[test]
fn test_restarting_a_level_costs_a_life() {
    let mut session = scripted_session(
        vec![level(Color::Red, 64, 2)],
        stable_cells(),
        SessionConfig::default(),
    );
    session.take_events();

    let mut ticks = 0;
    while !session.is_over() {
        session.tick();
        ticks += 1;
        session.select_level(0).unwrap();
    }

    // One life per restart, however little time was used
    assert_eq!(ticks, DEFAULT_MAX_LIVES as usize);
    assert_eq!(session.state().lives, 0);
    assert_eq!(session.phase(), Phase::GameComplete(Outcome::Defeat));

    let events = session.take_events();
    assert_eq!(
        &events[..2],
        &[
            SessionEvent::LifeLost {
                lives: DEFAULT_MAX_LIVES - 1
            },
            SessionEvent::LevelChanged {
                index: 0,
                restarted: true
            },
        ]
    );
    // The last life goes straight to defeat without reloading
    assert_eq!(
        &events[events.len() - 2..],
        &[
            SessionEvent::LifeLost { lives: 0 },
            SessionEvent::GameComplete {
                outcome: Outcome::Defeat
            },
        ]
    );
}

#[test]
fn test_errors_leave_state_unchanged() {
    let mut session = scripted_session(
        vec![level(Color::Red, 64, 30), level(Color::Red, 64, 30)],
        stable_cells(),
        SessionConfig::default(),
    );
    session.select_tile(Coord::new(3, 3)).unwrap();
    let grid = *session.grid();
    let state = *session.state();

    assert!(matches!(
        session.select_tile(Coord::new(3, -1)),
        Err(EngineError::OutOfBounds { .. })
    ));
    assert!(matches!(
        session.clear_obstacle(Coord::new(9, 9)),
        Err(EngineError::OutOfBounds { .. })
    ));
    assert_eq!(
        session.select_level(2),
        Err(EngineError::InvalidLevelIndex { index: 2, count: 2 })
    );
    assert!(matches!(
        session.select_level(1),
        Err(EngineError::LevelLocked { .. })
    ));

    assert_eq!(*session.grid(), grid);
    assert_eq!(*session.state(), state);
}

#[test]
fn test_divergence_rolls_back_for_retry() {
    let mut script = stable_cells();
    script[0] = Color::Red;
    script[1] = Color::Red;
    script[3] = Color::Red;
    script.extend(std::iter::repeat(Color::Red).take(64));
    let config = SessionConfig {
        cascade_iteration_cap: 8,
        ..SessionConfig::default()
    };
    let mut session = scripted_session(vec![level(Color::Red, 64, 30)], script, config);
    session.select_tile(Coord::new(0, 2)).unwrap();
    session.take_events();
    let grid = *session.grid();
    let state = *session.state();

    assert_eq!(
        session.select_tile(Coord::new(0, 3)),
        Err(EngineError::CascadeDivergence { iterations: 8 })
    );
    assert_eq!(*session.grid(), grid);
    assert_eq!(*session.state(), state);
    assert_eq!(session.phase(), Phase::Playing);
    assert!(session.take_events().is_empty());
}

#[test]
fn test_life_regeneration() {
    let config = SessionConfig {
        life_regen_secs: LIFE_REGEN_SECS,
        ..SessionConfig::default()
    };
    let mut session = scripted_session(vec![level(Color::Red, 64, 1)], stable_cells(), config);
    session.tick();
    session.tick();
    assert_eq!(session.state().lives, DEFAULT_MAX_LIVES - 2);
    session.take_events();

    for _ in 0..LIFE_REGEN_SECS - 1 {
        session.regen_tick();
    }
    assert_eq!(session.state().lives, DEFAULT_MAX_LIVES - 2);
    session.regen_tick();
    assert_eq!(session.state().lives, DEFAULT_MAX_LIVES - 1);

    for _ in 0..LIFE_REGEN_SECS {
        session.regen_tick();
    }
    assert_eq!(session.state().lives, DEFAULT_MAX_LIVES);
    // Never beyond the maximum
    for _ in 0..LIFE_REGEN_SECS {
        session.regen_tick();
    }
    assert_eq!(session.state().lives, DEFAULT_MAX_LIVES);
    assert_eq!(
        session.take_events(),
        vec![
            SessionEvent::LifeRestored {
                lives: DEFAULT_MAX_LIVES - 1
            },
            SessionEvent::LifeRestored {
                lives: DEFAULT_MAX_LIVES
            },
        ]
    );
}

#[test]
fn test_obstacles_reset_per_level_load() {
    let levels = vec![Level::new(Objective::new(Color::Red, 64))
        .with_time_limit(1)
        .with_obstacle(Coord::new(2, 2), ObstacleKind::Jelly)
        .with_obstacle(Coord::new(4, 4), ObstacleKind::Chocolate)];
    let mut session = scripted_session(levels, stable_cells(), SessionConfig::default());
    session.take_events();

    assert_eq!(session.clear_obstacle(Coord::new(2, 2)), Ok(true));
    assert_eq!(session.clear_obstacle(Coord::new(2, 2)), Ok(false));
    assert_eq!(session.obstacles().remaining(), 1);
    assert_eq!(
        session.take_events(),
        vec![SessionEvent::ObstacleCleared {
            coord: Coord::new(2, 2)
        }]
    );

    // Expiring the timer reloads the level and its obstacles
    session.tick();
    assert_eq!(session.obstacles().remaining(), 2);
}

#[test]
fn test_same_seed_same_session() {
    let play = |seed: u32| {
        let mut s = SessionController::new(default_levels(), RandomTileSource::new(seed)).unwrap();
        for (a, b) in [((0, 0), (0, 1)), ((3, 3), (4, 3)), ((6, 1), (6, 2))] {
            let _ = s.select_tile(Coord::new(a.0, a.1));
            let _ = s.select_tile(Coord::new(b.0, b.1));
            s.tick();
        }
        s.snapshot()
    };

    assert_eq!(play(1234), play(1234));
}

#[test]
fn test_snapshot_reflects_state() {
    let mut session = SessionController::new(default_levels(), RandomTileSource::new(9)).unwrap();
    session.select_tile(Coord::new(5, 5)).unwrap();
    session.tick();

    let snap = session.snapshot();
    assert_eq!(snap.grid, session.grid().to_rows());
    assert_eq!(snap.level_count, 2);
    assert_eq!(snap.obstacles.len(), 2);
    assert_eq!(snap.selected, Some(Coord::new(5, 5)));
    assert_eq!(snap.time_remaining_secs, DEFAULT_TIME_LIMIT_SECS - 1);
    assert_eq!(snap.max_lives, DEFAULT_MAX_LIVES);
    assert_eq!(snap.objective.describe(), "Collect 10 red tiles");
    assert_eq!(
        snap.objective_progress as usize,
        session.grid().count(Color::Red)
    );
}

#[test]
fn test_invalid_level_sets_rejected() {
    let source = || RandomTileSource::new(1);
    assert_eq!(
        SessionController::new(Vec::new(), source()).err(),
        Some(EngineError::NoLevels)
    );
    let bad = vec![
        Level::new(Objective::new(Color::Red, 1)),
        Level::new(Objective::new(Color::Red, 1)).with_time_limit(0),
    ];
    assert!(matches!(
        SessionController::new(bad, source()).err(),
        Some(EngineError::InvalidLevel { index: 1, .. })
    ));
}
