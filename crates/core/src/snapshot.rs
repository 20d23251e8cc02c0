use crate::level::Objective;
use crate::obstacles::Obstacle;
use crate::types::{Color, Coord, Phase, GRID_HEIGHT, GRID_WIDTH};

/// Read-only view of a session for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub grid: [[Color; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub obstacles: Vec<Obstacle>,
    pub phase: Phase,
    pub level_index: usize,
    pub level_count: usize,
    pub unlocked_level_count: usize,
    pub lives: u8,
    pub max_lives: u8,
    pub score: u32,
    pub time_remaining_secs: u32,
    pub selected: Option<Coord>,
    pub objective: Objective,
    /// Cells of the objective color currently on the grid
    pub objective_progress: u32,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[Color::Red; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.obstacles.clear();
        self.phase = Phase::Loading;
        self.level_index = 0;
        self.level_count = 0;
        self.unlocked_level_count = 0;
        self.lives = 0;
        self.max_lives = 0;
        self.score = 0;
        self.time_remaining_secs = 0;
        self.selected = None;
        self.objective = Objective::new(Color::Red, 0);
        self.objective_progress = 0;
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: [[Color::Red; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            obstacles: Vec::new(),
            phase: Phase::Loading,
            level_index: 0,
            level_count: 0,
            unlocked_level_count: 0,
            lives: 0,
            max_lives: 0,
            score: 0,
            time_remaining_secs: 0,
            selected: None,
            objective: Objective::new(Color::Red, 0),
            objective_progress: 0,
        };
        s.clear();
        s
    }
}
