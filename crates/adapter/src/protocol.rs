//! Protocol module - JSON message types for the line protocol
//!
//! One JSON object per line in each direction. Every message has a `type`.
//! Client messages may carry a `seq` number, which is echoed in the reply.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, SessionSnapshot};
use crate::engine::SwapError;
use crate::types::{Color, Coord, ObstacleKind, Outcome, Phase, SessionEvent, GRID_HEIGHT, GRID_WIDTH};

// ============== Client -> Engine Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireCoord {
    pub row: i8,
    pub col: i8,
}

impl From<WireCoord> for Coord {
    fn from(value: WireCoord) -> Self {
        Coord::new(value.row, value.col)
    }
}

impl From<Coord> for WireCoord {
    fn from(value: Coord) -> Self {
        Self {
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Select {
        #[serde(default)]
        seq: u64,
        row: i8,
        col: i8,
    },
    Swap {
        #[serde(default)]
        seq: u64,
        from: WireCoord,
        to: WireCoord,
    },
    ClearObstacle {
        #[serde(default)]
        seq: u64,
        row: i8,
        col: i8,
    },
    Tick {
        #[serde(default)]
        seq: u64,
    },
    SelectLevel {
        #[serde(default)]
        seq: u64,
        index: usize,
    },
    Observe {
        #[serde(default)]
        seq: u64,
    },
    Hint {
        #[serde(default)]
        seq: u64,
    },
    Quit {
        #[serde(default)]
        seq: u64,
    },
}

impl ClientMessage {
    pub fn seq(&self) -> u64 {
        match *self {
            ClientMessage::Select { seq, .. }
            | ClientMessage::Swap { seq, .. }
            | ClientMessage::ClearObstacle { seq, .. }
            | ClientMessage::Tick { seq }
            | ClientMessage::SelectLevel { seq, .. }
            | ClientMessage::Observe { seq }
            | ClientMessage::Hint { seq }
            | ClientMessage::Quit { seq } => seq,
        }
    }
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "event")]
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintType {
    #[serde(rename = "hint")]
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidMessage,
    UnknownType,
    NotPlayable,
    InvalidSwap,
    OutOfBounds,
    CascadeDivergence,
    InvalidLevelIndex,
    LevelLocked,
    NoLevels,
    InvalidLevel,
    EmptyPalette,
}

impl From<EngineError> for ErrorCode {
    fn from(value: EngineError) -> Self {
        match value {
            EngineError::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            EngineError::CascadeDivergence { .. } => ErrorCode::CascadeDivergence,
            EngineError::InvalidLevelIndex { .. } => ErrorCode::InvalidLevelIndex,
            EngineError::LevelLocked { .. } => ErrorCode::LevelLocked,
            EngineError::NoLevels => ErrorCode::NoLevels,
            EngineError::InvalidLevel { .. } => ErrorCode::InvalidLevel,
            EngineError::EmptyPalette => ErrorCode::EmptyPalette,
        }
    }
}

impl From<SwapError> for ErrorCode {
    fn from(value: SwapError) -> Self {
        match value {
            SwapError::NotPlayable => ErrorCode::NotPlayable,
            SwapError::OutOfBounds | SwapError::NotAdjacent => ErrorCode::InvalidSwap,
            SwapError::Engine(err) => err.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLower {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
}

impl From<Color> for ColorLower {
    fn from(value: Color) -> Self {
        match value {
            Color::Red => ColorLower::Red,
            Color::Blue => ColorLower::Blue,
            Color::Green => ColorLower::Green,
            Color::Yellow => ColorLower::Yellow,
            Color::Orange => ColorLower::Orange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKindLower {
    Jelly,
    Chocolate,
    Licorice,
}

impl From<ObstacleKind> for ObstacleKindLower {
    fn from(value: ObstacleKind) -> Self {
        match value {
            ObstacleKind::Jelly => ObstacleKindLower::Jelly,
            ObstacleKind::Chocolate => ObstacleKindLower::Chocolate,
            ObstacleKind::Licorice => ObstacleKindLower::Licorice,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseLower {
    Loading,
    Playing,
    LevelComplete,
    LevelFailed,
    GameComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLower {
    Victory,
    Defeat,
}

impl From<Outcome> for OutcomeLower {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Victory => OutcomeLower::Victory,
            Outcome::Defeat => OutcomeLower::Defeat,
        }
    }
}

fn split_phase(phase: Phase) -> (PhaseLower, Option<OutcomeLower>) {
    match phase {
        Phase::Loading => (PhaseLower::Loading, None),
        Phase::Playing => (PhaseLower::Playing, None),
        Phase::LevelComplete => (PhaseLower::LevelComplete, None),
        Phase::LevelFailed => (PhaseLower::LevelFailed, None),
        Phase::GameComplete(outcome) => (PhaseLower::GameComplete, Some(outcome.into())),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelView {
    pub index: usize,
    pub count: usize,
    pub unlocked: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub target_color: ColorLower,
    pub target_count: u32,
    pub progress: u32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub row: i8,
    pub col: i8,
    pub kind: ObstacleKindLower,
    pub cleared: bool,
}

/// Full session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub phase: PhaseLower,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub outcome: Option<OutcomeLower>,
    pub grid: [[ColorLower; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub obstacles: Vec<ObstacleView>,
    pub level: LevelView,
    pub objective: ObjectiveView,
    pub lives: u8,
    pub max_lives: u8,
    pub score: u32,
    pub time_remaining_secs: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub selected: Option<WireCoord>,
}

impl ObservationMessage {
    pub fn from_snapshot(seq: u64, snap: &SessionSnapshot) -> Self {
        let (phase, outcome) = split_phase(snap.phase);
        Self {
            msg_type: ObservationType::Observation,
            seq,
            phase,
            outcome,
            grid: snap.grid.map(|row| row.map(ColorLower::from)),
            obstacles: snap
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    row: o.coord.row,
                    col: o.coord.col,
                    kind: o.kind.into(),
                    cleared: o.cleared,
                })
                .collect(),
            level: LevelView {
                index: snap.level_index,
                count: snap.level_count,
                unlocked: snap.unlocked_level_count,
            },
            objective: ObjectiveView {
                target_color: snap.objective.target_color.into(),
                target_count: snap.objective.target_count,
                progress: snap.objective_progress,
                description: snap.objective.describe(),
            },
            lives: snap.lives,
            max_lives: snap.max_lives,
            score: snap.score,
            time_remaining_secs: snap.time_remaining_secs,
            selected: snap.selected.map(WireCoord::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventBody {
    MatchResolved { count: u32, iterations: u32 },
    LevelChanged { index: usize, restarted: bool },
    LifeLost { lives: u8 },
    LifeRestored { lives: u8 },
    ObstacleCleared { row: i8, col: i8 },
    GameComplete { outcome: OutcomeLower },
}

impl From<SessionEvent> for EventBody {
    fn from(value: SessionEvent) -> Self {
        match value {
            SessionEvent::MatchResolved { count, iterations } => {
                EventBody::MatchResolved { count, iterations }
            }
            SessionEvent::LevelChanged { index, restarted } => {
                EventBody::LevelChanged { index, restarted }
            }
            SessionEvent::LifeLost { lives } => EventBody::LifeLost { lives },
            SessionEvent::LifeRestored { lives } => EventBody::LifeRestored { lives },
            SessionEvent::ObstacleCleared { coord } => EventBody::ObstacleCleared {
                row: coord.row,
                col: coord.col,
            },
            SessionEvent::GameComplete { outcome } => EventBody::GameComplete {
                outcome: outcome.into(),
            },
        }
    }
}

/// One session notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub msg_type: EventType,
    #[serde(flatten)]
    pub event: EventBody,
}

/// Acknowledgment for a handled command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub status: AckStatus,
    /// Whether the command changed session state
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintMessage {
    #[serde(rename = "type")]
    pub msg_type: HintType,
    pub seq: u64,
    pub swaps: Vec<[WireCoord; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedMessage {
    Client(ClientMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

const KNOWN_TYPES: [&str; 8] = [
    "select",
    "swap",
    "clear_obstacle",
    "tick",
    "select_level",
    "observe",
    "hint",
    "quit",
];

/// Parse one line
///
/// A well-formed object with an unrecognized `type` is reported as
/// [`ParsedMessage::Unknown`]; everything else that fails is an error.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    match serde_json::from_str::<ClientMessage>(json) {
        Ok(m) => Ok(ParsedMessage::Client(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                #[serde(borrow)]
                msg_type: Option<&'a str>,
                seq: Option<u64>,
            }
            let probe = serde_json::from_str::<TypeOnly>(json)?;
            match probe.msg_type {
                Some(t) if !KNOWN_TYPES.contains(&t) => Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: probe.seq.unwrap_or(0),
                })),
                _ => Err(e),
            }
        }
    }
}

// ============== Utility Functions ==============

pub fn create_event(event: SessionEvent) -> EventMessage {
    EventMessage {
        msg_type: EventType::Event,
        event: event.into(),
    }
}

pub fn create_ack(seq: u64, changed: bool) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        status: AckStatus::Ok,
        changed,
    }
}

pub fn create_hint(seq: u64, swaps: &[(Coord, Coord)]) -> HintMessage {
    HintMessage {
        msg_type: HintType::Hint,
        seq,
        swaps: swaps.iter().map(|&(a, b)| [a.into(), b.into()]).collect(),
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code,
        message: message.to_string(),
    }
}
