//! Adapter module - drive a session over a line-delimited JSON protocol
//!
//! The adapter lets an external client (a UI, a bot, a test harness) play a
//! session through any async reader/writer pair. The binary wires it to
//! stdin/stdout.
//!
//! # Message Types
//!
//! ## Client → Engine
//!
//! - **select**: click the tile at `row`/`col`
//! - **swap**: click `from` then `to` in one message
//! - **clear_obstacle**: remove the obstacle at `row`/`col`
//! - **tick**: one second of countdown (and of life regeneration)
//! - **select_level**: abandon the current level (costs a life) for an unlocked one
//! - **observe**: request a full observation
//! - **hint**: list swaps that would form a run
//! - **quit**: stop the runner
//!
//! ## Engine → Client
//!
//! - **observation**: full session snapshot
//! - **event**: one session notification (`match_resolved`, `level_changed`, ...)
//! - **ack**: command handled, with `changed` telling whether state moved
//! - **hint**: candidate swaps
//! - **error**: rejected line or command, with a stable `code`
//!
//! # Example Protocol Flow
//!
//! ```text
//! Engine -> Client: {"type":"event","event":"level_changed","index":0,"restarted":false}
//! Engine -> Client: {"type":"observation","seq":0,"phase":"playing","grid":[["red",...],...],...}
//! Client -> Engine: {"type":"swap","seq":1,"from":{"row":0,"col":2},"to":{"row":0,"col":3}}
//! Engine -> Client: {"type":"ack","seq":1,"status":"ok","changed":true}
//! Engine -> Client: {"type":"event","event":"match_resolved","count":3,"iterations":1}
//! ```
//!
//! Configuration comes from `TILEMATCH_*` environment variables; see [`config`].

pub mod config;
pub mod levels;
pub mod protocol;
pub mod runtime;

pub use tilematch_core as core;
pub use tilematch_engine as engine;
pub use tilematch_types as types;

pub use config::RunnerConfig;
pub use levels::{load_levels, parse_levels, LevelFileError};
pub use protocol::*;
pub use runtime::{run, Inbound};
