//! Tile match (workspace facade crate).
//!
//! Re-exports the member crates under `tilematch::{core,adapter,engine,types}` so
//! integration tests and the binary can use one path.

pub use tilematch_adapter as adapter;
pub use tilematch_core as core;
pub use tilematch_engine as engine;
pub use tilematch_types as types;
