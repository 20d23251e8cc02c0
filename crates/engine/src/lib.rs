//! Engine helpers built on top of the core session.
//!
//! - [`swap`]: one-shot swap of two tiles by coordinate pair
//! - [`hint`]: enumerate swaps that would form a run

pub mod hint;
pub mod swap;

pub use tilematch_core as core;
pub use tilematch_types as types;

pub use hint::{find_swaps, SwapList, MAX_SWAPS};
pub use swap::{apply_swap, SwapError};
