//! RNG module - tile color generation
//!
//! New tiles are drawn through the [`TileSource`] trait so the session can be
//! driven by a seeded generator in play and by a fixed script in tests.
//!
//! Also provides a simple LCG for deterministic, seedable draws.

use arrayvec::ArrayVec;

use crate::error::{EngineError, Result};
use crate::types::{Color, COLOR_COUNT};

/// Supplier of new tile colors
pub trait TileSource {
    /// Draw the next color. Draws are independent; nothing prevents a draw
    /// from completing a run on the grid.
    fn next_color(&mut self) -> Color;
}

impl<T: TileSource + ?Sized> TileSource for Box<T> {
    fn next_color(&mut self) -> Color {
        (**self).next_color()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Uniform draws from a configured palette
#[derive(Debug, Clone)]
pub struct RandomTileSource {
    rng: SimpleRng,
    palette: ArrayVec<Color, COLOR_COUNT>,
}

impl RandomTileSource {
    /// Draw from every color
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            palette: Color::ALL.into_iter().collect(),
        }
    }

    /// Draw from a subset of colors. Duplicates are ignored so that each
    /// listed color is equally likely.
    pub fn with_palette(seed: u32, palette: &[Color]) -> Result<Self> {
        let mut unique: ArrayVec<Color, COLOR_COUNT> = ArrayVec::new();
        for &color in palette {
            if !unique.contains(&color) {
                unique.push(color);
            }
        }
        if unique.is_empty() {
            return Err(EngineError::EmptyPalette);
        }
        Ok(Self {
            rng: SimpleRng::new(seed),
            palette: unique,
        })
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }
}

impl TileSource for RandomTileSource {
    fn next_color(&mut self) -> Color {
        let i = self.rng.next_range(self.palette.len() as u32) as usize;
        self.palette[i]
    }
}

/// Replays a fixed color sequence, wrapping around at the end
///
/// Intended for tests: the session fills its grid in row-major order, so the
/// first 64 colors of the script are the initial board.
#[derive(Debug, Clone)]
pub struct ScriptedTileSource {
    colors: Vec<Color>,
    pos: usize,
}

impl ScriptedTileSource {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(EngineError::EmptyPalette);
        }
        Ok(Self { colors, pos: 0 })
    }

    /// Number of colors drawn so far
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl TileSource for ScriptedTileSource {
    fn next_color(&mut self) -> Color {
        let color = self.colors[self.pos % self.colors.len()];
        self.pos += 1;
        color
    }
}
