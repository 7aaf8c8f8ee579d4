#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod types;

/// Parameters for creating a new game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size as `(rows, cols)`.
    pub size: Coord2,
    /// Probability that any single light starts lit.
    pub chance_light_starts_on: f64,
}

impl GameConfig {
    pub const DEFAULT_ROWS: Coord = 5;
    pub const DEFAULT_COLS: Coord = 6;
    pub const DEFAULT_CHANCE: f64 = 0.25;

    pub const fn new_unchecked(size: Coord2, chance_light_starts_on: f64) -> Self {
        Self {
            size,
            chance_light_starts_on,
        }
    }

    pub fn new((rows, cols): Coord2, chance_light_starts_on: f64) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let chance = if chance_light_starts_on.is_nan() {
            log::warn!("Chance is not a number, using {}", Self::DEFAULT_CHANCE);
            Self::DEFAULT_CHANCE
        } else {
            chance_light_starts_on.clamp(0.0, 1.0)
        };
        Self::new_unchecked((rows, cols), chance)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            (Self::DEFAULT_ROWS, Self::DEFAULT_COLS),
            Self::DEFAULT_CHANCE,
        )
    }
}
