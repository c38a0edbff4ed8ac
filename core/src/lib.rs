#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use action::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reveal::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod action;
mod cell;
mod error;
mod generator;
mod grid;
mod reveal;
mod save;
mod session;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(height, width)`
    pub size: Coord2,
    pub mines: CellCount,
    pub mode: RevealMode,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount, mode: RevealMode) -> Self {
        Self { size, mines, mode }
    }

    pub fn new(size: Coord2, mines: CellCount, mode: RevealMode) -> Result<Self> {
        let config = Self::new_unchecked(size, mines, mode);
        config.validate()?;
        Ok(config)
    }

    /// Dimensions must be positive and at least one cell must stay free of mines.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}
