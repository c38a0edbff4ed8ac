use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: &GameConfig) -> Result<MineField>;
}

/// The mine coordinates of one session, unique and in bounds.
///
/// Locations keep the order they were chosen or supplied in, so a save lists
/// them the same way every time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineField {
    size: Coord2,
    locations: Vec<Coord2>,
}

impl MineField {
    /// Samples uniformly random coordinates, rejecting repeats, until
    /// `config.mines` distinct ones are collected.
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let (height, width) = config.size;
        let target = config.mines as usize;
        let mut chosen = HashSet::with_capacity(target);
        let mut locations = Vec::with_capacity(target);

        while locations.len() < target {
            let coords = (rng.random_range(0..height), rng.random_range(0..width));
            if chosen.insert(coords) {
                locations.push(coords);
            }
        }

        log::debug!(
            "Generated {} mines for a {}x{} grid",
            locations.len(),
            height,
            width
        );
        Ok(Self {
            size: config.size,
            locations,
        })
    }

    /// Accepts a supplied layout after checking bounds and uniqueness.
    pub fn from_locations(size: Coord2, locations: &[Coord2]) -> Result<Self> {
        let (height, width) = size;
        if height == 0 || width == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let mut seen = HashSet::with_capacity(locations.len());
        for &(row, column) in locations {
            if row >= height || column >= width {
                return Err(GameError::OutOfBounds);
            }
            if !seen.insert((row, column)) {
                return Err(GameError::DuplicateMine);
            }
        }
        if locations.len() as CellCount >= mult(height, width) {
            return Err(GameError::TooManyMines);
        }

        Ok(Self {
            size,
            locations: locations.to_vec(),
        })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn locations(&self) -> &[Coord2] {
        &self.locations
    }

    pub fn mine_count(&self) -> CellCount {
        self.locations.len() as CellCount
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.locations.contains(&coords)
    }

    pub fn game_config(&self, mode: RevealMode) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count(), mode)
    }

    /// Builds a grid with every mine in place.
    pub fn build_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.size)?;
        for &coords in &self.locations {
            grid.set_mine_at(coords)?;
        }
        Ok(grid)
    }
}
