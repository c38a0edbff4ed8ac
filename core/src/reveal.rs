use alloc::collections::VecDeque;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// How far a single poke reaches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealMode {
    /// Revealing a cell with no neighboring bombs opens its whole connected region.
    #[default]
    Classic,
    /// Every poke reveals exactly one cell.
    Single,
}

impl RevealMode {
    pub const fn from_classic(classic: bool) -> Self {
        if classic { Self::Classic } else { Self::Single }
    }

    pub const fn is_classic(self) -> bool {
        matches!(self, Self::Classic)
    }
}

/// Reveal and flag rules applied to a [`Grid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RevealEngine {
    mode: RevealMode,
}

impl RevealEngine {
    pub const fn new(mode: RevealMode) -> Self {
        Self { mode }
    }

    pub const fn mode(&self) -> RevealMode {
        self.mode
    }

    /// Reveals the cell at `coords`, cascading over zero cells in classic mode.
    ///
    /// Out-of-bounds coordinates and already revealed cells are left alone.
    pub fn poke(&self, grid: &mut Grid, coords: Coord2) -> RevealOutcome {
        let Some(cell) = grid.cell_at_mut(coords) else {
            return RevealOutcome::NoChange;
        };
        if !cell.reveal() {
            return RevealOutcome::NoChange;
        }

        if cell.is_bomb() {
            log::debug!("Bomb hit at {:?}", coords);
            return RevealOutcome::HitMine;
        }

        let count = cell.neighbor_bomb_count();
        log::trace!("Revealed cell at {:?}, neighbor bombs: {}", coords, count);

        if count == 0 && self.mode.is_classic() {
            Self::cascade(grid, coords);
        }
        RevealOutcome::Revealed
    }

    /// Breadth-first flood over the zero region around `origin`, which is
    /// already revealed. The visited set lives only for this call.
    fn cascade(grid: &mut Grid, origin: Coord2) {
        let mut visited = HashSet::new();
        visited.insert(origin);
        let mut to_visit: VecDeque<Coord2> = grid.neighbors(origin).collect();
        log::trace!(
            "Starting cascade from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let Some(cell) = grid.cell_at_mut(visit_coords) else {
                continue;
            };
            if !cell.reveal() {
                continue;
            }

            let count = cell.neighbor_bomb_count();
            log::trace!(
                "Cascade revealed cell at {:?}, neighbor bombs: {}",
                visit_coords,
                count
            );

            if count == 0 && !cell.is_bomb() {
                to_visit.extend(
                    grid.neighbors(visit_coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Flags a hidden cell. Revealed cells, flagged cells and out-of-bounds
    /// coordinates are left alone.
    pub fn flag(&self, grid: &mut Grid, coords: Coord2) -> MarkOutcome {
        match grid.cell_at_mut(coords).map(Cell::flag) {
            Some(true) => MarkOutcome::Changed,
            _ => MarkOutcome::NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn grid(size: Coord2, mines: &[Coord2]) -> Grid {
        MineField::from_locations(size, mines)
            .unwrap()
            .build_grid()
            .unwrap()
    }

    fn revealed(grid: &Grid) -> Vec<Coord2> {
        grid.iter()
            .filter(|(_, cell)| cell.is_revealed())
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn single_mode_reveals_one_cell() {
        let mut grid = grid((3, 3), &[(0, 0)]);
        let engine = RevealEngine::new(RevealMode::Single);

        assert_eq!(engine.poke(&mut grid, (2, 2)), RevealOutcome::Revealed);

        let expected: [Coord2; 1] = [(2, 2)];
        assert_eq!(revealed(&grid), expected);
        assert_eq!(grid.cell_at((2, 2)).unwrap().neighbor_bomb_count(), 0);
    }

    #[test]
    fn classic_mode_opens_zero_region_and_border() {
        // column 2 is walled off by bombs in column 3
        let mut grid = grid((4, 5), &[(0, 3), (1, 3), (2, 3), (3, 3)]);
        let engine = RevealEngine::new(RevealMode::Classic);

        assert_eq!(engine.poke(&mut grid, (0, 0)), RevealOutcome::Revealed);

        for (coords, cell) in grid.iter() {
            assert_eq!(cell.is_revealed(), coords.1 <= 2, "{coords:?}");
        }
        assert_eq!(grid.cell_at((1, 2)).unwrap().neighbor_bomb_count(), 3);
    }

    #[test]
    fn classic_mode_stops_on_numbered_cell() {
        let mut grid = grid((1, 2), &[(0, 1)]);
        let engine = RevealEngine::new(RevealMode::Classic);

        assert_eq!(engine.poke(&mut grid, (0, 0)), RevealOutcome::Revealed);

        assert_eq!(grid.cell_at((0, 0)).unwrap().neighbor_bomb_count(), 1);
        assert!(!grid.cell_at((0, 1)).unwrap().is_revealed());
    }

    #[test]
    fn cascade_result_does_not_depend_on_start() {
        let mines = [(0, 4), (3, 1), (4, 4)];
        let engine = RevealEngine::new(RevealMode::Classic);

        let mut from_corner = grid((5, 5), &mines);
        engine.poke(&mut from_corner, (0, 0));
        let mut from_middle = grid((5, 5), &mines);
        engine.poke(&mut from_middle, (1, 2));

        assert!(from_corner.cell_at((1, 2)).unwrap().is_revealed());
        assert_eq!(revealed(&from_corner), revealed(&from_middle));
    }

    #[test]
    fn cascade_reveals_flagged_cells() {
        let mut grid = grid((2, 2), &[]);
        let engine = RevealEngine::new(RevealMode::Classic);

        assert_eq!(engine.flag(&mut grid, (1, 1)), MarkOutcome::Changed);
        engine.poke(&mut grid, (0, 0));

        let cell = grid.cell_at((1, 1)).unwrap();
        assert!(cell.is_revealed());
        assert!(!cell.is_flagged());
    }

    #[test]
    fn poke_bomb_and_repeat_poke() {
        let mut grid = grid((2, 2), &[(1, 1)]);
        let engine = RevealEngine::new(RevealMode::Classic);

        assert_eq!(engine.poke(&mut grid, (1, 1)), RevealOutcome::HitMine);
        assert_eq!(engine.poke(&mut grid, (1, 1)), RevealOutcome::NoChange);
        assert_eq!(engine.poke(&mut grid, (0, 0)), RevealOutcome::Revealed);
        assert_eq!(engine.poke(&mut grid, (0, 0)), RevealOutcome::NoChange);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut grid = grid((2, 2), &[]);
        let engine = RevealEngine::new(RevealMode::Classic);

        assert_eq!(engine.poke(&mut grid, (2, 0)), RevealOutcome::NoChange);
        assert_eq!(engine.flag(&mut grid, (0, 9)), MarkOutcome::NoChange);
        assert_eq!(grid.revealed_count(), 0);
    }

    #[test]
    fn flag_ignores_revealed_cells() {
        let mut grid = grid((1, 2), &[(0, 1)]);
        let engine = RevealEngine::new(RevealMode::Single);

        engine.poke(&mut grid, (0, 0));

        assert_eq!(engine.flag(&mut grid, (0, 0)), MarkOutcome::NoChange);
        assert_eq!(engine.flag(&mut grid, (0, 1)), MarkOutcome::Changed);
        assert_eq!(engine.flag(&mut grid, (0, 1)), MarkOutcome::NoChange);
    }

    #[test]
    fn large_open_grid_cascades_without_recursion() {
        let mut grid = grid((500, 500), &[]);
        let engine = RevealEngine::new(RevealMode::Classic);

        engine.poke(&mut grid, (250, 250));

        assert_eq!(grid.revealed_count(), 250_000);
    }
}
