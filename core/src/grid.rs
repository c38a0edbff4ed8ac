use ndarray::Array2;

use crate::*;

/// Neighbor table entry for one cell, indexed by [`Direction`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Neighbors([Option<Coord2>; 8]);

impl Neighbors {
    fn get(&self, direction: Direction) -> Option<Coord2> {
        self.0[direction.index()]
    }

    fn set(&mut self, direction: Direction, coords: Coord2) {
        self.0[direction.index()] = Some(coords);
    }
}

/// Rectangular arrangement of cells, indexed `(row, column)` in row-major order.
///
/// The adjacency table is built once here and never patched afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
    neighbors: Array2<Neighbors>,
}

impl Grid {
    pub fn new(size: Coord2) -> Result<Self> {
        let (height, width) = size;
        if height == 0 || width == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let mut neighbors: Array2<Neighbors> = Array2::default(size.to_nd_index());
        for row in 0..height {
            for column in 0..width {
                let coords = (row, column);
                // later cells link back to this one when they are built
                for direction in Direction::PRECEDING {
                    if let Some(other) = apply_delta(coords, direction.delta(), size) {
                        neighbors[coords.to_nd_index()].set(direction, other);
                        neighbors[other.to_nd_index()].set(direction.opposite(), coords);
                    }
                }
            }
        }

        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
            neighbors,
        })
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        // dimensions come from a `Coord2` so they always fit
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn contains(&self, (row, column): Coord2) -> bool {
        let (height, width) = self.size();
        row < height && column < width
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        if self.contains(coords) {
            Some(&self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub(crate) fn cell_at_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        if self.contains(coords) {
            Some(&mut self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub fn neighbor(&self, coords: Coord2, direction: Direction) -> Option<Coord2> {
        if self.contains(coords) {
            self.neighbors[coords.to_nd_index()].get(direction)
        } else {
            None
        }
    }

    /// Existing neighbors of `coords` in [`Direction::ALL`] order.
    pub fn neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.neighbor(coords, direction))
    }

    /// All cells with their coordinates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, column), cell)| ((row as Coord, column as Coord), cell))
    }

    /// Marks a bomb and updates the cached counts of its neighbors.
    pub fn set_mine_at(&mut self, coords: Coord2) -> Result<()> {
        let cell = self.cell_at_mut(coords).ok_or(GameError::OutOfBounds)?;
        if cell.is_bomb() {
            return Ok(());
        }
        cell.set_bomb();

        for direction in Direction::ALL {
            if let Some(other) = self.neighbor(coords, direction) {
                self.cells[other.to_nd_index()].add_neighbor_bomb();
            }
        }
        Ok(())
    }

    /// Flags every bomb as exposed without revealing anything.
    pub fn expose_all_bombs(&mut self) {
        self.cells.iter_mut().for_each(Cell::expose_bomb);
    }

    /// Reveals every cell.
    pub fn poke_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reveal();
        }
    }

    /// True iff every cell without a bomb has been revealed.
    pub fn all_safe_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_bomb() || cell.is_revealed())
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed()).count() as CellCount
    }
}
