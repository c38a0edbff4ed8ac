/// Single coordinate axis used for grid height, width, rows and columns.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, column)`, 0-indexed.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// The eight neighbor relations of a cell.
///
/// Declaration order is the order a cascade visits neighbors in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthWest,
    NorthEast,
    West,
    East,
    South,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::South,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Directions pointing at cells that come earlier in row-major order.
    pub(crate) const PRECEDING: [Direction; 4] = [
        Direction::North,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::West,
    ];

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            North => South,
            NorthWest => SouthEast,
            NorthEast => SouthWest,
            West => East,
            East => West,
            South => North,
            SouthWest => NorthEast,
            SouthEast => NorthWest,
        }
    }

    /// `(row, column)` displacement towards the neighbor.
    pub const fn delta(self) -> (isize, isize) {
        use Direction::*;
        match self {
            North => (-1, 0),
            NorthWest => (-1, -1),
            NorthEast => (-1, 1),
            West => (0, -1),
            East => (0, 1),
            South => (1, 0),
            SouthWest => (1, -1),
            SouthEast => (1, 1),
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, column) = coords;
    let (d_row, d_column) = delta;
    let (height, width) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= height {
        return None;
    }

    let next_column = column.checked_add_signed(d_column.try_into().ok()?)?;
    if next_column >= width {
        return None;
    }

    Some((next_row, next_column))
}
