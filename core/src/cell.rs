use serde::{Deserialize, Serialize};

/// State of one grid position.
///
/// Neighbor relations live in the owning [`Grid`](crate::Grid); a cell only
/// caches how many of its neighbors are bombs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    bomb: bool,
    flagged: bool,
    revealed: bool,
    bomb_exposed: bool,
    neighbor_bombs: u8,
}

impl Cell {
    pub const fn is_bomb(&self) -> bool {
        self.bomb
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Set by a cheat; only ever true on bombs and independent of `is_revealed`.
    pub const fn is_bomb_exposed(&self) -> bool {
        self.bomb_exposed
    }

    pub const fn neighbor_bomb_count(&self) -> u8 {
        self.neighbor_bombs
    }

    pub(crate) fn set_bomb(&mut self) {
        self.bomb = true;
    }

    pub(crate) fn add_neighbor_bomb(&mut self) {
        self.neighbor_bombs += 1;
    }

    /// Reveals the cell, dropping any flag. Returns whether anything changed.
    pub(crate) fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        self.flagged = false;
        true
    }

    /// Flags a hidden cell. There is no way back to unflagged short of revealing.
    pub(crate) fn flag(&mut self) -> bool {
        if self.revealed || self.flagged {
            return false;
        }
        self.flagged = true;
        true
    }

    pub(crate) fn expose_bomb(&mut self) {
        if self.bomb {
            self.bomb_exposed = true;
        }
    }
}
