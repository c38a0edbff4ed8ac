use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer may know about one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    pub bomb_exposed: bool,
    /// Only known once bombs are exposed or the session is over.
    pub bomb: Option<bool>,
    /// Only known for revealed safe cells.
    pub neighbor_bomb_count: Option<u8>,
}

impl CellView {
    pub fn new(cell: &Cell, finished: bool) -> Self {
        let bomb = if cell.is_bomb_exposed() || finished {
            Some(cell.is_bomb())
        } else {
            None
        };
        let neighbor_bomb_count = if cell.is_revealed() && !cell.is_bomb() {
            Some(cell.neighbor_bomb_count())
        } else {
            None
        };

        Self {
            revealed: cell.is_revealed(),
            flagged: cell.is_flagged(),
            bomb_exposed: cell.is_bomb_exposed(),
            bomb,
            neighbor_bomb_count,
        }
    }
}

/// Read-only snapshot of a session for presentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub state: SessionState,
    pub running: bool,
    pub elapsed_secs: u32,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_session(session: &GameSession) -> Self {
        let size = session.size();
        let finished = session.is_finished();
        let mut cells = Array2::default(size.to_nd_index());
        for (coords, cell) in session.grid().iter() {
            cells[coords.to_nd_index()] = CellView::new(cell, finished);
        }

        Self {
            size,
            state: session.state(),
            running: session.is_running(),
            elapsed_secs: session.elapsed_secs(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        let (row, column) = coords;
        if row < self.size.0 && column < self.size.1 {
            Some(self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }
}
