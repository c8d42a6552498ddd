use serde::{Deserialize, Serialize};

use crate::catalog::Color;
use crate::piece::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Grid of locked cells, `rows × cols`, row 0 at the top
///
/// Dimensions are fixed at construction. Every query is total: positions
/// outside the grid read as invalid placements, never as errors.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Board {
    cols: usize,
    rows: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(cols: usize, rows: usize) -> Self {
        Board {
            cols,
            rows,
            cells: vec![vec![Cell::Empty; cols]; rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell at column `x`, row `y`; `Empty` outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Cell::Empty)
    }

    /// Writes inside the grid only
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        self.cells.get(y).map(Vec::as_slice)
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Cell::is_empty)
    }

    // Occupied in-grid cell; coordinates must already be bounds-checked
    fn is_occupied(&self, x: i32, y: i32) -> bool {
        !self.cells[y as usize][x as usize].is_empty()
    }

    /// Whether `piece` shifted by `(dx, dy)` fits
    ///
    /// Every filled cell must land inside the columns and above the floor.
    /// Cells above the top edge skip the occupancy check (spawn area) but
    /// not the column check.
    pub fn is_valid_position(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        let cols = self.cols as i32;
        let rows = self.rows as i32;
        piece.cells().all(|(x, y)| {
            let (x, y) = (x + dx, y + dy);
            if x < 0 || x >= cols || y >= rows {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Lock `piece` into the grid
    ///
    /// Cells above the top edge are dropped. So are cells outside the
    /// columns or below the floor, which only an unchecked rotation can
    /// produce.
    pub fn merge(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.cells() {
            if x >= 0 && y >= 0 {
                self.set_cell(x as usize, y as usize, Cell::Filled(color));
            }
        }
    }

    /// Remove every full row, shift the rest down, refill the top
    ///
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let before = self.cells.len();
        self.cells.retain(|row| row.iter().any(Cell::is_empty));
        let cleared = before - self.cells.len();
        if cleared > 0 {
            let mut refilled = vec![vec![Cell::Empty; self.cols]; cleared];
            refilled.append(&mut self.cells);
            self.cells = refilled;
        }
        cleared
    }

    /// Empty every cell in place
    pub fn reset(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::Empty);
        }
    }
}
