use serde::{Deserialize, Serialize};

use crate::catalog::Color;

/// Occupancy matrix of a piece, stored as rows of cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Short rows are padded with empty cells to the widest row
    pub fn new(mut rows: Vec<Vec<bool>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, false);
        }
        Shape { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// `(col, row)` offsets of every filled cell, row by row
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(col, _)| (col, row))
        })
    }

    /// 90° clockwise: an R×C shape becomes C×R with new[c][r] = old[R-1-r][c]
    pub fn rotated_clockwise(&self) -> Shape {
        let height = self.height();
        let rows = (0..self.width())
            .map(|col| {
                (0..height)
                    .map(|row| self.is_filled(col, height - row - 1))
                    .collect()
            })
            .collect();
        Shape { rows }
    }
}

/// The active falling piece
///
/// Knows nothing about the board; callers validate moves through
/// `Board::is_valid_position` before applying them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    shape: Shape,
    color: Color,
    // Board coordinates of the shape's top-left corner
    x: i32,
    y: i32,
}

impl Piece {
    /// Spawn at the centered column of a board `columns` wide, top row
    pub fn new(shape: Shape, color: Color, columns: usize) -> Self {
        let centered = columns / 2;
        let x = centered.min(columns.saturating_sub(shape.width()));
        Piece {
            shape,
            color,
            x: x as i32,
            y: 0,
        }
    }

    /// Place a piece at an explicit position
    pub fn at(shape: Shape, color: Color, x: i32, y: i32) -> Self {
        Piece { shape, color, x, y }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Unchecked translation
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Unchecked clockwise rotation around the top-left corner
    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated_clockwise();
    }

    /// Absolute `(x, y)` of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(|(col, row)| (self.x + col as i32, self.y + row as i32))
    }
}
