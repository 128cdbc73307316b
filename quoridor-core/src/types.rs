// --- File: quoridor-service/quoridor-core/src/types.rs ---

//! Defines core type aliases and small value types used throughout the library.

use serde::{Deserialize, Serialize};

/// A coordinate on the Quoridor board: (row, column), both in `0..9`.
/// (0, 0) is the top-left corner; row 0 is player 1's goal line.
pub type Position = (usize, usize);

/// The board is always a 9x9 grid; wall anchors live on the 8x8 grid of
/// intersections between cells.
pub const BOARD_SIZE: usize = 9;

/// The orientation of a placed wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A two-cell wall anchored at the top-left intersection `(row, col)`,
/// both in `0..8`. A horizontal wall blocks the two vertical edges below
/// `(row, col)` and `(row, col + 1)`; a vertical wall blocks the two
/// horizontal edges to the right of `(row, col)` and `(row + 1, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl Wall {
    pub fn new(row: usize, col: usize, orientation: Orientation) -> Self {
        Wall { row, col, orientation }
    }

    /// `true` if `row`/`col` fall within the `[0, 7]` anchor range a wall
    /// may legally be placed at.
    pub fn in_anchor_range(&self) -> bool {
        self.row < BOARD_SIZE - 1 && self.col < BOARD_SIZE - 1
    }

    /// The pair of directed cell-to-cell edges this wall blocks.
    pub fn blocked_edges(&self) -> [(Position, Position); 2] {
        let (r, c) = (self.row, self.col);
        match self.orientation {
            Orientation::Horizontal => [((r, c), (r + 1, c)), ((r, c + 1), (r + 1, c + 1))],
            Orientation::Vertical => [((r, c), (r, c + 1)), ((r + 1, c), (r + 1, c + 1))],
        }
    }
}
