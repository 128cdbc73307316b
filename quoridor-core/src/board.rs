// --- File: quoridor-service/quoridor-core/src/board.rs ---

//! Board Model (C1): coordinates and cell adjacency under walls.
//!
//! The teacher crate represented the board as a `petgraph::UnGraph` and
//! removed edges as walls were placed. That gives correct connectivity
//! but no control over neighbor-visit order, which the pathfinder needs
//! to be deterministic (fixed up/right/down/left tie-breaking). Here the
//! board is just the `[0, BOARD_SIZE)` grid with neighbor adjacency
//! computed on demand and filtered through the `WallIndex`, so ordering
//! is explicit rather than an artifact of graph storage.

use crate::types::{Position, BOARD_SIZE};
use crate::wall_index::WallIndex;

/// `true` if `pos` lies on the 9x9 board.
pub fn in_bounds(pos: Position) -> bool {
    pos.0 < BOARD_SIZE && pos.1 < BOARD_SIZE
}

/// The orthogonal in-bounds neighbors of `pos` not blocked by a wall,
/// in fixed order: up, right, down, left. Downstream BFS relies on this
/// order for deterministic tie-breaking.
pub fn neighbors(pos: Position, walls: &WallIndex) -> Vec<Position> {
    let (row, col) = pos;
    let candidates = [
        row.checked_sub(1).map(|r| (r, col)),            // up
        (col + 1 < BOARD_SIZE).then(|| (row, col + 1)),   // right
        (row + 1 < BOARD_SIZE).then(|| (row + 1, col)),   // down
        col.checked_sub(1).map(|c| (row, c)),             // left
    ];

    candidates
        .into_iter()
        .flatten()
        .filter(|&dest| !walls.is_blocked(pos, dest))
        .collect()
}
