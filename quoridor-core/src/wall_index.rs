// --- File: quoridor-service/quoridor-core/src/wall_index.rs ---

//! Wall Index (C2): the set of placed walls plus two derived structures
//! kept strictly in sync through `insert`/`remove` — a blocked-edge set
//! for O(1) adjacency lookups, and an anchor set for O(1) overlap/cross
//! checks. Never mutate the two derived structures directly; route every
//! change through `insert`/`remove` so they can't drift apart (see
//! "Wall index duality" in the design notes).

use std::collections::{HashMap, HashSet};

use crate::types::{Orientation, Position, Wall};

#[derive(Debug, Clone, Default)]
pub struct WallIndex {
    walls: HashSet<Wall>,
    blocked_edges: HashSet<(Position, Position)>,
    anchors: HashMap<(usize, usize), Orientation>,
}

impl WallIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placed(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter()
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// `true` if `from -> to` is blocked by a placed wall. Callers never
    /// need to pass the board edge itself; out-of-bounds destinations
    /// are simply never queried by `board::neighbors`.
    pub fn is_blocked(&self, from: Position, to: Position) -> bool {
        self.blocked_edges.contains(&(from, to))
    }

    /// `true` if `wall` would overlap an already-placed wall: either of
    /// its two blocked-edge pairs is already blocked, or its anchor is
    /// already occupied by a wall of the same orientation.
    pub fn would_overlap(&self, wall: Wall) -> bool {
        if self.anchors.get(&(wall.row, wall.col)) == Some(&wall.orientation) {
            return true;
        }
        wall.blocked_edges()
            .iter()
            .any(|&(a, b)| self.blocked_edges.contains(&(a, b)))
    }

    /// `true` if `wall` would cross an already-placed wall: same anchor,
    /// opposite orientation.
    pub fn would_cross(&self, wall: Wall) -> bool {
        matches!(
            self.anchors.get(&(wall.row, wall.col)),
            Some(&existing) if existing != wall.orientation
        )
    }

    /// Inserts `wall`, updating both derived structures. Idempotent if
    /// the wall is already present.
    pub fn insert(&mut self, wall: Wall) {
        self.walls.insert(wall);
        self.anchors.insert((wall.row, wall.col), wall.orientation);
        for (a, b) in wall.blocked_edges() {
            self.blocked_edges.insert((a, b));
            self.blocked_edges.insert((b, a));
        }
    }

    /// Removes `wall`, updating both derived structures. Used both to
    /// retract a speculative placement and, in principle, to undo a
    /// committed one.
    pub fn remove(&mut self, wall: Wall) {
        self.walls.remove(&wall);
        self.anchors.remove(&(wall.row, wall.col));
        for (a, b) in wall.blocked_edges() {
            self.blocked_edges.remove(&(a, b));
            self.blocked_edges.remove(&(b, a));
        }
    }
}

/// RAII guard that inserts a wall on construction and guarantees its
/// removal on drop, including on early return or panic — the "scoped
/// apply/undo" idiom the design notes prefer over cloning the whole
/// index for every hypothetical placement.
pub struct SpeculativeWall<'a> {
    walls: &'a mut WallIndex,
    wall: Wall,
}

impl<'a> SpeculativeWall<'a> {
    pub fn insert(walls: &'a mut WallIndex, wall: Wall) -> Self {
        walls.insert(wall);
        SpeculativeWall { walls, wall }
    }

    pub fn walls(&self) -> &WallIndex {
        self.walls
    }
}

impl Drop for SpeculativeWall<'_> {
    fn drop(&mut self) {
        self.walls.remove(self.wall);
    }
}
