// --- File: quoridor-service/quoridor-core/src/pathfinder.rs ---

//! Pathfinder (C3): breadth-first reachability and shortest-path
//! distance over the wall-constrained grid graph.
//!
//! The teacher crate used `petgraph::algo::dijkstra` for this (uniform
//! edge weights make it equivalent to BFS, but petgraph's neighbor
//! iteration order isn't specified, so two runs over the same graph
//! aren't guaranteed to tie-break identically). The spec calls for
//! deterministic tie-breaking on the fixed up/right/down/left neighbor
//! order, so this is a plain `VecDeque` BFS over `board::neighbors`
//! instead — no external graph library needed for an 81-node board.

use std::collections::{HashSet, VecDeque};

use crate::board;
use crate::types::Position;
use crate::wall_index::WallIndex;

/// Performs no caching; callers may invoke it multiple times per turn
/// without concern for staleness, since the board never exceeds 81
/// nodes.
pub struct Pathfinder<'a> {
    walls: &'a WallIndex,
}

impl<'a> Pathfinder<'a> {
    pub fn new(walls: &'a WallIndex) -> Self {
        Pathfinder { walls }
    }

    /// `true` if some cell satisfying `goal` is reachable from `start`.
    pub fn reachable(&self, start: Position, goal: impl Fn(Position) -> bool) -> bool {
        self.shortest_distance(start, goal).is_some()
    }

    /// The length of the shortest path from `start` to any cell
    /// satisfying `goal`, or `None` if no such cell is reachable.
    pub fn shortest_distance(&self, start: Position, goal: impl Fn(Position) -> bool) -> Option<usize> {
        if goal(start) {
            return Some(0);
        }

        let mut visited = HashSet::new();
        visited.insert(start);
        let mut queue = VecDeque::new();
        queue.push_back((start, 0usize));

        while let Some((pos, dist)) = queue.pop_front() {
            for next in board::neighbors(pos, self.walls) {
                if !visited.insert(next) {
                    continue;
                }
                if goal(next) {
                    return Some(dist + 1);
                }
                queue.push_back((next, dist + 1));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Orientation, Wall};

    #[test]
    fn open_board_reaches_goal_row() {
        let walls = WallIndex::new();
        let pf = Pathfinder::new(&walls);
        assert!(pf.reachable((8, 4), |p| p.0 == 0));
        assert_eq!(pf.shortest_distance((8, 4), |p| p.0 == 0), Some(8));
    }

    #[test]
    fn already_on_goal_row_has_zero_distance() {
        let walls = WallIndex::new();
        let pf = Pathfinder::new(&walls);
        assert_eq!(pf.shortest_distance((0, 2), |p| p.0 == 0), Some(0));
    }

    #[test]
    fn a_fully_boxed_pawn_is_unreachable() {
        let mut walls = WallIndex::new();
        // Box in (0,0) with a horizontal wall below and a vertical wall to the right.
        walls.insert(Wall::new(0, 0, Orientation::Horizontal));
        walls.insert(Wall::new(0, 0, Orientation::Vertical));
        let pf = Pathfinder::new(&walls);
        assert!(!pf.reachable((0, 0), |p| p.0 == 8));
        assert_eq!(pf.shortest_distance((0, 0), |p| p.0 == 8), None);
    }
}
