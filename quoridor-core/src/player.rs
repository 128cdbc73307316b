// --- File: quoridor-service/quoridor-core/src/player.rs ---

//! Defines the `PlayerId` enum (which seat is acting) and `PlayerState`
//! (the per-player record the spec's data model calls "Player").

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Identifies one of the two seats in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    /// Returns the opponent of this player.
    pub fn opponent(&self) -> Self {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// Returns a simple string name for the player.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerId::Player1 => "player1",
            PlayerId::Player2 => "player2",
        }
    }

    /// Returns a numerical representation (1 or 2), as used in `winner`
    /// and `current_turn` on the wire.
    pub fn number(&self) -> u8 {
        match self {
            PlayerId::Player1 => 1,
            PlayerId::Player2 => 2,
        }
    }

    /// The inverse of [`number`](Self::number). `None` for anything
    /// outside `{1, 2}`.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(PlayerId::Player1),
            2 => Some(PlayerId::Player2),
            _ => None,
        }
    }

    /// The row this player must reach to win: row 0 for player 1, the
    /// bottom row for player 2.
    pub fn goal_row(&self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => crate::types::BOARD_SIZE - 1,
        }
    }

    /// The starting position for a fresh game.
    pub fn start_position(&self) -> Position {
        let center = crate::types::BOARD_SIZE / 2;
        match self {
            PlayerId::Player1 => (crate::types::BOARD_SIZE - 1, center),
            PlayerId::Player2 => (0, center),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The per-player record tracked inside a `GameState`: name, pawn
/// position, remaining walls, and goal row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub position: Position,
    pub walls_remaining: u8,
    pub goal_row: usize,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, id: PlayerId, walls: u8) -> Self {
        PlayerState {
            name: name.into(),
            position: id.start_position(),
            walls_remaining: walls,
            goal_row: id.goal_row(),
        }
    }

    pub fn at_goal(&self) -> bool {
        self.position.0 == self.goal_row
    }
}
