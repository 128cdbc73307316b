// --- File: quoridor-service/quoridor-core/src/game.rs ---

//! Game State (C5): the two players, the wall set, and the scalar
//! fields that together make up one game. Owns nothing about rule
//! legality — that's the Move Validator's job — but does own the
//! serialization into the external JSON schema (§6).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::player::{PlayerId, PlayerState};
use crate::types::{Orientation, Wall};
use crate::wall_index::WallIndex;

pub const INITIAL_WALLS_PER_PLAYER: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Finished,
}

/// The authoritative, in-memory representation of one game. Mutated
/// only through the registry, one action at a time (§5).
#[derive(Debug, Clone)]
pub struct GameState {
    pub game_id: Uuid,
    pub status: Status,
    pub current_turn: PlayerId,
    pub turn_count: u64,
    pub player1: PlayerState,
    pub player2: PlayerState,
    pub walls: WallIndex,
    pub winner: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameState {
    /// Creates a fresh game: player 1 at (8,4), player 2 at (0,4), 10
    /// walls each, current_turn = 1, empty wall set.
    pub fn new(game_id: Uuid, player1_name: impl Into<String>, player2_name: impl Into<String>) -> Self {
        let now = Utc::now();
        GameState {
            game_id,
            status: Status::InProgress,
            current_turn: PlayerId::Player1,
            turn_count: 0,
            player1: PlayerState::new(player1_name, PlayerId::Player1, INITIAL_WALLS_PER_PLAYER),
            player2: PlayerState::new(player2_name, PlayerId::Player2, INITIAL_WALLS_PER_PLAYER),
            walls: WallIndex::new(),
            winner: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        match id {
            PlayerId::Player1 => &self.player1,
            PlayerId::Player2 => &self.player2,
        }
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        match id {
            PlayerId::Player1 => &mut self.player1,
            PlayerId::Player2 => &mut self.player2,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Every placed wall as the external `{row, col, orientation}` shape.
    pub fn walls_placed(&self) -> Vec<Wall> {
        self.walls.placed().copied().collect()
    }

    pub fn to_view(&self) -> GameStateView {
        GameStateView {
            game_id: self.game_id,
            status: self.status,
            current_turn: self.current_turn.number(),
            turn_count: self.turn_count,
            players: PlayersView {
                player1: PlayerView::from(&self.player1),
                player2: PlayerView::from(&self.player2),
            },
            walls: self.walls_placed().into_iter().map(WallView::from).collect(),
            winner: self.winner.map(|p| p.number()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Reconstructs a `GameState` from its serialized view — the
    /// inverse of [`to_view`](Self::to_view), used both by the
    /// round-trip property test and to rehydrate a game the registry
    /// doesn't hold in memory but finds in the store (a cold lookup
    /// after a process restart).
    pub fn from_view(view: &GameStateView) -> Self {
        let mut walls = WallIndex::new();
        for w in &view.walls {
            walls.insert(Wall::new(w.row, w.col, w.orientation));
        }

        GameState {
            game_id: view.game_id,
            status: view.status,
            current_turn: PlayerId::from_number(view.current_turn).expect("wire current_turn is always 1 or 2"),
            turn_count: view.turn_count,
            player1: PlayerState {
                name: view.players.player1.name.clone(),
                position: (view.players.player1.position.row, view.players.player1.position.col),
                walls_remaining: view.players.player1.walls_remaining,
                goal_row: view.players.player1.goal_row,
            },
            player2: PlayerState {
                name: view.players.player2.name.clone(),
                position: (view.players.player2.position.row, view.players.player2.position.col),
                walls_remaining: view.players.player2.walls_remaining,
                goal_row: view.players.player2.goal_row,
            },
            walls,
            winner: view.winner.map(|n| PlayerId::from_number(n).expect("wire winner is always 1 or 2")),
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

/// The serializable view matching the external JSON schema (§6)
/// verbatim. Kept separate from `GameState` so the wall index's
/// internal derived structures never leak into the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateView {
    pub game_id: Uuid,
    pub status: Status,
    pub current_turn: u8,
    pub turn_count: u64,
    pub players: PlayersView,
    pub walls: Vec<WallView>,
    pub winner: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayersView {
    pub player1: PlayerView,
    pub player2: PlayerView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub position: PositionView,
    pub walls_remaining: u8,
    pub goal_row: usize,
}

impl From<&PlayerState> for PlayerView {
    fn from(p: &PlayerState) -> Self {
        PlayerView {
            name: p.name.clone(),
            position: PositionView { row: p.position.0, col: p.position.1 },
            walls_remaining: p.walls_remaining,
            goal_row: p.goal_row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionView {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallView {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl From<Wall> for WallView {
    fn from(w: Wall) -> Self {
        WallView { row: w.row, col: w.col, orientation: w.orientation }
    }
}
