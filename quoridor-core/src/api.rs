// --- File: quoridor-service/quoridor-core/src/api.rs ---

//! Wire-format request/response types for the external interface (§6),
//! mirroring the HTTP table there verbatim. A transport layer (HTTP,
//! CLI, whatever) is expected to deserialize into these, resolve which
//! seat is acting from its own session/auth context (out of scope
//! here — see spec.md §1, "authentication"), call the registry, and
//! serialize its `Result` back out. This module owns none of that
//! transport itself, only the shapes crossing the boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ErrorKind;
use crate::game::{GameStateView, PositionView, Status, WallView};
use crate::policy::{ActionRecord, Difficulty};
use crate::registry::ValidActions;
use crate::types::Orientation;

fn default_player_name() -> String {
    "Player".to_string()
}

/// `POST /games` request body: `{player_name?, ai_difficulty?}`,
/// defaulting to `"Player"` and `normal` respectively.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default = "default_player_name")]
    pub player_name: String,
    #[serde(default)]
    pub ai_difficulty: Difficulty,
}

/// `POST /games` response: `{game_id, status, current_turn, message}`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGameResponse {
    pub game_id: Uuid,
    pub status: Status,
    pub current_turn: u8,
    pub message: String,
}

impl CreateGameResponse {
    pub fn from_view(view: &GameStateView) -> Self {
        CreateGameResponse {
            game_id: view.game_id,
            status: view.status,
            current_turn: view.current_turn,
            message: "game created".to_string(),
        }
    }
}

/// `POST /games/{game_id}/move` request body: `{row, col}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub row: usize,
    pub col: usize,
}

/// `POST /games/{game_id}/wall` request body: `{row, col, orientation}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WallRequest {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

/// `{success:true, game_state, message}`, shared by the move and wall
/// responses.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub game_state: GameStateView,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(game_state: GameStateView, message: impl Into<String>) -> Self {
        ActionResponse { success: true, game_state, message: message.into() }
    }
}

/// `POST /games/{game_id}/ai-move` response:
/// `{success:true, action, game_state, message}`. Takes no request
/// body (§6) — the acting seat and AI tier are both already fixed on
/// the game by `create`.
#[derive(Debug, Clone, Serialize)]
pub struct AiMoveResponse {
    pub success: bool,
    pub action: ActionRecord,
    pub game_state: GameStateView,
    pub message: String,
}

impl AiMoveResponse {
    pub fn ok(game_state: GameStateView, action: ActionRecord) -> Self {
        AiMoveResponse { success: true, action, game_state, message: "ai move applied".to_string() }
    }
}

/// `GET /games/{game_id}/valid-moves` response:
/// `{valid_pawn_moves, valid_wall_placements, walls_remaining}`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidActionsResponse {
    pub valid_pawn_moves: Vec<PositionView>,
    pub valid_wall_placements: Vec<WallView>,
    pub walls_remaining: u8,
}

impl From<ValidActions> for ValidActionsResponse {
    fn from(actions: ValidActions) -> Self {
        ValidActionsResponse {
            valid_pawn_moves: actions.pawn_moves,
            valid_wall_placements: actions.wall_placements,
            walls_remaining: actions.walls_remaining,
        }
    }
}

/// The `{success:false, error:<kind>, message:<text>}` shape every
/// rule-violation or not-found response uses (§6/§7).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
}

impl From<ErrorKind> for ErrorResponse {
    fn from(kind: ErrorKind) -> Self {
        ErrorResponse { success: false, error: kind.as_str(), message: kind.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_game_request_defaults_match_spec() {
        let req: CreateGameRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.player_name, "Player");
        assert_eq!(req.ai_difficulty, Difficulty::Normal);
    }

    #[test]
    fn error_response_carries_the_stable_kind_string() {
        let resp: ErrorResponse = ErrorKind::PathBlocked.into();
        assert!(!resp.success);
        assert_eq!(resp.error, "path_blocked");
    }
}
