// --- File: quoridor-service/quoridor-core/src/errors.rs ---

//! The seven stable error kinds of the rule engine, each mapped
//! one-to-one to an HTTP status code. Rule-engine errors are always
//! recovered locally: the game state is left unchanged and one of
//! these is returned.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unknown game id")]
    GameNotFound,
    #[error("action attempted on a finished game")]
    GameFinished,
    #[error("acting player is not the current turn")]
    NotYourTurn,
    #[error("target is not in the legal pawn-move set")]
    InvalidMove,
    #[error("wall position is out of range, overlaps, or crosses another wall")]
    InvalidWallPosition,
    #[error("player has no walls remaining")]
    NoWallsRemaining,
    #[error("wall placement would cut off a player's path to their goal")]
    PathBlocked,
}

impl ErrorKind {
    /// The HTTP status an external surface should map this to (§6/§7).
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::GameNotFound => 404,
            _ => 400,
        }
    }

    /// The stable wire identifier used in `{success:false, error:<kind>}`
    /// responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::GameNotFound => "game_not_found",
            ErrorKind::GameFinished => "game_finished",
            ErrorKind::NotYourTurn => "not_your_turn",
            ErrorKind::InvalidMove => "invalid_move",
            ErrorKind::InvalidWallPosition => "invalid_wall_position",
            ErrorKind::NoWallsRemaining => "no_walls_remaining",
            ErrorKind::PathBlocked => "path_blocked",
        }
    }
}
