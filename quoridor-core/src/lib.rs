// --- File: quoridor-service/quoridor-core/src/lib.rs ---

//! # Quoridor Core Library
//!
//! Core game logic for the Quoridor board game behind a request/response
//! service boundary: board representation and wall indexing, rules
//! enforcement (including jumps and the path-connectivity invariant),
//! BFS pathfinding, a three-tier AI opponent, and an in-memory game
//! registry with optional write-through persistence.
//!
//! Consumers (an HTTP surface, a CLI, a test harness) talk to a
//! [`GameRegistry`] and the [`api`] request/response types; everything
//! else here is implementation detail they don't need to reach into
//! directly.

pub mod api;
pub mod board;
pub mod config;
pub mod errors;
pub mod game;
pub mod pathfinder;
pub mod player;
pub mod policy;
pub mod registry;
pub mod store;
pub mod types;
pub mod validator;
pub mod wall_index;

pub use errors::ErrorKind;
pub use game::{GameState, GameStateView, Status};
pub use player::PlayerId;
pub use policy::{ActionRecord, Difficulty};
pub use registry::GameRegistry;
pub use types::{Orientation, Position, Wall, BOARD_SIZE};
