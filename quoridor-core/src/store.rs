// --- File: quoridor-service/quoridor-core/src/store.rs ---

//! Persistence (§9, "graceful degradation"): a `Store` trait the
//! registry writes through to on every successful mutation, plus two
//! implementations. In-memory state is always authoritative; a store
//! failure is logged and otherwise ignored, never surfaced to a caller.

use uuid::Uuid;

use crate::game::GameStateView;

/// A write-through persistence backend. `upsert` is called after every
/// accepted action; `load` is called once at startup per game id a
/// caller asks the registry to resurrect.
pub trait Store: Send + Sync {
    fn upsert(&self, view: &GameStateView) -> Result<(), StoreError>;
    fn load(&self, game_id: Uuid) -> Result<Option<GameStateView>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
#[error("store operation failed: {0}")]
pub struct StoreError(pub String);

/// The memory-only backend used when `DB_ENABLED` is unset or false.
/// Every call is a no-op success, so callers never need to branch on
/// which backend is configured.
#[derive(Debug, Default)]
pub struct NullStore;

impl Store for NullStore {
    fn upsert(&self, _view: &GameStateView) -> Result<(), StoreError> {
        Ok(())
    }

    fn load(&self, _game_id: Uuid) -> Result<Option<GameStateView>, StoreError> {
        Ok(None)
    }
}

/// A `rusqlite`-backed relational store. Games are stored one row per
/// game id, the entire view serialized as a JSON blob — the rule
/// engine's authoritative shape is the in-memory `GameState`, not a
/// relational schema, so there is nothing to gain from normalizing it.
pub struct SqliteStore {
    conn: std::sync::Mutex<rusqlite::Connection>,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open(path).map_err(|e| StoreError(e.to_string()))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS games (
                game_id TEXT PRIMARY KEY,
                state_json TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| StoreError(e.to_string()))?;
        Ok(SqliteStore { conn: std::sync::Mutex::new(conn) })
    }
}

impl Store for SqliteStore {
    fn upsert(&self, view: &GameStateView) -> Result<(), StoreError> {
        let json = serde_json::to_string(view).map_err(|e| StoreError(e.to_string()))?;
        let conn = self.conn.lock().expect("sqlite connection mutex poisoned");
        conn.execute(
            "INSERT INTO games (game_id, state_json) VALUES (?1, ?2)
             ON CONFLICT(game_id) DO UPDATE SET state_json = excluded.state_json",
            rusqlite::params![view.game_id.to_string(), json],
        )
        .map_err(|e| StoreError(e.to_string()))?;
        Ok(())
    }

    fn load(&self, game_id: Uuid) -> Result<Option<GameStateView>, StoreError> {
        let conn = self.conn.lock().expect("sqlite connection mutex poisoned");
        let mut stmt = conn
            .prepare("SELECT state_json FROM games WHERE game_id = ?1")
            .map_err(|e| StoreError(e.to_string()))?;
        let mut rows = stmt
            .query(rusqlite::params![game_id.to_string()])
            .map_err(|e| StoreError(e.to_string()))?;

        match rows.next().map_err(|e| StoreError(e.to_string()))? {
            Some(row) => {
                let json: String = row.get(0).map_err(|e| StoreError(e.to_string()))?;
                let view = serde_json::from_str(&json).map_err(|e| StoreError(e.to_string()))?;
                Ok(Some(view))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn null_store_never_fails_and_never_loads_anything() {
        let store = NullStore;
        let state = GameState::new(Uuid::nil(), "a", "b");
        store.upsert(&state.to_view()).unwrap();
        assert!(store.load(Uuid::nil()).unwrap().is_none());
    }

    #[test]
    fn sqlite_store_round_trips_a_view() {
        let store = SqliteStore::open(":memory:").unwrap();
        let state = GameState::new(Uuid::nil(), "Alice", "Bob");
        store.upsert(&state.to_view()).unwrap();
        let loaded = store.load(Uuid::nil()).unwrap().expect("row was just inserted");
        assert_eq!(loaded.game_id, state.game_id);
        assert_eq!(loaded.players.player1.name, "Alice");
    }

    #[test]
    fn sqlite_store_upsert_overwrites_existing_row() {
        let store = SqliteStore::open(":memory:").unwrap();
        let mut state = GameState::new(Uuid::nil(), "Alice", "Bob");
        store.upsert(&state.to_view()).unwrap();
        state.turn_count = 5;
        store.upsert(&state.to_view()).unwrap();
        let loaded = store.load(Uuid::nil()).unwrap().unwrap();
        assert_eq!(loaded.turn_count, 5);
    }
}
