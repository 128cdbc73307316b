// --- File: quoridor-service/quoridor-cli/src/main.rs ---

//! A small demo driver that exercises the game registry end to end:
//! creates a game, then lets the normal-tier opponent play both seats
//! until someone reaches their goal row, logging every turn.

use quoridor_core::config::Config;
use quoridor_core::policy::Difficulty;
use quoridor_core::registry::GameRegistry;
use quoridor_core::store::{NullStore, SqliteStore, Store};
use quoridor_core::{ErrorKind, Status};

fn main() {
    env_logger::init();

    let config = Config::from_env();
    let store: Box<dyn Store> = if config.db_enabled {
        match SqliteStore::open(&config.db_path) {
            Ok(store) => Box::new(store),
            Err(err) => {
                log::warn!("failed to open sqlite store at {}: {err}, falling back to memory-only", config.db_path);
                Box::new(NullStore)
            }
        }
    } else {
        Box::new(NullStore)
    };

    let registry = GameRegistry::new(store);
    let created = registry.create("Alice", Difficulty::Normal);
    println!("created game {}", created.game_id);

    loop {
        match registry.apply_opponent_turn(created.game_id) {
            Ok((view, action)) => {
                log::info!("turn {}: player {} played {:?}", view.turn_count, view.current_turn, action);
                if view.status == Status::Finished {
                    println!(
                        "game {} finished after {} turns, winner: player {}",
                        view.game_id,
                        view.turn_count,
                        view.winner.expect("finished games always have a winner")
                    );
                    break;
                }
            }
            Err(ErrorKind::GameFinished) => break,
            Err(err) => {
                eprintln!("unexpected error driving demo game: {err}");
                break;
            }
        }
    }
}
