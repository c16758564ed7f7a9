//! Persistence module - game snapshots and the leaderboard
//!
//! The engine never touches storage. Callers hand a [`KvStore`] to the
//! functions here after every state change.
//!
//! # Layout
//!
//! Two independent string-keyed JSON blobs:
//!
//! - `combo-blocks-state` (configurable): one [`GameState`](crate::core::GameState) snapshot
//! - `combo-blocks-lb`: array of at most 10 [`LeaderboardEntry`](crate::types::LeaderboardEntry)
//!
//! There is no schema versioning; a blob that no longer parses reads as absent
//! and the caller starts a fresh game.
//!
//! # Backends
//!
//! - [`MemoryStore`]: a `HashMap`, used by tests and when no data directory is set
//! - [`FileStore`]: one `<key>.json` file per key
//!
//! # Environment Variables
//!
//! - `COMBO_BLOCKS_DATA_DIR`: directory for [`FileStore`] (unset: in memory)
//! - `COMBO_BLOCKS_STATE_KEY`: key for the game snapshot
//!
//! # Example
//!
//! ```
//! use combo_blocks_store::{get_leaderboard, load_game_state, save_game_state, save_score, MemoryStore};
//! use combo_blocks_core::GameState;
//!
//! let mut store = MemoryStore::new();
//! let state = GameState::with_seed(false, "doc");
//! save_game_state(&mut store, &state, "combo-blocks-state").unwrap();
//! assert_eq!(load_game_state(&store, None, "combo-blocks-state"), Some(state));
//!
//! save_score(&mut store, "ada", 420).unwrap();
//! assert_eq!(get_leaderboard(&store)[0].score, 420);
//! ```

pub mod config;
pub mod game;
pub mod kv;
pub mod leaderboard;

pub use combo_blocks_core as core;
pub use combo_blocks_types as types;

pub use config::StoreConfig;
pub use game::{clear_game_state, load_game_state, save_game_state};
pub use kv::{FileStore, KvStore, MemoryStore};
pub use leaderboard::{get_leaderboard, save_score, save_score_at};
