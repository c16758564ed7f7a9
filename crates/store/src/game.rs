//! Game state snapshots

use anyhow::{Context, Result};

use crate::core::GameState;
use crate::kv::KvStore;

/// Serialize `state` under `key`
pub fn save_game_state<S: KvStore + ?Sized>(
    store: &mut S,
    state: &GameState,
    key: &str,
) -> Result<()> {
    let json = serde_json::to_string(state).context("serializing game state")?;
    store.set(key, &json)
}

/// Load the snapshot under `key`
///
/// Returns `None` when nothing is stored, when the blob does not parse, or
/// when `is_daily` names a mode that differs from the stored one.
pub fn load_game_state<S: KvStore + ?Sized>(
    store: &S,
    is_daily: Option<bool>,
    key: &str,
) -> Option<GameState> {
    let raw = store.get(key)?;
    let state: GameState = match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("[Store] ignoring unreadable game state under {:?}: {}", key, e);
            return None;
        }
    };

    match is_daily {
        Some(mode) if mode != state.is_daily => None,
        _ => Some(state),
    }
}

/// Drop the snapshot under `key`
pub fn clear_game_state<S: KvStore + ?Sized>(store: &mut S, key: &str) -> Result<()> {
    store.delete(key)
}
