//! Top-10 leaderboard, stored apart from the game state

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::kv::KvStore;
use crate::types::{LeaderboardEntry, LEADERBOARD_KEY, LEADERBOARD_SIZE};

/// Current leaderboard, best first. Missing or malformed data reads as empty.
pub fn get_leaderboard<S: KvStore + ?Sized>(store: &S) -> Vec<LeaderboardEntry> {
    let Some(raw) = store.get(LEADERBOARD_KEY) else {
        return Vec::new();
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("[Store] ignoring unreadable leaderboard: {}", e);
            Vec::new()
        }
    }
}

/// Record a score stamped with the current time
pub fn save_score<S: KvStore + ?Sized>(
    store: &mut S,
    name: &str,
    score: u32,
) -> Result<Vec<LeaderboardEntry>> {
    save_score_at(store, name, score, Utc::now())
}

/// Record a score, keep the best [`LEADERBOARD_SIZE`] and persist
///
/// Ties keep their insertion order, so an equal later score ranks below.
pub fn save_score_at<S: KvStore + ?Sized>(
    store: &mut S,
    name: &str,
    score: u32,
    date: DateTime<Utc>,
) -> Result<Vec<LeaderboardEntry>> {
    let mut entries = get_leaderboard(store);
    entries.push(LeaderboardEntry {
        name: name.to_string(),
        score,
        date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_SIZE);

    let json = serde_json::to_string(&entries).context("serializing leaderboard")?;
    store.set(LEADERBOARD_KEY, &json)?;
    Ok(entries)
}
