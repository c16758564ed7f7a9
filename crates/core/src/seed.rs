//! Seed utilities - daily seeds, clock seeds and shareable challenge tokens

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Local, NaiveDate, Utc};

/// Daily seed for a calendar date: `YYYY-MM-DD`
pub fn daily_seed_for(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Daily seed for today's local calendar date
pub fn get_daily_seed() -> String {
    daily_seed_for(Local::now().date_naive())
}

/// Current wall-clock time in epoch milliseconds
pub fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// A fresh seed derived from the clock, for non-daily trays
pub fn clock_seed() -> String {
    now_ms().to_string()
}

/// Where tray respawns take their seed from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeedSource {
    /// Daily games use today's date, free play uses the clock.
    #[default]
    Clock,
    /// Always use this seed.
    Fixed(String),
}

impl SeedSource {
    /// Resolve the seed for a respawn
    pub fn seed(&self, is_daily: bool) -> String {
        match self {
            SeedSource::Fixed(seed) => seed.clone(),
            SeedSource::Clock if is_daily => get_daily_seed(),
            SeedSource::Clock => clock_seed(),
        }
    }
}

/// Share token for a given daily seed: standard padded base64 of
/// `"{seed}-{score}-{combo}"`
pub fn shareable_seed_for(daily_seed: &str, score: u32, combo: u32) -> String {
    STANDARD.encode(format!("{}-{}-{}", daily_seed, score, combo))
}

/// Share token for today's daily seed. Display-only; nothing decodes it.
pub fn generate_shareable_seed(score: u32, combo: u32) -> String {
    shareable_seed_for(&get_daily_seed(), score, combo)
}

/// Challenge link carrying a share token
pub fn challenge_url(base_url: &str, token: &str) -> String {
    format!("{}?seed={}", base_url.trim_end_matches('?'), token)
}
