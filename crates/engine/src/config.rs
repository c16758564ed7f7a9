//! Session configuration

use crate::store::StoreConfig;

pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";
pub const DEFAULT_SHARE_URL: &str = "https://combo-blocks.app/challenge";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Start (and resume) in daily mode.
    pub daily: bool,
    /// Name written to the leaderboard on game over.
    pub player_name: String,
    /// Daily games stay off the leaderboard unless this is set.
    pub record_daily: bool,
    pub share_url: String,
    pub store: StoreConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            daily: false,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            record_daily: false,
            share_url: DEFAULT_SHARE_URL.to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let daily = env::var("COMBO_BLOCKS_DAILY")
            .ok()
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        let player_name = env::var("COMBO_BLOCKS_PLAYER")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());

        let record_daily = env::var("COMBO_BLOCKS_RECORD_DAILY")
            .ok()
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        let share_url = env::var("COMBO_BLOCKS_SHARE_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SHARE_URL.to_string());

        Self {
            daily,
            player_name,
            record_daily,
            share_url,
            store: StoreConfig::from_env(),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert!(!config.daily);
        assert!(!config.record_daily);
        assert_eq!(config.player_name, "Anonymous");
        assert_eq!(config.share_url, "https://combo-blocks.app/challenge");
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_session_config_from_env() {
        // This test just ensures it doesn't panic
        let _config = SessionConfig::from_env();
    }
}
