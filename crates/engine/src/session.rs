//! Game session: one game, one store, one player

use anyhow::Result;

use crate::config::SessionConfig;
use crate::core::seed::challenge_url;
use crate::core::{check_game_over, generate_shareable_seed, GameState, PlaceOutcome, SeedSource};
use crate::place::{apply_place, PlaceError};
use crate::store::{get_leaderboard, load_game_state, save_game_state, save_score, KvStore};
use crate::types::LeaderboardEntry;

pub struct Session<S: KvStore> {
    store: S,
    config: SessionConfig,
    state: GameState,
    seeds: SeedSource,
    /// Set once the final score of the current game has been handled.
    score_recorded: bool,
}

impl<S: KvStore> Session<S> {
    /// Start a fresh game in the configured mode
    pub fn new(store: S, config: SessionConfig) -> Self {
        Self::with_seeds(store, config, SeedSource::Clock)
    }

    /// Start a fresh game, dealing every tray from `seeds`
    pub fn with_seeds(store: S, config: SessionConfig, seeds: SeedSource) -> Self {
        let state = GameState::with_seed(config.daily, &seeds.seed(config.daily));
        let mut session = Self::from_parts(store, config, state, seeds);
        session.persist();
        session
    }

    /// Continue from an existing state
    pub fn with_state(store: S, config: SessionConfig, state: GameState) -> Self {
        Self::from_parts(store, config, state, SeedSource::Clock)
    }

    /// Resume the stored game for the configured mode, or start a new one
    pub fn resume_or_new(store: S, config: SessionConfig) -> Self {
        match load_game_state(&store, Some(config.daily), &config.store.state_key) {
            Some(state) => {
                eprintln!(
                    "[Session] resumed game: score={} moves={} daily={}",
                    state.score, state.moves, state.is_daily
                );
                Self::with_state(store, config, state)
            }
            None => Self::new(store, config),
        }
    }

    fn from_parts(store: S, config: SessionConfig, state: GameState, seeds: SeedSource) -> Self {
        let score_recorded = state.game_over;
        Self {
            store,
            config,
            state,
            seeds,
            score_recorded,
        }
    }

    pub fn set_seed_source(&mut self, seeds: SeedSource) {
        self.seeds = seeds;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Place the tray piece `piece_id` with its pivot at (row, col)
    ///
    /// The state is saved after every accepted placement. A rejected
    /// placement still refreshes `game_over`, so a stuck tray ends the game.
    pub fn place(
        &mut self,
        piece_id: &str,
        row: i32,
        col: i32,
        time: Option<u64>,
    ) -> Result<PlaceOutcome, PlaceError> {
        match apply_place(&self.state, piece_id, row, col, time, &self.seeds) {
            Ok(outcome) => {
                self.state = outcome.state.clone();
                self.persist();
                if self.state.game_over {
                    self.record_score();
                }
                Ok(outcome)
            }
            Err(PlaceError::InvalidPlacement) => {
                let game_over = check_game_over(&self.state);
                if game_over != self.state.game_over {
                    self.state.game_over = game_over;
                    self.persist();
                    if game_over {
                        self.record_score();
                    }
                }
                Err(PlaceError::InvalidPlacement)
            }
            Err(e) => Err(e),
        }
    }

    /// Throw the current game away and deal a new one
    pub fn restart(&mut self, is_daily: bool) -> &GameState {
        self.config.daily = is_daily;
        self.state = GameState::with_seed(is_daily, &self.seeds.seed(is_daily));
        self.score_recorded = self.state.game_over;
        self.persist();
        &self.state
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        get_leaderboard(&self.store)
    }

    /// Challenge token for the current score and combo
    pub fn share_token(&self) -> String {
        generate_shareable_seed(self.state.score, self.state.combo)
    }

    pub fn share_url(&self) -> String {
        challenge_url(&self.config.share_url, &self.share_token())
    }

    fn persist(&mut self) {
        if let Err(e) = save_game_state(&mut self.store, &self.state, &self.config.store.state_key) {
            eprintln!("[Session] failed to save game state: {:#}", e);
        }
    }

    fn record_score(&mut self) {
        if self.score_recorded {
            return;
        }
        self.score_recorded = true;

        if self.state.is_daily && !self.config.record_daily {
            return;
        }

        match save_score(&mut self.store, &self.config.player_name, self.state.score) {
            Ok(entries) => {
                let rank = entries
                    .iter()
                    .position(|e| e.name == self.config.player_name && e.score == self.state.score);
                eprintln!(
                    "[Session] game over: score={} rank={:?}",
                    self.state.score,
                    rank.map(|r| r + 1)
                );
            }
            Err(e) => eprintln!("[Session] failed to record score: {:#}", e),
        }
    }
}

impl Session<Box<dyn KvStore>> {
    /// Open the configured store and resume (or start) a game
    pub fn from_env() -> Result<Self> {
        let config = SessionConfig::from_env();
        let store = config.store.open()?;
        Ok(Self::resume_or_new(store, config))
    }
}
