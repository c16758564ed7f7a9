//! Engine module - the caller boundary around the pure placement pipeline
//!
//! [`core::place_piece`](crate::core::place_piece) accepts any state and any
//! piece. The [`Session`] here is what a UI or driver talks to instead:
//!
//! - refuses placements once the game is over ([`PlaceError::GameOver`])
//! - resolves tray pieces by id ([`PlaceError::PieceNotInTray`])
//! - saves the state after every change
//! - records the final score on the leaderboard exactly once
//!
//! # Example
//!
//! ```
//! use combo_blocks_engine::{PlaceError, Session, SessionConfig};
//! use combo_blocks_engine::store::MemoryStore;
//!
//! let mut session = Session::new(MemoryStore::new(), SessionConfig::default());
//! let err = session.place("no-such-piece", 0, 0, Some(0)).unwrap_err();
//! assert_eq!(err, PlaceError::PieceNotInTray);
//! assert_eq!(session.state().moves, 0);
//! ```

pub mod config;
pub mod place;
pub mod session;

pub use combo_blocks_core as core;
pub use combo_blocks_store as store;
pub use combo_blocks_types as types;

pub use config::SessionConfig;
pub use place::{apply_place, PlaceError};
pub use session::Session;
