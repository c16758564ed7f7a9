//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the placement rules, line clearing, scoring and tray
//! generation. It has **no dependencies** on rendering, input or storage:
//!
//! - **Pure**: [`place_piece`] borrows the old state and returns a new one
//! - **Deterministic**: identical inputs give identical outputs; tray respawns
//!   are pinned with [`SeedSource::Fixed`]
//! - **Portable**: the presentation layer only calls in with
//!   `(state, piece, row, col, time)`
//!
//! # Module Structure
//!
//! - [`board`]: 10x10 grid, placement validity, row/column clearing
//! - [`pieces`]: shape library and seeded tray generation
//! - [`rng`]: injectable random source and seed hashes
//! - [`scoring`]: combo multiplier table and speed bonus
//! - [`seed`]: daily seeds and shareable challenge tokens
//! - [`game_state`]: the placement pipeline and game-over detection
//!
//! # Game Rules
//!
//! - **Placement**: a piece fits when every tile lands inside the grid on an empty cell
//! - **Rows**: a full row is removed and an empty row is appended at the bottom
//! - **Columns**: a full column is emptied in place, nothing shifts
//! - **Bomb**: empties the 3x3 block around its anchor
//! - **Line-clear**: empties the anchor's row if it is below the middle, else its column
//! - **Game over**: no tray piece fits anywhere
//!
//! # Example
//!
//! ```
//! use combo_blocks_core::{place_piece_at, GameState, SeedSource};
//!
//! let state = GameState::with_seed(false, "example");
//! let piece = state.tray[0].clone();
//!
//! let outcome = place_piece_at(&state, &piece, 0, 0, Some(1_000), &SeedSource::default());
//! assert!(outcome.accepted);
//! assert_eq!(outcome.state.moves, 1);
//! assert_eq!(state.moves, 0); // the input is untouched
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod seed;

pub use combo_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::{is_valid_placement, Board, ClearedLines};
pub use game_state::{
    check_game_over, init_game, place_piece, place_piece_at, GameState, PlaceOutcome,
};
pub use pieces::{generate_pieces, generate_pieces_with, get_shape, make_piece};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{calculate_points, ScoreResult};
pub use seed::{generate_shareable_seed, get_daily_seed, SeedSource};
