//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with serde derives so the same values flow through
//! the engine, the persistence layer and the JSON-lines driver.
//!
//! # Grid Dimensions
//!
//! - **Size**: 10 x 10 cells, row-major
//! - **Coordinates**: `(row, col)`, both in `0..GRID_SIZE`
//! - **Piece offsets**: `(dx, dy)` where `dx` is a column offset and `dy` a row offset
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TILES_PER_PIECE` | 4 | Fixed tile count used by the points formula |
//! | `BASE_POINTS_PER_TILE` | 10 | Points per tile |
//! | `SPEED_BONUS_THRESHOLD_MS` | 5000 | Samples below this earn the speed bonus |
//! | `SPEED_BONUS` | 50 | Flat speed bonus |
//! | `CELEBRATION_THRESHOLD` | 3 | Lines in one placement that trigger a celebration |
//!
//! # Examples
//!
//! ```
//! use combo_blocks_types::{PieceType, GRID_SIZE, TRAY_SIZE};
//!
//! let kind: PieceType = serde_json::from_str("\"line-clear\"").unwrap();
//! assert_eq!(kind, PieceType::LineClear);
//! assert_eq!(GRID_SIZE, 10);
//! assert_eq!(TRAY_SIZE, 3);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width and height in cells
pub const GRID_SIZE: usize = 10;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Number of pieces dealt into a fresh tray
pub const TRAY_SIZE: usize = 3;

/// Approximate tile count of a piece used by the points formula
pub const TILES_PER_PIECE: u32 = 4;

/// Points awarded per tile of a cleared line
pub const BASE_POINTS_PER_TILE: u32 = 10;

/// Timing samples strictly below this value earn [`SPEED_BONUS`] (milliseconds)
pub const SPEED_BONUS_THRESHOLD_MS: u64 = 5000;

/// Flat bonus for a fast placement
pub const SPEED_BONUS: u32 = 50;

/// Lines cleared -> score multiplier. Counts not listed use a multiplier of 1.
pub const COMBO_MULTIPLIERS: [(u32, u32); 3] = [(1, 1), (2, 2), (3, 5)];

/// Lines cleared by a single placement that trigger a celebration event
pub const CELEBRATION_THRESHOLD: u32 = 3;

/// Maximum number of leaderboard entries kept
pub const LEADERBOARD_SIZE: usize = 10;

/// Default storage key for the game state snapshot
pub const DEFAULT_STATE_KEY: &str = "combo-blocks-state";

/// Storage key for the leaderboard list
pub const LEADERBOARD_KEY: &str = "combo-blocks-lb";

/// The eight piece types: six base shapes plus two specials
///
/// - **I, L, T, S, Z, O**: regular shapes that only occupy cells
/// - **Bomb**: single cell that empties the surrounding 3x3 block
/// - **LineClear**: single cell that empties a full row or column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    I,
    L,
    T,
    S,
    Z,
    O,
    #[serde(rename = "bomb")]
    Bomb,
    #[serde(rename = "line-clear")]
    LineClear,
}

/// Offset of a single tile relative to the piece pivot: `(dx, dy)`
pub type TileOffset = (i32, i32);

/// A placeable piece
///
/// Pieces are immutable values produced by the catalog. They are referenced by
/// `id` and removed from the tray once placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: String,
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub positions: Vec<TileOffset>,
    pub color: String,
    /// Reserved; no rotation logic reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<u16>,
}

/// Contents of an occupied grid cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilledCell {
    pub piece_id: String,
    pub color: String,
    pub piece_type: PieceType,
}

/// A cell on the grid
///
/// - `None`: empty cell
/// - `Some(FilledCell)`: occupied by a tile of the named piece
///
/// A cell is therefore always either fully empty or fully populated.
pub type GridCell = Option<FilledCell>;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    /// RFC 3339 timestamp of when the score was recorded
    pub date: String,
}

/// Notification emitted alongside a new game state.
///
/// Events never influence the returned state; the presentation layer is free
/// to ignore them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Three or more lines were cleared by one placement.
    Celebration { lines: u32 },
    /// The tray ran empty and was dealt again from `seed`.
    TrayRefilled { seed: String },
    /// The state became terminal.
    GameOver { score: u32 },
}
