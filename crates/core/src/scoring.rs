//! Scoring module - combo multipliers and the speed bonus
//!
//! `points = lines * TILES_PER_PIECE * BASE_POINTS_PER_TILE * multiplier + speed_bonus`
//!
//! The tile count is a fixed approximation, not the placed piece's real size.

use crate::types::{
    BASE_POINTS_PER_TILE, COMBO_MULTIPLIERS, SPEED_BONUS, SPEED_BONUS_THRESHOLD_MS,
    TILES_PER_PIECE,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points from cleared lines, multiplier included.
    pub line_points: u32,
    pub multiplier: u32,
    pub speed_bonus: u32,
    pub total: u32,
}

/// Multiplier for the number of lines cleared by one placement.
/// Counts outside the table (including 0) use 1.
pub fn combo_multiplier(lines: u32) -> u32 {
    COMBO_MULTIPLIERS
        .iter()
        .find(|&&(count, _)| count == lines)
        .map(|&(_, multiplier)| multiplier)
        .unwrap_or(1)
}

/// Speed bonus for a timing sample (milliseconds since the first placement)
pub fn speed_bonus(sample_ms: Option<u64>) -> u32 {
    match sample_ms {
        Some(ms) if ms < SPEED_BONUS_THRESHOLD_MS => SPEED_BONUS,
        _ => 0,
    }
}

/// Calculate the points for one placement
pub fn calculate_points(lines: u32, latest_sample_ms: Option<u64>) -> ScoreResult {
    let multiplier = combo_multiplier(lines);
    let line_points = lines
        .saturating_mul(TILES_PER_PIECE * BASE_POINTS_PER_TILE)
        .saturating_mul(multiplier);
    let speed_bonus = speed_bonus(latest_sample_ms);

    ScoreResult {
        line_points,
        multiplier,
        speed_bonus,
        total: line_points.saturating_add(speed_bonus),
    }
}
