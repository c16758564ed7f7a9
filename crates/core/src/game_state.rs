//! Game state module - the placement transition engine
//!
//! [`place_piece`] is a pure function from an old [`GameState`] to a new one.
//! The input is only borrowed; every placement builds a fresh value.
//!
//! Pipeline, in order:
//! 1. validate (piece in tray, every target cell in bounds and empty)
//! 2. record the timing sample
//! 3. stamp the tiles
//! 4. remove the piece from the tray, count the move
//! 5. apply the special effect (bomb / line-clear)
//! 6. clear completed rows (conveyor) then columns (in place)
//! 7. score
//! 8. celebration event for 3+ lines
//! 9. respawn the tray when empty
//! 10. game-over check

use serde::{Deserialize, Serialize};

use crate::board::{is_valid_placement, target, Board};
use crate::pieces::generate_pieces;
use crate::scoring::calculate_points;
use crate::seed::{now_ms, SeedSource};
use crate::types::{GameEvent, Piece, PieceType, CELEBRATION_THRESHOLD, GRID_SIZE};

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub grid: Board,
    pub tray: Vec<Piece>,
    pub score: u32,
    /// Lines cleared by the most recent placement (not cumulative).
    pub combo: u32,
    pub moves: u32,
    pub game_over: bool,
    pub is_daily: bool,
    /// Epoch milliseconds of the first placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    /// Milliseconds since `start_time`, one sample per placement.
    #[serde(default)]
    pub placements: Vec<u64>,
}

impl GameState {
    /// Create a new game dealt from `seed`
    pub fn with_seed(is_daily: bool, seed: &str) -> Self {
        let mut state = Self {
            grid: Board::new(),
            tray: generate_pieces(seed),
            score: 0,
            combo: 0,
            moves: 0,
            game_over: false,
            is_daily,
            start_time: None,
            placements: Vec::new(),
        };
        state.game_over = check_game_over(&state);
        state
    }

    /// Look up a tray piece by id
    pub fn tray_piece(&self, id: &str) -> Option<&Piece> {
        self.tray.iter().find(|p| p.id == id)
    }

    /// Most recent timing sample
    pub fn latest_sample(&self) -> Option<u64> {
        self.placements.last().copied()
    }
}

/// Result of a placement attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub state: GameState,
    /// Whether the piece was actually placed.
    pub accepted: bool,
    pub events: Vec<GameEvent>,
}

/// Start a new game. Daily games deal from today's date, free play from the clock.
pub fn init_game(is_daily: bool) -> GameState {
    GameState::with_seed(is_daily, &SeedSource::Clock.seed(is_daily))
}

/// True iff no tray piece fits anywhere on the grid
pub fn check_game_over(state: &GameState) -> bool {
    state.tray.iter().all(|piece| !has_valid_anchor(&state.grid, piece))
}

fn has_valid_anchor(grid: &Board, piece: &Piece) -> bool {
    (0..GRID_SIZE as i32)
        .any(|row| (0..GRID_SIZE as i32).any(|col| is_valid_placement(grid, piece, row, col)))
}

/// Place `piece` with its pivot at (row, col)
///
/// `time` is the caller's clock in epoch milliseconds; `None` reads the wall
/// clock. Respawned trays are seeded from [`SeedSource::Clock`].
pub fn place_piece(
    state: &GameState,
    piece: &Piece,
    row: i32,
    col: i32,
    time: Option<u64>,
) -> PlaceOutcome {
    place_piece_at(state, piece, row, col, time, &SeedSource::Clock)
}

/// [`place_piece`] with an explicit seed source for tray respawns
pub fn place_piece_at(
    state: &GameState,
    piece: &Piece,
    row: i32,
    col: i32,
    time: Option<u64>,
    seeds: &SeedSource,
) -> PlaceOutcome {
    let in_tray = state.tray.iter().any(|p| p.id == piece.id);
    if !in_tray || !is_valid_placement(&state.grid, piece, row, col) {
        return rejected(state);
    }

    let mut next = state.clone();
    let mut events = Vec::new();

    let now = time.unwrap_or_else(now_ms);
    let start = *next.start_time.get_or_insert(now);
    next.placements.push(now.saturating_sub(start));

    next.grid.stamp(piece, row, col);

    next.tray.retain(|p| p.id != piece.id);
    next.moves += 1;

    match piece.piece_type {
        PieceType::Bomb => apply_bomb(&mut next.grid, row, col),
        PieceType::LineClear => apply_line_clear(&mut next.grid, row, col),
        _ => {}
    }

    let cleared = next.grid.clear_completed_lines();
    let lines = cleared.total();
    let points = calculate_points(lines, next.latest_sample());
    next.score = next.score.saturating_add(points.total);
    next.combo = lines;

    if lines >= CELEBRATION_THRESHOLD {
        events.push(GameEvent::Celebration { lines });
    }

    if next.tray.is_empty() {
        let seed = seeds.seed(next.is_daily);
        next.tray = generate_pieces(&seed);
        events.push(GameEvent::TrayRefilled { seed });
    }

    next.game_over = check_game_over(&next);
    if next.game_over && !state.game_over {
        events.push(GameEvent::GameOver { score: next.score });
    }

    PlaceOutcome {
        state: next,
        accepted: true,
        events,
    }
}

/// Rejected placement: nothing changes except the recomputed terminal flag.
fn rejected(state: &GameState) -> PlaceOutcome {
    let mut next = state.clone();
    next.game_over = check_game_over(state);

    let mut events = Vec::new();
    if next.game_over && !state.game_over {
        events.push(GameEvent::GameOver { score: next.score });
    }

    PlaceOutcome {
        state: next,
        accepted: false,
        events,
    }
}

/// Empty the 3x3 block around the anchor; cells off the grid are skipped
fn apply_bomb(grid: &mut Board, row: i32, col: i32) {
    for dr in -1..=1 {
        for dc in -1..=1 {
            if let Some((r, c)) = target(row, col, (dc, dr)) {
                grid.clear_cell(r, c);
            }
        }
    }
}

/// Empty the anchor's row when it lies in the lower half, otherwise its column
fn apply_line_clear(grid: &mut Board, row: i32, col: i32) {
    if row > (GRID_SIZE / 2) as i32 {
        grid.clear_row(row as usize);
    } else {
        grid.clear_col(col as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::make_piece;

    const T0: u64 = 1_700_000_000_000;

    fn state_with(grid: Board, tray: Vec<Piece>) -> GameState {
        GameState {
            grid,
            tray,
            score: 0,
            combo: 0,
            moves: 0,
            game_over: false,
            is_daily: false,
            start_time: None,
            placements: Vec::new(),
        }
    }

    fn fixed() -> SeedSource {
        SeedSource::Fixed("fixed-seed".to_string())
    }

    #[test]
    fn test_with_seed_starts_empty() {
        let state = GameState::with_seed(false, "abc");
        assert_eq!(state.grid.filled_count(), 0);
        assert_eq!(state.tray.len(), 3);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(state.placements.is_empty());
        assert_eq!(state.start_time, None);
    }

    #[test]
    fn test_first_placement_sets_start_time() {
        let state = state_with(
            Board::new(),
            vec![make_piece(PieceType::O), make_piece(PieceType::I)],
        );
        let out = place_piece_at(&state, &state.tray[0].clone(), 0, 0, Some(T0), &fixed());

        assert!(out.accepted);
        assert_eq!(out.state.start_time, Some(T0));
        assert_eq!(out.state.placements, vec![0]);
        assert_eq!(out.state.moves, 1);
        // No lines, but the first sample is fast.
        assert_eq!(out.state.score, 50);
        assert_eq!(out.state.combo, 0);
        assert_eq!(out.state.tray.len(), 1);
        assert_eq!(out.state.grid.filled_count(), 4);
    }

    #[test]
    fn test_later_placement_samples_since_start() {
        let mut state = state_with(
            Board::new(),
            vec![make_piece(PieceType::O), make_piece(PieceType::I)],
        );
        state.start_time = Some(T0);
        state.placements = vec![0];

        let piece = state.tray[1].clone();
        let out = place_piece_at(&state, &piece, 5, 0, Some(T0 + 7_000), &fixed());
        assert_eq!(out.state.placements, vec![0, 7_000]);
        assert_eq!(out.state.score, 0);
    }

    #[test]
    fn test_piece_not_in_tray_is_rejected() {
        let state = state_with(Board::new(), vec![make_piece(PieceType::O)]);
        let out = place_piece_at(&state, &make_piece(PieceType::I), 0, 0, Some(T0), &fixed());

        assert!(!out.accepted);
        assert_eq!(out.state, state);
    }

    #[test]
    fn test_input_state_is_not_mutated() {
        let state = state_with(Board::new(), vec![make_piece(PieceType::O)]);
        let before = state.clone();
        let piece = state.tray[0].clone();
        let _ = place_piece_at(&state, &piece, 0, 0, Some(T0), &fixed());
        assert_eq!(state, before);
    }

    #[test]
    fn test_bomb_skips_off_grid_cells() {
        let grid = Board::from_ascii(&[".#........", "##........", "..#......."]);
        let state = state_with(grid, vec![make_piece(PieceType::Bomb), make_piece(PieceType::I)]);

        let out = place_piece_at(&state, &state.tray[0].clone(), 0, 0, Some(T0), &fixed());
        assert!(out.accepted);
        // Anchor and its in-bounds neighbours cleared; (2,2) is out of reach.
        assert_eq!(out.state.grid.filled_count(), 1);
        assert!(out.state.grid.is_occupied(2, 2));
        assert!(!out.state.grid.is_occupied(0, 0));
        assert!(!out.state.grid.is_occupied(1, 1));
    }

    #[test]
    fn test_line_clear_upper_half_clears_column() {
        let grid = Board::from_ascii(&["...#......", "...#.....x"]);
        let state = state_with(
            grid,
            vec![make_piece(PieceType::LineClear), make_piece(PieceType::I)],
        );

        let out = place_piece_at(&state, &state.tray[0].clone(), 5, 3, Some(T0), &fixed());
        assert!(out.accepted);
        assert_eq!(out.state.grid.filled_count(), 1);
        assert!(out.state.grid.is_occupied(1, 9));
    }

    #[test]
    fn test_line_clear_lower_half_clears_row() {
        let mut rows = vec![".........."; GRID_SIZE];
        rows[6] = "###.####..";
        rows[7] = "#.........";
        let state = state_with(
            Board::from_ascii(&rows),
            vec![make_piece(PieceType::LineClear), make_piece(PieceType::I)],
        );

        let out = place_piece_at(&state, &state.tray[0].clone(), 6, 3, Some(T0), &fixed());
        assert!(out.accepted);
        assert!(out.state.grid.row(6).iter().all(|c| c.is_none()));
        assert!(out.state.grid.is_occupied(7, 0));
        assert_eq!(out.state.grid.filled_count(), 1);
    }

    #[test]
    fn test_three_lines_emit_celebration() {
        let mut rows = vec![".........."; GRID_SIZE];
        rows[0] = "#########.";
        rows[1] = "#########.";
        rows[2] = "#########.";
        let bar = Piece {
            id: "bar".to_string(),
            piece_type: PieceType::I,
            positions: vec![(0, 0), (0, 1), (0, 2)],
            color: "#00f0f0".to_string(),
            rotation: None,
        };
        let state = state_with(
            Board::from_ascii(&rows),
            vec![bar.clone(), make_piece(PieceType::I)],
        );

        let out = place_piece_at(&state, &bar, 0, 9, Some(T0), &fixed());

        assert!(out.accepted);
        assert_eq!(out.state.combo, 3);
        assert_eq!(out.state.score, 3 * 40 * 5 + 50);
        assert!(out.events.contains(&GameEvent::Celebration { lines: 3 }));
        assert_eq!(out.state.grid.filled_count(), 0);
    }

    #[test]
    fn test_empty_tray_respawns_from_seed_source() {
        let state = state_with(Board::new(), vec![make_piece(PieceType::O)]);
        let out = place_piece_at(&state, &state.tray[0].clone(), 0, 0, Some(T0), &fixed());

        assert_eq!(out.state.tray, generate_pieces("fixed-seed"));
        assert!(out.events.contains(&GameEvent::TrayRefilled {
            seed: "fixed-seed".to_string()
        }));
    }

    #[test]
    fn test_check_game_over_empty_tray_is_terminal() {
        let state = state_with(Board::new(), Vec::new());
        assert!(check_game_over(&state));
    }

    #[test]
    fn test_serde_round_trip() {
        let state = GameState::with_seed(true, "2024-02-02");
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"isDaily\":true"));
        assert!(json.contains("\"gameOver\":false"));
        assert!(!json.contains("startTime"));

        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
