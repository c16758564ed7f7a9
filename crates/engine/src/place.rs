use crate::core::{place_piece_at, GameState, PlaceOutcome, SeedSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    GameOver,
    PieceNotInTray,
    InvalidPlacement,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::GameOver => "game_over",
            PlaceError::PieceNotInTray => "unknown_piece",
            PlaceError::InvalidPlacement => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::GameOver => "game is over; restart to keep playing",
            PlaceError::PieceNotInTray => "piece is not in the tray",
            PlaceError::InvalidPlacement => "piece does not fit at that position",
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Place a tray piece, refusing terminal states and unknown ids up front.
pub fn apply_place(
    state: &GameState,
    piece_id: &str,
    row: i32,
    col: i32,
    time: Option<u64>,
    seeds: &SeedSource,
) -> Result<PlaceOutcome, PlaceError> {
    if state.game_over {
        return Err(PlaceError::GameOver);
    }

    let Some(piece) = state.tray_piece(piece_id) else {
        return Err(PlaceError::PieceNotInTray);
    };

    let outcome = place_piece_at(state, piece, row, col, time, seeds);
    if !outcome.accepted {
        return Err(PlaceError::InvalidPlacement);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{make_piece, Board};
    use crate::types::PieceType;

    fn fixed() -> SeedSource {
        SeedSource::Fixed("place-tests".to_string())
    }

    fn two_piece_state() -> GameState {
        let mut gs = GameState::with_seed(false, "place-tests");
        gs.tray = vec![make_piece(PieceType::O), make_piece(PieceType::I)];
        gs
    }

    #[test]
    fn place_rejected_when_game_over() {
        let mut gs = two_piece_state();
        gs.game_over = true;

        let err = apply_place(&gs, "o1", 0, 0, Some(0), &fixed()).unwrap_err();
        assert_eq!(err, PlaceError::GameOver);
    }

    #[test]
    fn place_rejected_when_piece_unknown() {
        let gs = two_piece_state();
        let err = apply_place(&gs, "bomb1", 0, 0, Some(0), &fixed()).unwrap_err();
        assert_eq!(err, PlaceError::PieceNotInTray);
        assert_eq!(err.code(), "unknown_piece");
    }

    #[test]
    fn place_rejected_when_out_of_bounds() {
        let gs = two_piece_state();
        let err = apply_place(&gs, "i1", 0, 7, Some(0), &fixed()).unwrap_err();
        assert_eq!(err, PlaceError::InvalidPlacement);
        assert_eq!(err.code(), "invalid_place");
    }

    #[test]
    fn place_rejected_when_blocked() {
        let mut gs = two_piece_state();
        gs.grid = Board::from_ascii(&[".#........"]);

        let err = apply_place(&gs, "o1", 0, 0, Some(0), &fixed()).unwrap_err();
        assert_eq!(err, PlaceError::InvalidPlacement);
    }

    #[test]
    fn place_accepts_valid_move() {
        let gs = two_piece_state();
        let outcome = apply_place(&gs, "o1", 8, 8, Some(0), &fixed()).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.state.moves, 1);
        assert!(outcome.state.grid.is_occupied(9, 9));
    }
}
