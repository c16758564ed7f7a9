//! Pieces module - the fixed shape library and tray generation
//!
//! Offsets are `(dx, dy)`: `dx` shifts columns, `dy` shifts rows. Every shape
//! includes the pivot `(0, 0)` except `S`, whose pivot sits in the empty
//! corner of its bounding box.

use crate::rng::{additive_hash, RandomSource, SimpleRng};
use crate::types::{Piece, PieceType, TileOffset, TRAY_SIZE};

/// The six regular shapes, in catalog order
pub const BASE_TYPES: [PieceType; 6] = [
    PieceType::I,
    PieceType::L,
    PieceType::T,
    PieceType::S,
    PieceType::Z,
    PieceType::O,
];

/// Get the tile offsets for a piece type
pub fn get_shape(kind: PieceType) -> &'static [TileOffset] {
    match kind {
        // Horizontal bar
        PieceType::I => &[(0, 0), (1, 0), (2, 0), (3, 0)],
        // Vertical bar with a foot to the right
        PieceType::L => &[(0, 0), (0, 1), (0, 2), (1, 2)],
        PieceType::T => &[(0, 0), (1, 0), (2, 0), (1, 1)],
        PieceType::S => &[(0, 1), (1, 0), (1, 1), (2, 0)],
        PieceType::Z => &[(0, 0), (1, 0), (1, 1), (2, 1)],
        PieceType::O => &[(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceType::Bomb | PieceType::LineClear => &[(0, 0)],
    }
}

/// Display color carried into grid cells
pub fn get_color(kind: PieceType) -> &'static str {
    match kind {
        PieceType::I => "#00f0f0",
        PieceType::L => "#ff8000",
        PieceType::T => "#8000ff",
        PieceType::S => "#00ff00",
        PieceType::Z => "#ff0000",
        PieceType::O => "#ffff00",
        PieceType::Bomb => "#ff00ff",
        PieceType::LineClear => "#00ffff",
    }
}

/// Catalog id; unique within one generated batch
pub fn catalog_id(kind: PieceType) -> &'static str {
    match kind {
        PieceType::I => "i1",
        PieceType::L => "l1",
        PieceType::T => "t1",
        PieceType::S => "s1",
        PieceType::Z => "z1",
        PieceType::O => "o1",
        PieceType::Bomb => "bomb1",
        PieceType::LineClear => "line1",
    }
}

/// Build the catalog piece for a type
pub fn make_piece(kind: PieceType) -> Piece {
    Piece {
        id: catalog_id(kind).to_string(),
        piece_type: kind,
        positions: get_shape(kind).to_vec(),
        color: get_color(kind).to_string(),
        rotation: None,
    }
}

/// Candidate piece types for a seed: six base shapes plus 0-2 specials
///
/// With `h = additive_hash(seed) % 100`, a bomb joins when `h % 5 == 0` and a
/// line-clear joins when `h % 7 == 0`.
pub fn candidate_types(seed: &str) -> Vec<PieceType> {
    let h = additive_hash(seed) % 100;

    let mut kinds = BASE_TYPES.to_vec();
    if h % 5 == 0 {
        kinds.push(PieceType::Bomb);
    }
    if h % 7 == 0 {
        kinds.push(PieceType::LineClear);
    }
    kinds
}

/// Deal a tray from `seed`
///
/// The result is a pure function of the seed, so every player sharing a daily
/// seed receives the same tray.
pub fn generate_pieces(seed: &str) -> Vec<Piece> {
    let mut rng = SimpleRng::from_seed_str(seed);
    generate_pieces_with(seed, &mut rng)
}

/// Deal a tray from `seed`, shuffling with an injected random source
pub fn generate_pieces_with<R: RandomSource>(seed: &str, rng: &mut R) -> Vec<Piece> {
    let mut kinds = candidate_types(seed);
    rng.shuffle(&mut kinds);

    kinds
        .into_iter()
        .take(TRAY_SIZE)
        .map(make_piece)
        .collect()
}
