//! Board module - manages the game grid
//!
//! The board is a 10x10 grid where each cell is either empty or filled with a
//! tile of a placed piece. Uses a flat array, row-major (`row * GRID_SIZE + col`).
//! Coordinates are signed so that anchors and offsets can leave the grid and be
//! rejected by the bounds check instead of wrapping.

use arrayvec::ArrayVec;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{
    FilledCell, GridCell, Piece, PieceType, TileOffset, GRID_CELLS, GRID_SIZE,
};

/// Row and column indices removed by one line-clear pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedLines {
    /// Row index at which each cleared row was found (may repeat when the
    /// conveyor brings another full row into the same index)
    pub rows: ArrayVec<usize, GRID_SIZE>,
    pub cols: ArrayVec<usize, GRID_SIZE>,
}

impl ClearedLines {
    /// Rows plus columns cleared
    pub fn total(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }
}

/// The game grid - 10 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [GridCell; GRID_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| None),
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= GRID_SIZE as i32 || col < 0 || col >= GRID_SIZE as i32 {
            return None;
        }
        Some((row as usize) * GRID_SIZE + (col as usize))
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Get cell at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<&GridCell> {
        Self::index(row, col).map(|idx| &self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, cell: GridCell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty the cell at (row, col); out-of-bounds positions are ignored
    pub fn clear_cell(&mut self, row: i32, col: i32) {
        if let Some(idx) = Self::index(row, col) {
            self.cells[idx] = None;
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Slice of one row
    pub fn row(&self, row: usize) -> &[GridCell] {
        let start = row * GRID_SIZE;
        &self.cells[start..start + GRID_SIZE]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < GRID_SIZE && self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, col: usize) -> bool {
        col < GRID_SIZE && (0..GRID_SIZE).all(|row| self.cells[row * GRID_SIZE + col].is_some())
    }

    /// Empty every cell of a row in place (no shifting)
    pub fn clear_row(&mut self, row: usize) {
        if row >= GRID_SIZE {
            return;
        }
        let start = row * GRID_SIZE;
        for cell in &mut self.cells[start..start + GRID_SIZE] {
            *cell = None;
        }
    }

    /// Empty every cell of a column in place
    pub fn clear_col(&mut self, col: usize) {
        if col >= GRID_SIZE {
            return;
        }
        for row in 0..GRID_SIZE {
            self.cells[row * GRID_SIZE + col] = None;
        }
    }

    /// Remove a row and shift every row below it up by one, appending an
    /// empty row at the bottom
    fn remove_row(&mut self, row: usize) {
        let start = row * GRID_SIZE;
        // Rotating the tail moves the removed row to the end, where it is blanked.
        self.cells[start..].rotate_left(GRID_SIZE);
        self.clear_row(GRID_SIZE - 1);
    }

    /// Clear all completed lines and report which were cleared
    ///
    /// Rows are checked first, top to bottom. A full row is removed and the
    /// rows beneath slide up with an empty row refilled at the bottom; the
    /// same index is checked again until it no longer holds a full row.
    /// Columns are then checked on the resulting grid and emptied in place.
    pub fn clear_completed_lines(&mut self) -> ClearedLines {
        let mut cleared = ClearedLines::default();

        for row in 0..GRID_SIZE {
            while self.is_row_full(row) {
                self.remove_row(row);
                cleared.rows.push(row);
            }
        }

        for col in 0..GRID_SIZE {
            if self.is_col_full(col) {
                self.clear_col(col);
                cleared.cols.push(col);
            }
        }

        cleared
    }

    /// Check whether `piece` fits with its pivot at (row, col)
    pub fn can_place(&self, piece: &Piece, row: i32, col: i32) -> bool {
        piece.positions.iter().all(|&offset| {
            target(row, col, offset).is_some_and(|(r, c)| self.is_empty_at(r, c))
        })
    }

    /// Write the piece's tiles onto the board
    /// Returns false (and leaves the board untouched) if the placement is invalid
    pub fn stamp(&mut self, piece: &Piece, row: i32, col: i32) -> bool {
        if !self.can_place(piece, row, col) {
            return false;
        }

        for &offset in &piece.positions {
            let Some((r, c)) = target(row, col, offset) else {
                continue;
            };
            self.set(
                r,
                c,
                Some(FilledCell {
                    piece_id: piece.id.clone(),
                    color: piece.color.clone(),
                    piece_type: piece.piece_type,
                }),
            );
        }

        true
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Build a board from an ASCII picture, one string per row.
    /// `.` is empty; any other character fills the cell with a tile whose
    /// piece id is that character.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        for (r, line) in rows.iter().enumerate().take(GRID_SIZE) {
            for (c, ch) in line.chars().enumerate().take(GRID_SIZE) {
                if ch != '.' {
                    board.set(
                        r as i32,
                        c as i32,
                        Some(FilledCell {
                            piece_id: ch.to_string(),
                            color: "#808080".to_string(),
                            piece_type: PieceType::O,
                        }),
                    );
                }
            }
        }
        board
    }

    /// Render as ASCII, `#` for filled and `.` for empty
    pub fn to_ascii(&self) -> Vec<String> {
        (0..GRID_SIZE)
            .map(|r| {
                self.row(r)
                    .iter()
                    .map(|cell| if cell.is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Target cell of a tile offset; `None` when the sum leaves `i32`
pub(crate) fn target(row: i32, col: i32, (dx, dy): TileOffset) -> Option<(i32, i32)> {
    Some((row.checked_add(dy)?, col.checked_add(dx)?))
}

/// Check whether `piece` can be placed on `grid` with its pivot at (row, col)
///
/// Valid iff every target cell `(row + dy, col + dx)` is inside the grid and empty.
pub fn is_valid_placement(grid: &Board, piece: &Piece, row: i32, col: i32) -> bool {
    grid.can_place(piece, row, col)
}

/// On-the-wire cell: `{}` when empty, `{"pieceId","color","type"}` when filled.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    piece_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    piece_type: Option<PieceType>,
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rows: Vec<Vec<CellRepr>> = (0..GRID_SIZE)
            .map(|r| {
                self.row(r)
                    .iter()
                    .map(|cell| match cell {
                        Some(filled) => CellRepr {
                            piece_id: Some(filled.piece_id.clone()),
                            color: Some(filled.color.clone()),
                            piece_type: Some(filled.piece_type),
                        },
                        None => CellRepr::default(),
                    })
                    .collect()
            })
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<CellRepr>>::deserialize(deserializer)?;
        if rows.len() != GRID_SIZE || rows.iter().any(|r| r.len() != GRID_SIZE) {
            return Err(D::Error::custom(format!(
                "grid must be {}x{}",
                GRID_SIZE, GRID_SIZE
            )));
        }

        let mut board = Board::new();
        for (r, row) in rows.into_iter().enumerate() {
            for (c, repr) in row.into_iter().enumerate() {
                let cell = match repr {
                    CellRepr {
                        piece_id: None,
                        color: None,
                        piece_type: None,
                    } => None,
                    CellRepr {
                        piece_id: Some(piece_id),
                        color: Some(color),
                        piece_type: Some(piece_type),
                    } => Some(FilledCell {
                        piece_id,
                        color,
                        piece_type,
                    }),
                    _ => {
                        return Err(D::Error::custom(format!(
                            "partially populated cell at ({}, {})",
                            r, c
                        )))
                    }
                };
                board.cells[r * GRID_SIZE + c] = cell;
            }
        }
        Ok(board)
    }
}
