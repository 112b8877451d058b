//! Serializable board snapshots
//!
//! A snapshot is a read-only copy of the logical board plus the phase it was
//! taken in. `board_hash` is a 64-bit FNV-1a digest of the cell bytes, so two
//! snapshots can be compared for board equality without walking the rows.

use match3_types::{Cell, Phase};
use serde::{Deserialize, Serialize};

use crate::board::Board;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Byte a cell contributes to the board hash
#[inline(always)]
fn cell_byte(cell: Cell) -> u8 {
    match cell {
        Cell::Empty => 0,
        Cell::Tile(kind) => kind.index() + 1,
        Cell::Blocked => 0xff,
    }
}

/// FNV-1a 64-bit over the row-major cells of `board`
pub fn board_hash(board: &Board) -> u64 {
    board.cells().iter().fold(FNV_OFFSET, |h, &cell| {
        (h ^ cell_byte(cell) as u64).wrapping_mul(FNV_PRIME)
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, `rows[y][x]`
    pub rows: Vec<Vec<Cell>>,
    pub phase: Phase,
    /// Bumped by the engine on every board mutation
    pub generation: u64,
    pub board_hash: u64,
}

impl BoardSnapshot {
    pub fn capture(board: &Board, phase: Phase, generation: u64) -> Self {
        let rows = board
            .cells()
            .chunks(board.width())
            .map(|row| row.to_vec())
            .collect();
        Self {
            width: board.width(),
            height: board.height(),
            rows,
            phase,
            generation,
            board_hash: board_hash(board),
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Symbol rows in the same text form [`Board::from_rows`] accepts
    pub fn symbol_rows(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_copies_cells() {
        let board = Board::from_rows(&["#12", "3.4"]).unwrap();
        let snap = BoardSnapshot::capture(&board, Phase::Removing, 7);
        assert_eq!((snap.width, snap.height), (3, 2));
        assert_eq!(snap.cell(0, 0), Some(Cell::Blocked));
        assert_eq!(snap.cell(1, 1), Some(Cell::Empty));
        assert_eq!(snap.cell(3, 0), None);
        assert_eq!(snap.symbol_rows(), vec!["#12", "3.4"]);
        assert_eq!(snap.phase, Phase::Removing);
        assert_eq!(snap.generation, 7);
    }

    #[test]
    fn test_hash_tracks_board_contents() {
        let a = Board::from_rows(&["12", "21"]).unwrap();
        let b = Board::from_rows(&["21", "12"]).unwrap();
        assert_eq!(board_hash(&a), board_hash(&a.clone()));
        assert_ne!(board_hash(&a), board_hash(&b));
    }

    #[test]
    fn test_empty_and_blocked_hash_differently() {
        let a = Board::from_rows(&["#"]).unwrap();
        let b = Board::from_rows(&["."]).unwrap();
        assert_ne!(board_hash(&a), board_hash(&b));
    }

    #[test]
    fn test_json_roundtrip() {
        let board = Board::from_rows(&["#1", "2."]).unwrap();
        let snap = BoardSnapshot::capture(&board, Phase::Idle, 1);
        let json = serde_json::to_string(&snap).unwrap();
        let back: BoardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
