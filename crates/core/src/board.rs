//! Board module - the authoritative grid
//!
//! The board is a `width x height` grid where each cell is blocked, empty or
//! holds a tile. Uses a flat row-major vector for cache locality.
//! Coordinates: `(x, y)` with `x` the column (left to right) and `y` the row
//! (top to bottom), so gravity points towards larger `y`.
//!
//! The blocked layout is fixed by [`Board::new`]; no write through the public
//! API can add or remove a blocked cell.

use std::fmt;

use match3_types::{Cell, Pos};

use crate::error::GridError;
use crate::rng::TileSource;

/// Maximal vertical run of playable rows in one column, `top..bottom`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSegment {
    pub x: usize,
    pub top: usize,
    pub bottom: usize,
}

impl ColumnSegment {
    pub fn len(&self) -> usize {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.bottom == self.top
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        self.top..self.bottom
    }
}

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board whose playable cells are all empty.
    ///
    /// Duplicate blocked coordinates are accepted; out-of-range ones are not.
    pub fn new(width: usize, height: usize, blocked: &[Pos]) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyBoard { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;
        let mut cells = vec![Cell::Empty; len];
        for &pos in blocked {
            if pos.x >= width || pos.y >= height {
                return Err(GridError::OutOfBounds(pos));
            }
            cells[pos.y * width + pos.x] = Cell::Blocked;
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse the text notation: one string per row, `#` blocked, `.` empty,
    /// `1`-`9` for tile kinds 0-8. Whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_core::Board;
    /// use match3_types::{Cell, Pos, TileKind};
    ///
    /// let board = Board::from_rows(&["#12", "3 4 5", "66#"]).unwrap();
    /// assert_eq!(board.dimensions(), (3, 3));
    /// assert_eq!(board.get(Pos::new(0, 0)), Ok(Cell::Blocked));
    /// assert_eq!(board.get(Pos::new(2, 1)), Ok(Cell::Tile(TileKind::new(4))));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let height = rows.len();
        let mut cells = Vec::new();
        let mut width = 0;
        for (row, line) in rows.iter().enumerate() {
            let parsed = line
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .enumerate()
                .map(|(col, symbol)| {
                    Cell::from_symbol(symbol).ok_or(GridError::BadSymbol { row, col, symbol })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if row == 0 {
                width = parsed.len();
            } else if parsed.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    len: parsed.len(),
                    expected: width,
                });
            }
            cells.extend(parsed);
        }
        if width == 0 || height == 0 {
            return Err(GridError::EmptyBoard { width, height });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Render in the same notation [`Board::from_rows`] accepts
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some(pos.y * self.width + pos.x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    /// Get cell at a position
    pub fn get(&self, pos: Pos) -> Result<Cell, GridError> {
        self.index(pos)
            .map(|idx| self.cells[idx])
            .ok_or(GridError::OutOfBounds(pos))
    }

    /// Set cell at a position.
    ///
    /// Writing to a blocked cell, or writing `Blocked` anywhere, is refused.
    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        if self.cells[idx].is_blocked() || cell.is_blocked() {
            return Err(GridError::LayoutChange(pos));
        }
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn is_blocked(&self, pos: Pos) -> Result<bool, GridError> {
        self.get(pos).map(Cell::is_blocked)
    }

    /// Swap the contents of two playable cells
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<(), GridError> {
        let ia = self.index(a).ok_or(GridError::OutOfBounds(a))?;
        let ib = self.index(b).ok_or(GridError::OutOfBounds(b))?;
        if self.cells[ia].is_blocked() {
            return Err(GridError::LayoutChange(a));
        }
        if self.cells[ib].is_blocked() {
            return Err(GridError::LayoutChange(b));
        }
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Unchecked read for positions already known to be on the board
    #[inline(always)]
    pub(crate) fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.y * self.width + pos.x]
    }

    /// Unchecked write for positions already known to be playable
    #[inline(always)]
    pub(crate) fn put(&mut self, pos: Pos, cell: Cell) {
        debug_assert!(!self.cell(pos).is_blocked() && !cell.is_blocked());
        self.cells[pos.y * self.width + pos.x] = cell;
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Pos::new(x, y)))
    }

    /// Positions of every non-blocked cell in row-major order
    pub fn playable_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(|&p| !self.cell(p).is_blocked())
    }

    pub fn playable_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_blocked()).count()
    }

    /// True when no playable cell is empty
    pub fn is_filled(&self) -> bool {
        !self.cells.iter().any(|c| c.is_empty())
    }

    /// Split column `x` into segments separated by blocked cells.
    ///
    /// Returns an empty list for a column outside the board.
    pub fn column_segments(&self, x: usize) -> Vec<ColumnSegment> {
        let mut segments = Vec::new();
        if x >= self.width {
            return segments;
        }
        let mut top = 0;
        for y in 0..=self.height {
            let wall = y == self.height || self.cell(Pos::new(x, y)).is_blocked();
            if wall {
                if y > top {
                    segments.push(ColumnSegment { x, top, bottom: y });
                }
                top = y + 1;
            }
        }
        segments
    }

    /// Draw a fresh tile for every playable cell
    pub fn fill_from(&mut self, source: &mut impl TileSource) {
        for cell in &mut self.cells {
            if !cell.is_blocked() {
                *cell = Cell::Tile(source.draw());
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Same blocked cells in the same places
    pub fn same_layout(&self, other: &Board) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.is_blocked() == b.is_blocked())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ReplayTiles;
    use match3_types::TileKind;

    fn t(i: u8) -> Cell {
        Cell::Tile(TileKind::new(i))
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(7, 5, &[]).unwrap();
        assert_eq!(board.index(Pos::new(0, 0)), Some(0));
        assert_eq!(board.index(Pos::new(6, 0)), Some(6));
        assert_eq!(board.index(Pos::new(0, 1)), Some(7));
        assert_eq!(board.index(Pos::new(6, 4)), Some(34));
        assert_eq!(board.index(Pos::new(7, 0)), None);
        assert_eq!(board.index(Pos::new(0, 5)), None);
    }

    #[test]
    fn test_new_rejects_bad_layout() {
        assert_eq!(
            Board::new(0, 3, &[]),
            Err(GridError::EmptyBoard {
                width: 0,
                height: 3
            })
        );
        assert_eq!(
            Board::new(3, 3, &[Pos::new(3, 0)]),
            Err(GridError::OutOfBounds(Pos::new(3, 0)))
        );
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        let width = usize::MAX / 2 + 1;
        assert_eq!(
            Board::new(width, 3, &[]),
            Err(GridError::TooLarge { width, height: 3 })
        );
    }

    #[test]
    fn test_set_refuses_layout_changes() {
        let mut board = Board::new(3, 3, &[Pos::new(1, 1)]).unwrap();
        assert_eq!(
            board.set(Pos::new(1, 1), t(0)),
            Err(GridError::LayoutChange(Pos::new(1, 1)))
        );
        assert_eq!(
            board.set(Pos::new(0, 0), Cell::Blocked),
            Err(GridError::LayoutChange(Pos::new(0, 0)))
        );
        assert_eq!(board.get(Pos::new(1, 1)), Ok(Cell::Blocked));
        assert_eq!(board.get(Pos::new(0, 0)), Ok(Cell::Empty));
    }

    #[test]
    fn test_swap_refuses_blocked() {
        let mut board = Board::from_rows(&["1#", "23"]).unwrap();
        assert_eq!(
            board.swap(Pos::new(0, 0), Pos::new(1, 0)),
            Err(GridError::LayoutChange(Pos::new(1, 0)))
        );
        board.swap(Pos::new(0, 0), Pos::new(0, 1)).unwrap();
        assert_eq!(board.to_rows(), vec!["2#", "13"]);
    }

    #[test]
    fn test_column_segments_split_on_blocked() {
        let board = Board::from_rows(&["#1", "11", "#1", "11", "11", "#1"]).unwrap();
        assert_eq!(
            board.column_segments(0),
            vec![
                ColumnSegment { x: 0, top: 1, bottom: 2 },
                ColumnSegment { x: 0, top: 3, bottom: 5 },
            ]
        );
        assert_eq!(
            board.column_segments(1),
            vec![ColumnSegment { x: 1, top: 0, bottom: 6 }]
        );
        assert!(board.column_segments(2).is_empty());
    }

    #[test]
    fn test_fill_skips_blocked() {
        let mut board = Board::new(2, 2, &[Pos::new(0, 0)]).unwrap();
        let mut source = ReplayTiles::new(&[4]);
        board.fill_from(&mut source);
        assert_eq!(board.to_rows(), vec!["#5", "55"]);
        assert_eq!(source.drawn(), 3);
        assert!(board.is_filled());
    }

    #[test]
    fn test_from_rows_errors() {
        assert_eq!(
            Board::from_rows(&["12", "3"]),
            Err(GridError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            Board::from_rows(&["1x"]),
            Err(GridError::BadSymbol {
                row: 0,
                col: 1,
                symbol: 'x'
            })
        );
        let empty: [&str; 0] = [];
        assert!(Board::from_rows(&empty).is_err());
    }
}
