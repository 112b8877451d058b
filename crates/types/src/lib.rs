//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond parsing and small helpers,
//! which keeps them usable in any context (resolution logic, host rendering,
//! snapshots).
//!
//! # Board Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 7 | Columns (indexed 0-6, left to right) |
//! | `DEFAULT_HEIGHT` | 7 | Rows (indexed 0-6, top to bottom) |
//! | `MAX_DIMENSION` | 256 | Largest width or height a config may ask for |
//! | `DEFAULT_PALETTE` | 6 | Interchangeable tile kinds |
//! | `MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `CASCADE_LIMIT` | 64 | Resolution passes allowed per move |
//! | `RESHUFFLE_LIMIT` | 1000 | Whole-board redraws before giving up |
//!
//! # Cells
//!
//! A [`Cell`] is a tagged variant. `Blocked` cells are fixed at construction,
//! `Empty` only exists between the removal and refill steps of a resolution,
//! and `Tile` carries a [`TileKind`] drawn from the palette. There is no
//! reserved sentinel inside the tile domain.
//!
//! # Examples
//!
//! ```
//! use match3_types::{Adjacency, Cell, Move, Pos, TileKind};
//!
//! let a = Pos::new(2, 3);
//! let b = Pos::new(3, 3);
//! assert!(Adjacency::Orthogonal.allows(a, b));
//! assert!(!Adjacency::Orthogonal.allows(a, Pos::new(3, 4)));
//! assert!(Adjacency::WithDiagonals.allows(a, Pos::new(3, 4)));
//!
//! let mv = Move::new(a, b);
//! assert_eq!(mv.flipped(), Move::new(b, a));
//!
//! let cell = Cell::Tile(TileKind::new(4));
//! assert_eq!(cell.tile(), Some(TileKind::new(4)));
//! assert!(Cell::Blocked.is_blocked());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_WIDTH: usize = 7;

/// Default board height in cells
pub const DEFAULT_HEIGHT: usize = 7;

/// Default number of tile kinds
pub const DEFAULT_PALETTE: u8 = 6;

/// Largest palette the text notation can express (`1`..=`9`)
pub const MAX_PALETTE: u8 = 9;

/// Largest board width or height accepted from configuration
pub const MAX_DIMENSION: usize = 256;

/// Smallest palette that can produce a stable, playable board
pub const MIN_PALETTE: u8 = 3;

/// Shortest run that is removed
pub const MIN_RUN: usize = 3;

/// Resolution passes allowed for a single move before it is an internal error
pub const CASCADE_LIMIT: u32 = 64;

/// Whole-board redraws attempted by a reshuffle before it gives up
pub const RESHUFFLE_LIMIT: u32 = 1000;

/// Blocked cells of the default board: a three-cell notch in every corner.
pub const DEFAULT_BLOCKED: [(usize, usize); 12] = [
    (0, 0),
    (1, 0),
    (0, 1),
    (5, 0),
    (6, 0),
    (6, 1),
    (0, 5),
    (0, 6),
    (1, 6),
    (6, 5),
    (5, 6),
    (6, 6),
];

/// One of the interchangeable tile symbols, as an index into the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileKind(u8);

impl TileKind {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Text notation symbol (`'1'` for kind 0 up to `'9'` for kind 8)
    pub fn symbol(self) -> char {
        char::from_digit(u32::from(self.0) + 1, 10).unwrap_or('?')
    }

    /// Parse a text notation symbol
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_symbol('1'), Some(TileKind::new(0)));
    /// assert_eq!(TileKind::from_symbol('6'), Some(TileKind::new(5)));
    /// assert_eq!(TileKind::from_symbol('0'), None);
    /// assert_eq!(TileKind::from_symbol('x'), None);
    /// ```
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_digit(10) {
            Some(d @ 1..=9) => Some(Self((d - 1) as u8)),
            _ => None,
        }
    }
}

/// A single grid position
///
/// - `Blocked`: permanent hole, never holds a tile and never moves
/// - `Empty`: vacated slot, only present mid-resolution
/// - `Tile(kind)`: a playable tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "cell", content = "kind", rename_all = "snake_case")]
pub enum Cell {
    Blocked,
    Empty,
    Tile(TileKind),
}

impl Cell {
    pub fn is_blocked(self) -> bool {
        matches!(self, Cell::Blocked)
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn tile(self) -> Option<TileKind> {
        match self {
            Cell::Tile(kind) => Some(kind),
            _ => None,
        }
    }

    /// Text notation symbol: `#` blocked, `.` empty, digit for a tile
    pub fn symbol(self) -> char {
        match self {
            Cell::Blocked => '#',
            Cell::Empty => '.',
            Cell::Tile(kind) => kind.symbol(),
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Blocked),
            '.' => Some(Cell::Empty),
            _ => TileKind::from_symbol(c).map(Cell::Tile),
        }
    }
}

/// Grid coordinate: `x` is the column (left to right), `y` the row (top to bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Pos {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A candidate swap of two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub a: Pos,
    pub b: Pos,
}

impl Move {
    pub const fn new(a: Pos, b: Pos) -> Self {
        Self { a, b }
    }

    /// The same swap with its endpoints exchanged
    pub fn flipped(self) -> Self {
        Self { a: self.b, b: self.a }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

/// Which neighbours count as adjacent for a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjacency {
    /// Manhattan distance exactly 1
    #[default]
    Orthogonal,
    /// Chebyshev distance exactly 1 (diagonal swaps allowed)
    WithDiagonals,
}

impl Adjacency {
    /// Check whether two positions are neighbours under this rule
    pub fn allows(self, a: Pos, b: Pos) -> bool {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        match self {
            Adjacency::Orthogonal => dx + dy == 1,
            Adjacency::WithDiagonals => dx.max(dy) == 1,
        }
    }

    /// Neighbour offsets that point forward in scan order (right / down).
    ///
    /// Enumerating only these visits every unordered pair exactly once.
    pub fn forward_offsets(self) -> &'static [(isize, isize)] {
        match self {
            Adjacency::Orthogonal => &[(1, 0), (0, 1)],
            Adjacency::WithDiagonals => &[(1, 0), (0, 1), (1, 1), (-1, 1)],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Adjacency::Orthogonal => "orthogonal",
            Adjacency::WithDiagonals => "with_diagonals",
        }
    }
}

/// Lifecycle phase of the engine
///
/// The cycle is `Idle → Swapping → Removing → ApplyingGravity → Refilling`,
/// after which the engine either re-enters `Removing` (cascade) or returns to
/// `Idle`. Player input is only accepted in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Swapping,
    Removing,
    ApplyingGravity,
    Refilling,
}

impl Phase {
    pub fn accepts_input(self) -> bool {
        self == Phase::Idle
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Swapping => "swapping",
            Phase::Removing => "removing",
            Phase::ApplyingGravity => "applying_gravity",
            Phase::Refilling => "refilling",
        }
    }
}

/// Why a proposed move was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Swap would not create any run
    NoMatch,
    /// A coordinate lies outside the grid
    OutOfBounds,
    /// The two cells are not neighbours under the configured adjacency
    NotAdjacent,
    /// One of the cells is a blocked hole
    Blocked,
    /// A previous move is still resolving
    Busy,
}

impl RejectReason {
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::NoMatch => "no_match",
            RejectReason::OutOfBounds => "out_of_bounds",
            RejectReason::NotAdjacent => "not_adjacent",
            RejectReason::Blocked => "blocked",
            RejectReason::Busy => "busy",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RejectReason::NoMatch => "swap does not create a run of three",
            RejectReason::OutOfBounds => "coordinate outside the board",
            RejectReason::NotAdjacent => "cells are not adjacent",
            RejectReason::Blocked => "cannot swap a blocked cell",
            RejectReason::Busy => "board is still resolving the previous move",
        }
    }
}

/// Result of submitting a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum MoveOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub fn is_accepted(self) -> bool {
        self == MoveOutcome::Accepted
    }
}

/// Logical transition emitted while the board changes.
///
/// Hosts drive their own per-cell animation from these; the board itself only
/// ever holds logical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    Swapped { a: Pos, b: Pos },
    CellRemoved { pos: Pos, kind: TileKind },
    CellMoved { from: Pos, to: Pos, kind: TileKind },
    CellSpawned { pos: Pos, kind: TileKind },
    Reshuffled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blocked_layout_is_symmetric() {
        for &(x, y) in &DEFAULT_BLOCKED {
            let mirrored = (DEFAULT_WIDTH - 1 - x, y);
            assert!(DEFAULT_BLOCKED.contains(&mirrored), "missing {:?}", mirrored);
            let flipped = (x, DEFAULT_HEIGHT - 1 - y);
            assert!(DEFAULT_BLOCKED.contains(&flipped), "missing {:?}", flipped);
        }
    }

    #[test]
    fn cell_symbols_roundtrip() {
        for c in ['#', '.', '1', '5', '9'] {
            assert_eq!(Cell::from_symbol(c).map(Cell::symbol), Some(c));
        }
        assert_eq!(Cell::from_symbol('0'), None);
    }

    #[test]
    fn orthogonal_adjacency_rejects_self_and_diagonal() {
        let p = Pos::new(1, 1);
        assert!(!Adjacency::Orthogonal.allows(p, p));
        assert!(!Adjacency::Orthogonal.allows(p, Pos::new(2, 2)));
        assert!(!Adjacency::Orthogonal.allows(p, Pos::new(3, 1)));
        assert!(Adjacency::Orthogonal.allows(p, Pos::new(1, 0)));
    }

    #[test]
    fn diagonal_adjacency_rejects_self() {
        let p = Pos::new(0, 0);
        assert!(!Adjacency::WithDiagonals.allows(p, p));
        assert!(Adjacency::WithDiagonals.allows(p, Pos::new(1, 1)));
        assert!(!Adjacency::WithDiagonals.allows(p, Pos::new(2, 1)));
    }

    #[test]
    fn only_idle_accepts_input() {
        assert!(Phase::Idle.accepts_input());
        for phase in [
            Phase::Swapping,
            Phase::Removing,
            Phase::ApplyingGravity,
            Phase::Refilling,
        ] {
            assert!(!phase.accepts_input(), "{} should gate input", phase.as_str());
        }
    }

    #[test]
    fn reject_codes_are_distinct() {
        let reasons = [
            RejectReason::NoMatch,
            RejectReason::OutOfBounds,
            RejectReason::NotAdjacent,
            RejectReason::Blocked,
            RejectReason::Busy,
        ];
        for (i, a) in reasons.iter().enumerate() {
            for b in &reasons[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}
