//! Board resolution logic - pure, deterministic, and testable
//!
//! Everything here operates on a logical [`Board`] and has no knowledge of
//! rendering, timing or input. Randomness comes in through the
//! [`TileSource`] trait, so a seeded [`SeededTiles`] reproduces a game exactly
//! and a [`ReplayTiles`] script pins refills in tests.
//!
//! # Module Structure
//!
//! - [`board`]: grid of cells with fixed blocked holes, column segments
//! - [`matcher`]: run detection, read-only
//! - [`resolver`]: remove matched tiles, compact segments, refill
//! - [`cascade`]: repeat detect/resolve until stable, with a pass cap
//! - [`validator`]: structural checks and speculative swap testing
//! - [`deadlock`]: valid-move search, hints, reshuffle
//! - [`rng`]: LCG and tile sources
//! - [`snapshot`]: serializable board view with FNV-1a hash
//! - [`scan`]: background detection handoff
//!
//! # Example
//!
//! ```
//! use match3_core::{cascade, detect, evaluate, Board, ReplayTiles};
//! use match3_core::types::{Adjacency, Move, MoveOutcome, Pos};
//!
//! let mut board = Board::from_rows(&["1213", "3132", "2324"]).unwrap();
//! let mv = Move::new(Pos::new(1, 0), Pos::new(1, 1));
//! assert_eq!(evaluate(&board, mv, Adjacency::Orthogonal), MoveOutcome::Accepted);
//!
//! board.swap(mv.a, mv.b).unwrap();
//! assert_eq!(detect(&board).len(), 3);
//!
//! let mut refill = ReplayTiles::new(&[3, 4, 5]);
//! let report = cascade(&mut board, &mut refill).unwrap();
//! assert_eq!(report.total.removed, 3);
//! assert!(detect(&board).is_empty());
//! ```

pub mod board;
pub mod cascade;
pub mod deadlock;
pub mod error;
pub mod matcher;
pub mod resolver;
pub mod rng;
pub mod scan;
pub mod snapshot;
pub mod validator;

pub use match3_types as types;

// Re-export commonly used items for convenience
pub use board::{Board, ColumnSegment};
pub use cascade::{cascade, cascade_with_limit, next_pass, CascadeReport};
pub use deadlock::{
    find_hint, has_any_valid_move, is_deadlocked, is_playable, reshuffle, reshuffle_with_limit,
    valid_moves,
};
pub use error::{GridError, ResolveError};
pub use matcher::{detect, find_runs, has_match, Axis, MatchSet, Run};
pub use resolver::{apply_gravity, clear_matches, refill, resolve, ResolveReport};
pub use rng::{ReplayTiles, SeededTiles, SimpleRng, TileSource};
pub use scan::{spawn_scan, ScanResult, ScanSlot};
pub use snapshot::{board_hash, BoardSnapshot};
pub use validator::{apply_move, check_shape, evaluate, swap_creates_match};
