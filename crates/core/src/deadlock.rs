//! Deadlock analysis and reshuffle
//!
//! A stable board is deadlocked when no single legal swap produces a match.
//! Candidate swaps are enumerated once per unordered neighbour pair and tested
//! with the same swap-and-scan technique the validator uses, on one scratch
//! board that is swapped back after every probe.

use arrayvec::ArrayVec;
use match3_types::{Adjacency, Move, Pos, RESHUFFLE_LIMIT};

use crate::board::Board;
use crate::error::ResolveError;
use crate::matcher::has_match;
use crate::rng::TileSource;

/// Attempts after which a reshuffle starts warning about a hostile layout
const SLOW_RESHUFFLE: u32 = 100;

/// Playable neighbours of `pos` that come after it in scan order
fn forward_neighbours(board: &Board, pos: Pos, adjacency: Adjacency) -> ArrayVec<Pos, 4> {
    let mut out = ArrayVec::new();
    for &(dx, dy) in adjacency.forward_offsets() {
        let (Some(x), Some(y)) = (pos.x.checked_add_signed(dx), pos.y.checked_add_signed(dy)) else {
            continue;
        };
        let next = Pos::new(x, y);
        if board.contains(next) && !board.cell(next).is_blocked() {
            out.push(next);
        }
    }
    out
}

/// Every swap between two playable neighbours holding different kinds
fn candidate_moves(board: &Board, adjacency: Adjacency) -> impl Iterator<Item = Move> + '_ {
    board.playable_positions().flat_map(move |a| {
        forward_neighbours(board, a, adjacency)
            .into_iter()
            .filter(move |&b| board.cell(a) != board.cell(b))
            .map(move |b| Move::new(a, b))
    })
}

/// Probe candidates on a scratch board until `stop` says so
fn probe(board: &Board, adjacency: Adjacency, mut stop: impl FnMut(Move) -> bool) {
    let mut scratch = board.clone();
    for mv in candidate_moves(board, adjacency) {
        scratch.cells_swap(mv);
        let hit = has_match(&scratch);
        scratch.cells_swap(mv);
        if hit && stop(mv) {
            return;
        }
    }
}

/// First swap (in scan order) that would create a match
pub fn find_hint(board: &Board, adjacency: Adjacency) -> Option<Move> {
    let mut found = None;
    probe(board, adjacency, |mv| {
        found = Some(mv);
        true
    });
    found
}

/// Every swap that would create a match
pub fn valid_moves(board: &Board, adjacency: Adjacency) -> Vec<Move> {
    let mut moves = Vec::new();
    probe(board, adjacency, |mv| {
        moves.push(mv);
        false
    });
    moves
}

pub fn has_any_valid_move(board: &Board, adjacency: Adjacency) -> bool {
    find_hint(board, adjacency).is_some()
}

/// Stable and without a single productive swap
pub fn is_deadlocked(board: &Board, adjacency: Adjacency) -> bool {
    !has_match(board) && !has_any_valid_move(board, adjacency)
}

/// Whether the board is match-free, fully filled and has a valid move
pub fn is_playable(board: &Board, adjacency: Adjacency) -> bool {
    board.is_filled() && !has_match(board) && has_any_valid_move(board, adjacency)
}

/// Reshuffle with the default attempt cap
pub fn reshuffle(
    board: &mut Board,
    source: &mut impl TileSource,
    adjacency: Adjacency,
) -> Result<u32, ResolveError> {
    reshuffle_with_limit(board, source, adjacency, RESHUFFLE_LIMIT)
}

/// Redraw every playable cell until the board is playable.
///
/// Returns the number of redraws used. After `limit` failures the board is
/// restored to its previous contents and [`ResolveError::ReshuffleExhausted`]
/// is returned.
pub fn reshuffle_with_limit(
    board: &mut Board,
    source: &mut impl TileSource,
    adjacency: Adjacency,
    limit: u32,
) -> Result<u32, ResolveError> {
    let original = board.clone();
    for attempt in 1..=limit {
        board.fill_from(source);
        if is_playable(board, adjacency) {
            if attempt > SLOW_RESHUFFLE {
                tracing::warn!(attempt, "reshuffle needed many redraws");
            } else {
                tracing::debug!(attempt, "reshuffled board");
            }
            return Ok(attempt);
        }
    }
    *board = original;
    tracing::error!(attempts = limit, "reshuffle exhausted");
    Err(ResolveError::ReshuffleExhausted { attempts: limit })
}
