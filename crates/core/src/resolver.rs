//! Segment resolver - remove, compact, refill
//!
//! Resolution of a match set runs in three steps that the phase controller can
//! also drive one at a time:
//!
//! 1. [`clear_matches`]: matched tiles become `Empty`
//! 2. [`apply_gravity`]: survivors in every column segment slide to the bottom
//!    of that segment, keeping their relative order
//! 3. [`refill`]: every vacated slot (now at the top of its segment) gets an
//!    independent draw from the tile source
//!
//! Blocked cells bound the segments and are never read as tiles or written.
//! A single pass does not guarantee a match-free board; that is the cascade's
//! job.

use std::collections::BTreeMap;

use match3_types::{BoardEvent, Cell, Pos, TileKind};

use crate::board::Board;
use crate::matcher::MatchSet;
use crate::rng::TileSource;

/// What one resolution pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub removed: usize,
    pub moved: usize,
    pub spawned: usize,
    pub removed_by_kind: BTreeMap<TileKind, usize>,
    pub events: Vec<BoardEvent>,
}

impl ResolveReport {
    /// Fold another pass into this one
    pub fn absorb(&mut self, other: ResolveReport) {
        self.removed += other.removed;
        self.moved += other.moved;
        self.spawned += other.spawned;
        for (kind, n) in other.removed_by_kind {
            *self.removed_by_kind.entry(kind).or_default() += n;
        }
        self.events.extend(other.events);
    }
}

/// Empty every matched tile. Returns the number of tiles removed.
pub fn clear_matches(board: &mut Board, matches: &MatchSet, events: &mut Vec<BoardEvent>) -> usize {
    let mut removed = 0;
    for pos in matches.positions() {
        if let Cell::Tile(kind) = board.cell(pos) {
            board.put(pos, Cell::Empty);
            events.push(BoardEvent::CellRemoved { pos, kind });
            removed += 1;
        }
    }
    removed
}

/// Compact each column segment towards its bottom. Returns tiles moved.
///
/// Uses a two-pointer scan from the bottom of the segment upwards, so it
/// never allocates beyond the segment list.
pub fn apply_gravity(board: &mut Board, events: &mut Vec<BoardEvent>) -> usize {
    let mut moved = 0;
    for x in 0..board.width() {
        for segment in board.column_segments(x) {
            let mut write = segment.bottom;
            for read in segment.rows().rev() {
                let from = Pos::new(x, read);
                if let Cell::Tile(kind) = board.cell(from) {
                    write -= 1;
                    if write != read {
                        let to = Pos::new(x, write);
                        board.put(to, Cell::Tile(kind));
                        board.put(from, Cell::Empty);
                        events.push(BoardEvent::CellMoved { from, to, kind });
                        moved += 1;
                    }
                }
            }
        }
    }
    moved
}

/// Draw a tile for every empty cell, column by column, top to bottom.
/// Returns tiles spawned.
pub fn refill(board: &mut Board, source: &mut impl TileSource, events: &mut Vec<BoardEvent>) -> usize {
    let mut spawned = 0;
    for x in 0..board.width() {
        for y in 0..board.height() {
            let pos = Pos::new(x, y);
            if board.cell(pos).is_empty() {
                let kind = source.draw();
                board.put(pos, Cell::Tile(kind));
                events.push(BoardEvent::CellSpawned { pos, kind });
                spawned += 1;
            }
        }
    }
    spawned
}

/// Run all three steps for one match set
pub fn resolve(board: &mut Board, matches: &MatchSet, source: &mut impl TileSource) -> ResolveReport {
    let mut report = ResolveReport::default();
    let mut events = Vec::new();

    for pos in matches.positions() {
        if let Some(kind) = board.cell(pos).tile() {
            *report.removed_by_kind.entry(kind).or_default() += 1;
        }
    }
    report.removed = clear_matches(board, matches, &mut events);
    report.moved = apply_gravity(board, &mut events);
    report.spawned = refill(board, source, &mut events);
    report.events = events;

    tracing::debug!(
        removed = report.removed,
        moved = report.moved,
        spawned = report.spawned,
        "resolved match set"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::detect;
    use crate::rng::ReplayTiles;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_gravity_keeps_order() {
        let mut b = board(&["1", ".", "2", ".", "3"]);
        let mut events = Vec::new();
        let moved = apply_gravity(&mut b, &mut events);
        assert_eq!(b.to_rows(), vec![".", ".", "1", "2", "3"]);
        assert_eq!(moved, 2);
        assert_eq!(
            events[0],
            BoardEvent::CellMoved {
                from: Pos::new(0, 2),
                to: Pos::new(0, 3),
                kind: TileKind::new(1),
            }
        );
    }

    #[test]
    fn test_gravity_stops_at_blocked() {
        let mut b = board(&["1", ".", "#", "2", "."]);
        apply_gravity(&mut b, &mut Vec::new());
        assert_eq!(b.to_rows(), vec![".", "1", "#", ".", "2"]);
    }

    #[test]
    fn test_refill_fills_top_of_segment() {
        let mut b = board(&[".", "1", "#", ".", "."]);
        let mut source = ReplayTiles::new(&[4, 5, 6]);
        let spawned = refill(&mut b, &mut source, &mut Vec::new());
        assert_eq!(spawned, 3);
        assert_eq!(b.to_rows(), vec!["5", "1", "#", "6", "7"]);
    }

    #[test]
    fn test_resolve_vertical_match() {
        let mut b = board(&["1", "1", "1", "2", "3"]);
        let matches = detect(&b);
        let mut source = ReplayTiles::new(&[3, 4, 5]);
        let report = resolve(&mut b, &matches, &mut source);
        assert_eq!(b.to_rows(), vec!["4", "5", "6", "2", "3"]);
        assert_eq!(report.removed, 3);
        assert_eq!(report.moved, 0);
        assert_eq!(report.spawned, 3);
        assert_eq!(report.removed_by_kind.get(&TileKind::new(0)), Some(&3));
    }

    #[test]
    fn test_resolve_horizontal_match_drops_column_above() {
        let mut b = board(&["456", "123", "111"]);
        let matches = detect(&b);
        let mut source = ReplayTiles::new(&[8]);
        let report = resolve(&mut b, &matches, &mut source);
        assert_eq!(b.to_rows(), vec!["999", "456", "123"]);
        assert_eq!(report.moved, 6);
        assert_eq!(report.spawned, 3);
    }

    #[test]
    fn test_resolve_with_notch() {
        // Blocked cell mid-column splits gravity into two segments.
        let mut b = board(&["2#3", "1#3", "111"]);
        let matches = detect(&b);
        let mut source = ReplayTiles::new(&[6]);
        resolve(&mut b, &matches, &mut source);
        assert_eq!(b.to_rows(), vec!["7#7", "2#3", "173"]);
    }

    #[test]
    fn test_absorb_sums() {
        let mut a = ResolveReport {
            removed: 3,
            removed_by_kind: BTreeMap::from([(TileKind::new(1), 3)]),
            ..Default::default()
        };
        let b = ResolveReport {
            removed: 4,
            removed_by_kind: BTreeMap::from([(TileKind::new(1), 4)]),
            ..Default::default()
        };
        a.absorb(b);
        assert_eq!(a.removed, 7);
        assert_eq!(a.removed_by_kind[&TileKind::new(1)], 7);
    }
}
