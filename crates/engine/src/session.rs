//! Session tally
//!
//! Counters that outlive a single move: tiles removed per kind, accepted and
//! rejected moves, cascade depth, reshuffles. The engine feeds every event it
//! emits through [`Session::observe`], so goal tracking never needs to reach
//! into the board.

use std::collections::BTreeMap;

use match3_types::{BoardEvent, MoveOutcome, TileKind};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub moves_accepted: u32,
    pub moves_rejected: u32,
    /// Moves whose resolution took more than one pass
    pub cascades: u32,
    /// Most passes any single move needed
    pub longest_chain: u32,
    pub removed_total: u64,
    pub removed_by_kind: BTreeMap<TileKind, u64>,
    pub reshuffles: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, event: &BoardEvent) {
        match *event {
            BoardEvent::CellRemoved { kind, .. } => {
                self.removed_total += 1;
                *self.removed_by_kind.entry(kind).or_default() += 1;
            }
            BoardEvent::Reshuffled => self.reshuffles += 1,
            BoardEvent::Swapped { .. }
            | BoardEvent::CellMoved { .. }
            | BoardEvent::CellSpawned { .. } => {}
        }
    }

    pub fn record_outcome(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Accepted => self.moves_accepted += 1,
            MoveOutcome::Rejected(_) => self.moves_rejected += 1,
        }
    }

    /// Close out a move that needed `passes` resolution passes
    pub fn finish_move(&mut self, passes: u32) {
        if passes > 1 {
            self.cascades += 1;
        }
        self.longest_chain = self.longest_chain.max(passes);
    }

    pub fn removed(&self, kind: TileKind) -> u64 {
        self.removed_by_kind.get(&kind).copied().unwrap_or(0)
    }
}
