//! Background match scanning
//!
//! A worker thread runs the detector over an owned copy of the board and
//! publishes the result into a [`ScanSlot`]. The live board is never shared
//! with the worker. Each result carries the board generation it was computed
//! for; a consumer discards any result whose generation no longer matches.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use crate::board::Board;
use crate::matcher::{detect, MatchSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub generation: u64,
    pub matches: MatchSet,
}

/// Mutex-protected handoff between one scanning worker and one consumer
#[derive(Debug, Default)]
pub struct ScanSlot {
    latest: Mutex<Option<ScanResult>>,
}

impl ScanSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<ScanResult>> {
        // A panicking worker cannot leave a half-written Option behind.
        self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace whatever is in the slot
    pub fn publish(&self, result: ScanResult) {
        *self.lock() = Some(result);
    }

    /// Take the result if it was computed for `generation`.
    ///
    /// A stale result is dropped and `None` returned.
    pub fn take_fresh(&self, generation: u64) -> Option<MatchSet> {
        let result = self.lock().take()?;
        if result.generation == generation {
            Some(result.matches)
        } else {
            tracing::debug!(
                stale = result.generation,
                current = generation,
                "dropped stale scan result"
            );
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }
}

/// Scan `board` on a worker thread and publish into `slot`
pub fn spawn_scan(board: Board, generation: u64, slot: Arc<ScanSlot>) -> JoinHandle<()> {
    thread::spawn(move || {
        let matches = detect(&board);
        slot.publish(ScanResult {
            generation,
            matches,
        });
    })
}
