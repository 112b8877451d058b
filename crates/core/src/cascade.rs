//! Cascade controller - detect and resolve until the board is stable

use match3_types::CASCADE_LIMIT;

use crate::board::Board;
use crate::error::ResolveError;
use crate::matcher::detect;
use crate::resolver::{resolve, ResolveReport};
use crate::rng::TileSource;

/// Accumulated result of a cascade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Resolution passes run; zero means the board was already stable
    pub passes: u32,
    pub total: ResolveReport,
}

impl CascadeReport {
    pub fn is_noop(&self) -> bool {
        self.passes == 0
    }
}

/// Count one more resolution pass against `limit`.
///
/// Returns the new pass count, or [`ResolveError::CascadeOverrun`] when
/// `passes` already reached the cap.
pub fn next_pass(passes: u32, limit: u32) -> Result<u32, ResolveError> {
    if passes >= limit {
        tracing::error!(limit, "cascade overran its pass limit");
        return Err(ResolveError::CascadeOverrun { limit });
    }
    Ok(passes + 1)
}

/// Resolve with the default pass cap
pub fn cascade(board: &mut Board, source: &mut impl TileSource) -> Result<CascadeReport, ResolveError> {
    cascade_with_limit(board, source, CASCADE_LIMIT)
}

/// Repeat detect → resolve until a scan finds nothing.
///
/// More than `limit` passes is reported as [`ResolveError::CascadeOverrun`];
/// the board is left as it was after the last pass.
pub fn cascade_with_limit(
    board: &mut Board,
    source: &mut impl TileSource,
    limit: u32,
) -> Result<CascadeReport, ResolveError> {
    let mut report = CascadeReport::default();
    loop {
        let matches = detect(board);
        if matches.is_empty() {
            if report.passes > 0 {
                tracing::debug!(
                    passes = report.passes,
                    removed = report.total.removed,
                    "cascade settled"
                );
            }
            return Ok(report);
        }
        report.passes = next_pass(report.passes, limit)?;
        report.total.absorb(resolve(board, &matches, source));
    }
}
