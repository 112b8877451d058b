use match3_types::Pos;

/// Errors raised by grid access and construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("coordinate {0} is outside the board")]
    OutOfBounds(Pos),

    #[error("board dimensions must be non-zero (got {width}x{height})")]
    EmptyBoard { width: usize, height: usize },

    #[error("board of {width}x{height} cells does not fit in memory")]
    TooLarge { width: usize, height: usize },

    #[error("write to {0} would change the blocked layout")]
    LayoutChange(Pos),

    #[error("unknown cell symbol {symbol:?} at row {row}, column {col}")]
    BadSymbol { row: usize, col: usize, symbol: char },

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
}

/// Broken-invariant failures of the resolution loops.
///
/// Neither is recoverable on the current board; both are surfaced to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("cascade did not settle within {limit} passes")]
    CascadeOverrun { limit: u32 },

    #[error("no match-free board with a valid move found after {attempts} reshuffles")]
    ReshuffleExhausted { attempts: u32 },
}
