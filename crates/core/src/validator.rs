//! Move validation
//!
//! A swap is checked structurally first (bounds, adjacency, blocked cells),
//! then tested on a scratch copy of the board. The live board is only touched
//! once the swap is known to produce a match, so a rejected move never leaves
//! a trace.

use match3_types::{Adjacency, Move, MoveOutcome, RejectReason};

use crate::board::Board;
use crate::matcher::has_match;

/// Structural checks, in order: bounds, adjacency, blocked cells
pub fn check_shape(board: &Board, mv: Move, adjacency: Adjacency) -> Result<(), RejectReason> {
    if !board.contains(mv.a) || !board.contains(mv.b) {
        return Err(RejectReason::OutOfBounds);
    }
    if !adjacency.allows(mv.a, mv.b) {
        return Err(RejectReason::NotAdjacent);
    }
    if board.cell(mv.a).is_blocked() || board.cell(mv.b).is_blocked() {
        return Err(RejectReason::Blocked);
    }
    Ok(())
}

/// Swap on a scratch copy and look for any run.
///
/// The caller guarantees `mv` passed [`check_shape`].
pub fn swap_creates_match(board: &Board, mv: Move) -> bool {
    let mut scratch = board.clone();
    scratch.cells_swap(mv);
    has_match(&scratch)
}

/// Judge a move without changing the board
pub fn evaluate(board: &Board, mv: Move, adjacency: Adjacency) -> MoveOutcome {
    if let Err(reason) = check_shape(board, mv, adjacency) {
        return MoveOutcome::Rejected(reason);
    }
    if swap_creates_match(board, mv) {
        MoveOutcome::Accepted
    } else {
        MoveOutcome::Rejected(RejectReason::NoMatch)
    }
}

/// Judge a move and, if accepted, commit the swap to `board`.
///
/// The caller resolves the resulting matches afterwards.
pub fn apply_move(board: &mut Board, mv: Move, adjacency: Adjacency) -> MoveOutcome {
    let outcome = evaluate(board, mv, adjacency);
    if outcome.is_accepted() {
        board.cells_swap(mv);
    }
    outcome
}

impl Board {
    /// Swap two in-bounds, non-blocked cells without re-checking
    pub(crate) fn cells_swap(&mut self, mv: Move) {
        let (a, b) = (self.cell(mv.a), self.cell(mv.b));
        self.put(mv.a, b);
        self.put(mv.b, a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match3_types::Pos;

    fn mv(ax: usize, ay: usize, bx: usize, by: usize) -> Move {
        Move::new(Pos::new(ax, ay), Pos::new(bx, by))
    }

    fn board() -> Board {
        // Swapping (3,0) with (3,1) lines up three 1s on the top row.
        Board::from_rows(&["#1123", "23312", "12231", "31#23"]).unwrap()
    }

    #[test]
    fn test_rejection_order() {
        let b = board();
        let adj = Adjacency::Orthogonal;
        assert_eq!(
            evaluate(&b, mv(4, 0, 5, 0), adj),
            MoveOutcome::Rejected(RejectReason::OutOfBounds)
        );
        assert_eq!(
            evaluate(&b, mv(1, 0, 2, 1), adj),
            MoveOutcome::Rejected(RejectReason::NotAdjacent)
        );
        assert_eq!(
            evaluate(&b, mv(1, 0, 1, 0), adj),
            MoveOutcome::Rejected(RejectReason::NotAdjacent)
        );
        assert_eq!(
            evaluate(&b, mv(0, 0, 1, 0), adj),
            MoveOutcome::Rejected(RejectReason::Blocked)
        );
        assert_eq!(
            evaluate(&b, mv(3, 0, 4, 0), adj),
            MoveOutcome::Rejected(RejectReason::NoMatch)
        );
    }

    #[test]
    fn test_accepted_move_commits() {
        let mut b = board();
        let outcome = apply_move(&mut b, mv(3, 0, 3, 1), Adjacency::Orthogonal);
        assert_eq!(outcome, MoveOutcome::Accepted);
        assert_eq!(b.to_rows()[0], "#1113");
        assert!(has_match(&b));
    }

    #[test]
    fn test_rejected_move_leaves_board() {
        let mut b = board();
        let before = b.clone();
        let outcome = apply_move(&mut b, mv(3, 0, 4, 0), Adjacency::Orthogonal);
        assert_eq!(outcome, MoveOutcome::Rejected(RejectReason::NoMatch));
        assert_eq!(b, before);
    }

    #[test]
    fn test_order_of_endpoints_is_irrelevant() {
        let b = board();
        for m in [mv(3, 0, 3, 1), mv(2, 0, 2, 1)] {
            assert_eq!(
                evaluate(&b, m, Adjacency::Orthogonal),
                evaluate(&b, m.flipped(), Adjacency::Orthogonal)
            );
        }
    }

    #[test]
    fn test_vertical_neighbour_without_match() {
        let b = board();
        assert_eq!(
            evaluate(&b, mv(2, 0, 2, 1), Adjacency::Orthogonal),
            MoveOutcome::Rejected(RejectReason::NoMatch)
        );
    }

    #[test]
    fn test_diagonal_needs_config() {
        // The 2 at (0,1) completes the top row only via a diagonal swap.
        let b = Board::from_rows(&["212", "231", "123"]).unwrap();
        let m = mv(0, 1, 1, 0);
        assert_eq!(
            evaluate(&b, m, Adjacency::Orthogonal),
            MoveOutcome::Rejected(RejectReason::NotAdjacent)
        );
        assert_eq!(evaluate(&b, m, Adjacency::WithDiagonals), MoveOutcome::Accepted);
    }
}
