//! Match detection
//!
//! Scans every row left to right and every column top to bottom, tracking the
//! current run of identical tiles. A run breaks on a kind change, an empty cell
//! or a blocked cell; runs of [`MIN_RUN`] or more are matches. Detection never
//! mutates the board, which is what lets the validator test hypothetical swaps.

use std::ops::ControlFlow;

use match3_types::{Pos, TileKind, MIN_RUN};

use crate::board::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Map (line index, offset along the line) to a board position
    #[inline(always)]
    fn pos(self, line: usize, along: usize) -> Pos {
        match self {
            Axis::Horizontal => Pos::new(along, line),
            Axis::Vertical => Pos::new(line, along),
        }
    }
}

/// A maximal run of at least [`MIN_RUN`] identical tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    /// Leftmost (horizontal) or topmost (vertical) cell
    pub start: Pos,
    pub len: usize,
    pub axis: Axis,
    pub kind: TileKind,
}

impl Run {
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let Run {
            start, len, axis, ..
        } = *self;
        (0..len).map(move |i| match axis {
            Axis::Horizontal => Pos::new(start.x + i, start.y),
            Axis::Vertical => Pos::new(start.x, start.y + i),
        })
    }
}

/// Boolean mask of cells to remove in the current pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    width: usize,
    height: usize,
    mask: Vec<bool>,
    count: usize,
}

impl MatchSet {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            mask: vec![false; width * height],
            count: 0,
        }
    }

    fn mark(&mut self, pos: Pos) {
        let slot = &mut self.mask[pos.y * self.width + pos.x];
        if !*slot {
            *slot = true;
            self.count += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of distinct marked cells
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height && self.mask[pos.y * self.width + pos.x]
    }

    /// Marked positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|&(_, &marked)| marked)
            .map(move |(i, _)| Pos::new(i % self.width, i / self.width))
    }
}

/// Walk all rows then all columns, reporting each run; stops early on `Break`.
fn scan_runs(board: &Board, mut on_run: impl FnMut(Run) -> ControlFlow<()>) -> ControlFlow<()> {
    let (width, height) = board.dimensions();
    for (axis, lines, along) in [
        (Axis::Horizontal, height, width),
        (Axis::Vertical, width, height),
    ] {
        for line in 0..lines {
            let mut start = 0;
            let mut current: Option<TileKind> = None;
            for i in 0..=along {
                let kind = if i < along {
                    board.cell(axis.pos(line, i)).tile()
                } else {
                    None
                };
                if kind.is_some() && kind == current {
                    continue;
                }
                if let Some(run_kind) = current {
                    let len = i - start;
                    if len >= MIN_RUN {
                        let run = Run {
                            start: axis.pos(line, start),
                            len,
                            axis,
                            kind: run_kind,
                        };
                        if on_run(run).is_break() {
                            return ControlFlow::Break(());
                        }
                    }
                }
                start = i;
                current = kind;
            }
        }
    }
    ControlFlow::Continue(())
}

/// Every run on the board, horizontal runs first
pub fn find_runs(board: &Board) -> Vec<Run> {
    let mut runs = Vec::new();
    let _ = scan_runs(board, |run| {
        runs.push(run);
        ControlFlow::Continue(())
    });
    runs
}

/// Mark every cell that belongs to at least one run
pub fn detect(board: &Board) -> MatchSet {
    let mut set = MatchSet::new(board.width(), board.height());
    let _ = scan_runs(board, |run| {
        run.positions().for_each(|p| set.mark(p));
        ControlFlow::Continue(())
    });
    set
}

/// Whether any run exists, stopping at the first one found
pub fn has_match(board: &Board) -> bool {
    scan_runs(board, |_| ControlFlow::Break(())).is_break()
}
