//! Phase/lifecycle controller
//!
//! The engine owns the board and steps it through
//!
//! | Phase | `advance()` does | Next |
//! |-------|------------------|------|
//! | `Idle` | nothing | `Idle` |
//! | `Swapping` | detect matches | `Removing` |
//! | `Removing` | clear matched tiles | `ApplyingGravity` |
//! | `ApplyingGravity` | compact segments | `Refilling` |
//! | `Refilling` | refill, detect again | `Removing` or `Idle` |
//!
//! Every transition is synchronous; a host that animates simply calls
//! [`Engine::advance`] when its animation for the current phase is done, or
//! [`Engine::settle`] to run straight to `Idle`. On returning to `Idle` a
//! deadlocked board is reshuffled and [`BoardEvent::Reshuffled`] is emitted.

use std::sync::Arc;
use std::thread::JoinHandle;

use match3_core::{
    apply_gravity, apply_move, clear_matches, detect, find_hint, is_deadlocked, is_playable,
    next_pass, refill, reshuffle_with_limit, spawn_scan, Board, BoardSnapshot, MatchSet,
    ScanSlot, SeededTiles, TileSource,
};
use match3_types::{Adjacency, BoardEvent, Move, MoveOutcome, Phase, RejectReason};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct Engine<S: TileSource = SeededTiles> {
    board: Board,
    source: S,
    adjacency: Adjacency,
    cascade_limit: u32,
    reshuffle_limit: u32,
    phase: Phase,
    /// Matches found on entering `Removing`, cleared on leaving it
    pending: Option<MatchSet>,
    /// Resolution passes of the move in flight
    passes: u32,
    /// Bumped on every board mutation
    generation: u64,
    events: Vec<BoardEvent>,
    last_outcome: Option<MoveOutcome>,
    session: Session,
}

impl Engine<SeededTiles> {
    /// Build and generate a board from `config`, seeded from `config.seed`
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Self::with_source(config, SeededTiles::new(config.seed, config.palette))
    }
}

impl<S: TileSource> Engine<S> {
    /// Build the configured layout and fill it from `source`.
    ///
    /// The first fill goes through the reshuffle loop, so the starting board
    /// is match-free and has at least one valid move.
    pub fn with_source(config: &EngineConfig, mut source: S) -> Result<Self, EngineError> {
        config.validate()?;
        let mut board = config.build_board()?;
        let attempts = reshuffle_with_limit(
            &mut board,
            &mut source,
            config.adjacency,
            config.reshuffle_limit,
        )?;
        tracing::info!(
            width = config.width,
            height = config.height,
            palette = config.palette,
            attempts,
            "generated board"
        );
        Ok(Self::assemble(board, source, config))
    }

    /// Take over an existing board in `Idle`.
    ///
    /// The board must already be playable: fully filled, free of matches and
    /// with at least one valid move under `config.adjacency`. Only the
    /// adjacency and limits of `config` are used.
    pub fn from_board(
        board: Board,
        source: S,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        if !is_playable(&board, config.adjacency) {
            tracing::warn!(
                width = board.width(),
                height = board.height(),
                "refusing unplayable board"
            );
            return Err(EngineError::Unplayable);
        }
        Ok(Self::assemble(board, source, config))
    }

    fn assemble(board: Board, source: S, config: &EngineConfig) -> Self {
        Self {
            board,
            source,
            adjacency: config.adjacency,
            cascade_limit: config.cascade_limit,
            reshuffle_limit: config.reshuffle_limit,
            phase: Phase::Idle,
            pending: None,
            passes: 0,
            generation: 0,
            events: Vec::new(),
            last_outcome: None,
            session: Session::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    pub fn last_outcome(&self) -> Option<MoveOutcome> {
        self.last_outcome
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.board, self.phase, self.generation)
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// A swap that would create a match; `None` while resolving
    pub fn hint(&self) -> Option<Move> {
        if !self.phase.accepts_input() {
            return None;
        }
        find_hint(&self.board, self.adjacency)
    }

    /// Run the detector on a worker over a copy of the current board
    pub fn spawn_scan(&self, slot: Arc<ScanSlot>) -> JoinHandle<()> {
        spawn_scan(self.board.clone(), self.generation, slot)
    }

    /// Validate a player move and, if accepted, commit the swap and enter
    /// `Swapping`. A rejected move leaves the board untouched.
    pub fn submit(&mut self, mv: Move) -> MoveOutcome {
        let outcome = if self.phase.accepts_input() {
            apply_move(&mut self.board, mv, self.adjacency)
        } else {
            MoveOutcome::Rejected(RejectReason::Busy)
        };

        if outcome.is_accepted() {
            self.generation += 1;
            self.passes = 0;
            self.emit(BoardEvent::Swapped { a: mv.a, b: mv.b });
            self.enter(Phase::Swapping);
        } else if let MoveOutcome::Rejected(reason) = outcome {
            tracing::debug!(%mv, reason = reason.code(), "move rejected");
        }
        self.session.record_outcome(outcome);
        self.last_outcome = Some(outcome);
        outcome
    }

    /// Perform exactly one phase transition and return the new phase
    pub fn advance(&mut self) -> Result<Phase, EngineError> {
        match self.phase {
            Phase::Idle => {}
            Phase::Swapping => self.scan_or_finish()?,
            Phase::Removing => {
                if let Some(matches) = self.pending.take() {
                    let start = self.events.len();
                    let removed = clear_matches(&mut self.board, &matches, &mut self.events);
                    self.observe_since(start);
                    self.generation += 1;
                    tracing::debug!(removed, pass = self.passes, "cleared matches");
                }
                self.enter(Phase::ApplyingGravity);
            }
            Phase::ApplyingGravity => {
                let start = self.events.len();
                let moved = apply_gravity(&mut self.board, &mut self.events);
                self.observe_since(start);
                if moved > 0 {
                    self.generation += 1;
                }
                self.enter(Phase::Refilling);
            }
            Phase::Refilling => {
                let start = self.events.len();
                let spawned = refill(&mut self.board, &mut self.source, &mut self.events);
                self.observe_since(start);
                if spawned > 0 {
                    self.generation += 1;
                }
                self.scan_or_finish()?;
            }
        }
        Ok(self.phase)
    }

    /// Advance until the board is back in `Idle`
    pub fn settle(&mut self) -> Result<(), EngineError> {
        while self.phase != Phase::Idle {
            self.advance()?;
        }
        Ok(())
    }

    /// Submit and, if accepted, settle
    pub fn play(&mut self, mv: Move) -> Result<MoveOutcome, EngineError> {
        let outcome = self.submit(mv);
        if outcome.is_accepted() {
            self.settle()?;
        }
        Ok(outcome)
    }

    /// Detect on the current board: start another pass or finish the move
    fn scan_or_finish(&mut self) -> Result<(), EngineError> {
        let matches = detect(&self.board);
        if matches.is_empty() {
            return self.finish_move();
        }
        self.passes = next_pass(self.passes, self.cascade_limit)?;
        self.pending = Some(matches);
        self.enter(Phase::Removing);
        Ok(())
    }

    fn finish_move(&mut self) -> Result<(), EngineError> {
        self.session.finish_move(self.passes);
        tracing::debug!(passes = self.passes, "move settled");
        self.passes = 0;
        self.enter(Phase::Idle);

        if is_deadlocked(&self.board, self.adjacency) {
            let attempts = reshuffle_with_limit(
                &mut self.board,
                &mut self.source,
                self.adjacency,
                self.reshuffle_limit,
            )?;
            self.generation += 1;
            self.emit(BoardEvent::Reshuffled);
            tracing::info!(attempts, "board was deadlocked, reshuffled");
        }
        Ok(())
    }

    fn enter(&mut self, phase: Phase) {
        tracing::trace!(from = self.phase.as_str(), to = phase.as_str(), "phase");
        self.phase = phase;
    }

    fn emit(&mut self, event: BoardEvent) {
        self.session.observe(&event);
        self.events.push(event);
    }

    fn observe_since(&mut self, start: usize) {
        for event in &self.events[start..] {
            self.session.observe(event);
        }
    }
}
