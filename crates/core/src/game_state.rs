//! Game state module - the per-frame state machine
//!
//! This module ties together the board, the active piece, the piece source and
//! scoring. It is driven by two entry points: [`GameState::apply_action`] for
//! player commands and [`GameState::tick`] once per frame.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::{calculate_score, fall_interval_for_level, line_points, should_level_up};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Events buffered between two drains. Extra events are dropped.
const EVENT_CAPACITY: usize = 32;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformSource> {
    board: Board,
    active: Piece,
    next: PieceKind,
    source: S,
    phase: Phase,
    score: u32,
    level: u32,
    /// Total rows cleared this game (display only).
    lines: u32,
    /// Frames per row of gravity.
    fall_interval: u32,
    /// Frames since gravity last fired.
    fall_counter: u32,
    /// Grounded gravity checks since the last lock.
    lock_delay: u32,
    /// Frames simulated this game.
    frame: u64,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState<UniformSource> {
    /// Create a game using the default uniform piece source.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(UniformSource::new(seed))
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a new game waiting on the intro screen.
    ///
    /// The first two kinds drawn from `source` become the active and next pieces.
    pub fn new(mut source: S) -> Self {
        let active = Piece::spawn(source.next_kind());
        let next = source.next_kind();
        Self {
            board: Board::new(),
            active,
            next,
            source,
            phase: Phase::Intro,
            score: 0,
            level: 0,
            lines: 0,
            fall_interval: INITIAL_FALL_INTERVAL,
            fall_counter: 0,
            lock_delay: 0,
            frame: 0,
            events: ArrayVec::new(),
        }
    }

    /// Replace the locked cells (scenario setup for tests and benches).
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn fall_interval(&self) -> u32 {
        self.fall_interval
    }

    pub fn lock_delay(&self) -> u32 {
        self.lock_delay
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Take every event recorded since the last drain.
    ///
    /// At most 32 events are held between drains; later ones are dropped
    /// until the queue is drained.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    fn push_event(&mut self, event: GameEvent) {
        let _ = self.events.try_push(event);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = ActiveSnapshot::from(&self.active);
        out.next = self.next;
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.fall_interval = self.fall_interval;
        out.lock_delay = self.lock_delay;
        out.frame = self.frame;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player command.
    ///
    /// Returns true if the command changed anything. Commands that do not
    /// apply to the current phase are ignored.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match (self.phase, action) {
            (Phase::Intro, GameAction::Confirm) | (Phase::Paused, GameAction::Confirm) => {
                self.phase = Phase::Playing;
                true
            }
            (Phase::GameOver, GameAction::Confirm) => {
                self.restart();
                true
            }
            (Phase::Playing, GameAction::MoveLeft) => self.active.translate(-1, 0, &self.board),
            (Phase::Playing, GameAction::MoveRight) => self.active.translate(1, 0, &self.board),
            (Phase::Playing, GameAction::SoftDrop) => self.active.translate(0, 1, &self.board),
            (Phase::Playing, GameAction::RotateCw) => self.active.rotate(&self.board),
            (Phase::Playing, GameAction::HardDrop) => self.active.drop(&self.board) > 0,
            (Phase::Playing, GameAction::Pause) => {
                self.phase = Phase::Paused;
                true
            }
            _ => false,
        }
    }

    /// Advance one frame.
    ///
    /// Gravity fires every `fall_interval` frames. On those frames a grounded
    /// piece bumps the lock-delay counter and locks once the counter exceeds
    /// [`LOCK_DELAY_CHECKS`], or at once if it never left the spawn row.
    /// Complete rows are cleared and scored every frame.
    ///
    /// Returns true if gravity fired.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.frame += 1;
        self.fall_counter += 1;

        let mut gravity = false;
        let mut topped_out = false;
        if self.fall_counter >= self.fall_interval {
            gravity = true;
            self.fall_counter = 0;
            self.active.translate(0, 1, &self.board);
            if self.active.is_dropped(&self.board) {
                self.lock_delay += 1;
                let at_spawn = Board::is_game_over(&self.active);
                if at_spawn || self.lock_delay > LOCK_DELAY_CHECKS {
                    topped_out = self.lock_active();
                }
            }
        }

        let cleared = self.board.clear_complete_rows().len();
        self.score_rows(cleared);

        if topped_out {
            self.phase = Phase::GameOver;
            self.push_event(GameEvent::GameOver { score: self.score });
        }
        gravity
    }

    /// Lock the active piece, promote the next piece and draw a new preview.
    ///
    /// Returns true if the locked piece topped out.
    fn lock_active(&mut self) -> bool {
        let incoming = Piece::spawn(self.next);
        let locked = std::mem::replace(&mut self.active, incoming);
        let kind = locked.kind();
        let anchor = locked.anchor();
        let topped_out = self.board.lock(locked);
        self.lock_delay = 0;
        self.push_event(GameEvent::Locked {
            kind,
            anchor,
            topped_out,
        });

        self.next = self.source.next_kind();
        self.push_event(GameEvent::Spawned {
            kind: self.active.kind(),
            next: self.next,
        });
        topped_out
    }

    fn score_rows(&mut self, cleared: usize) {
        let points = line_points(cleared, self.level);
        self.score = calculate_score(self.score, self.level, cleared);
        if cleared > 0 {
            self.lines = self.lines.saturating_add(cleared as u32);
            self.push_event(GameEvent::RowsCleared {
                rows: cleared as u32,
                points,
            });
        }

        if should_level_up(cleared, self.level) {
            self.level += 1;
            self.fall_interval = fall_interval_for_level(self.level);
            self.push_event(GameEvent::LevelUp {
                level: self.level,
                fall_interval: self.fall_interval,
            });
        }
    }

    /// Full reset after game over, straight into play.
    fn restart(&mut self) {
        self.board.clear();
        self.active = Piece::spawn(self.source.next_kind());
        self.next = self.source.next_kind();
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.fall_interval = INITIAL_FALL_INTERVAL;
        self.fall_counter = 0;
        self.lock_delay = 0;
        self.frame = 0;
        self.phase = Phase::Playing;
        self.push_event(GameEvent::Restarted);
        self.push_event(GameEvent::Spawned {
            kind: self.active.kind(),
            next: self.next,
        });
    }
}

impl Default for GameState<UniformSource> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
