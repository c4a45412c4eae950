//! Time-driven drop cadence, lock-delay, piece spawning/locking, and
//! game-over detection. Owns every piece of live game state except the
//! event subscription list, which the facade holds so handlers can be
//! registered before any state exists.

use crate::board::Playfield;
use crate::collision::fits;
use crate::error::{InputResult, RejectReason};
use crate::events::{Event, EventBus};
use crate::pieces::ActivePiece;
use crate::rng::{Bag, PreviewQueue};
use crate::rotation::{self, classify_tspin};
use crate::scoring;
use crate::types::{
    Direction, GameOverReason, GameStatus, Input, LineClearKind, PieceKind, TSpinKind,
};

pub struct Scheduler {
    playfield: Playfield,
    bag: Bag,
    preview: PreviewQueue,
    hold: Option<PieceKind>,
    active: Option<ActivePiece>,
    status: GameStatus,

    drop_accumulator_ms: u32,
    lock_accumulator_ms: u32,
    lock_delay_budget_ms: u32,
    max_lock_resets: u8,

    /// Kick index of the most recent successful rotation, if no
    /// translation has happened since; feeds the T-spin classifier.
    pending_tspin_kick: Option<usize>,

    game_time_ms: u64,
    score: u64,
    level: u8,
    lines: u32,
    combo: u32,
    back_to_back: bool,
}

impl Scheduler {
    pub fn new(
        seed: u64,
        lock_delay_ms: u32,
        max_lock_resets: u8,
        preview_length: u8,
        starting_level: u8,
    ) -> Self {
        let mut bag = Bag::new(seed);
        let preview = PreviewQueue::new(preview_length as usize, &mut bag);
        Self {
            playfield: Playfield::new(),
            bag,
            preview,
            hold: None,
            active: None,
            status: GameStatus::Menu,
            drop_accumulator_ms: 0,
            lock_accumulator_ms: 0,
            lock_delay_budget_ms: lock_delay_ms,
            max_lock_resets,
            pending_tspin_kick: None,
            game_time_ms: 0,
            score: 0,
            level: starting_level.clamp(1, 99),
            lines: 0,
            combo: 0,
            back_to_back: false,
        }
    }

    // --- observers -----------------------------------------------------

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn preview(&self, n: usize) -> Vec<PieceKind> {
        self.preview.peek().take(n).collect()
    }

    /// Extends `out` with the full preview queue without allocating a new
    /// `Vec`; used by `GameSnapshot::fill_from` so a host sampling every
    /// frame only ever reuses `out`'s existing buffer.
    pub(crate) fn fill_preview(&self, out: &mut Vec<PieceKind>) {
        out.extend(self.preview.peek());
    }

    pub fn hold(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_time_ms(&self) -> u64 {
        self.game_time_ms
    }

    /// The row the active piece would land on under pure gravity, ignoring
    /// lock delay.
    pub fn ghost_position(&self) -> Option<(i32, i32)> {
        let active = self.active.as_ref()?;
        let mut candidate = *active;
        loop {
            let next = candidate.translated(1, 0);
            if fits(&self.playfield, &next) {
                candidate = next;
            } else {
                break;
            }
        }
        Some(candidate.origin)
    }

    fn is_grounded(&self) -> bool {
        match &self.active {
            Some(active) => !fits(&self.playfield, &active.translated(1, 0)),
            None => false,
        }
    }

    // --- lifecycle -------------------------------------------------------

    pub fn start(&mut self, bus: &mut EventBus) {
        if self.status != GameStatus::Menu {
            return;
        }
        self.status = GameStatus::Playing;
        bus.publish(Event::Started);
        self.spawn_next_piece(bus);
    }

    pub fn pause(&mut self, bus: &mut EventBus) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
            bus.publish(Event::Paused);
        }
    }

    pub fn resume(&mut self, bus: &mut EventBus) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
            bus.publish(Event::Resumed);
        }
    }

    pub fn reset(&mut self, seed: u64, preview_length: u8, starting_level: u8) {
        self.playfield.clear();
        let mut bag = Bag::new(seed);
        self.preview = PreviewQueue::new(preview_length as usize, &mut bag);
        self.bag = bag;
        self.hold = None;
        self.active = None;
        self.status = GameStatus::Menu;
        self.drop_accumulator_ms = 0;
        self.lock_accumulator_ms = 0;
        self.pending_tspin_kick = None;
        self.game_time_ms = 0;
        self.score = 0;
        self.level = starting_level.clamp(1, 99);
        self.lines = 0;
        self.combo = 0;
        self.back_to_back = false;
    }

    // --- time advance ----------------------------------------------------

    pub fn step(&mut self, dt_ms: u32, bus: &mut EventBus) {
        if self.status != GameStatus::Playing {
            return;
        }
        self.game_time_ms += u64::from(dt_ms);

        let interval = scoring::drop_interval_ms(self.level);
        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(dt_ms);
        while self.drop_accumulator_ms >= interval {
            self.drop_accumulator_ms -= interval;
            self.translate_active(1, 0);
        }

        if self.is_grounded() {
            self.lock_accumulator_ms = self.lock_accumulator_ms.saturating_add(dt_ms);
            if self.lock_accumulator_ms >= self.lock_delay_budget_ms {
                self.lock_accumulator_ms = 0;
                self.drop_accumulator_ms = 0;
                self.lock_active_piece(bus);
            }
        } else {
            self.lock_accumulator_ms = 0;
            if let Some(active) = &mut self.active {
                active.lock_resets_used = 0;
            }
        }
    }

    // --- input -----------------------------------------------------------

    pub fn submit(&mut self, input: Input, bus: &mut EventBus) -> InputResult {
        if self.status != GameStatus::Playing {
            return InputResult::Rejected(RejectReason::NotPlaying);
        }
        if self.active.is_none() {
            return InputResult::Rejected(RejectReason::NoActivePiece);
        }

        match input {
            Input::MoveLeft => self.submit_translate(0, -1),
            Input::MoveRight => self.submit_translate(0, 1),
            Input::SoftDropOne => self.submit_soft_drop(),
            Input::HardDrop => self.submit_hard_drop(bus),
            Input::RotateCw => self.submit_rotate(Direction::Cw),
            Input::RotateCcw => self.submit_rotate(Direction::Ccw),
            Input::Hold => self.submit_hold(bus),
        }
    }

    fn submit_translate(&mut self, drow: i32, dcol: i32) -> InputResult {
        if self.translate_active(drow, dcol) {
            self.apply_grounded_reset();
            InputResult::Ok
        } else {
            InputResult::Rejected(RejectReason::Collision)
        }
    }

    fn submit_soft_drop(&mut self) -> InputResult {
        if self.translate_active(1, 0) {
            self.score = self.score.saturating_add(scoring::soft_drop_score(1));
            InputResult::Ok
        } else {
            InputResult::Rejected(RejectReason::Collision)
        }
    }

    fn submit_hard_drop(&mut self, bus: &mut EventBus) -> InputResult {
        let mut distance = 0u32;
        while self.translate_active(1, 0) {
            distance += 1;
        }
        self.score = self
            .score
            .saturating_add(scoring::hard_drop_score(distance));
        self.lock_active_piece(bus);
        InputResult::Ok
    }

    fn submit_rotate(&mut self, dir: Direction) -> InputResult {
        let active = self.active.expect("checked by submit");
        match rotation::try_rotate(&self.playfield, &active, dir) {
            Ok(pose) => {
                self.active = Some(active.with_pose(pose.origin, pose.rotation));
                self.pending_tspin_kick = pose.kick_index;
                self.apply_grounded_reset();
                InputResult::Ok
            }
            Err(_) => InputResult::Rejected(RejectReason::Collision),
        }
    }

    fn submit_hold(&mut self, bus: &mut EventBus) -> InputResult {
        let active = self.active.expect("checked by submit");
        if active.has_held_this_turn {
            return InputResult::Rejected(RejectReason::AlreadyHeld);
        }

        let outgoing = active.kind;
        let previous_hold = self.hold.replace(outgoing);
        let incoming = match previous_hold {
            Some(kind) => kind,
            None => self.preview.take(&mut self.bag),
        };

        let mut spawned = ActivePiece::spawn(incoming, self.lock_delay_budget_ms);
        spawned.has_held_this_turn = true;

        if !fits(&self.playfield, &spawned) {
            self.enter_game_over(bus, GameOverReason::BlockOut);
            return InputResult::Ok;
        }

        self.active = Some(spawned);
        self.drop_accumulator_ms = 0;
        self.lock_accumulator_ms = 0;
        self.pending_tspin_kick = None;
        // `from`/`to` report the hold slot's own before/after value, not
        // the active piece's kind: `from` is `None` on a player's first
        // hold, when the slot was empty.
        bus.publish(Event::Held {
            from: previous_hold,
            to: Some(outgoing),
        });
        InputResult::Ok
    }

    // --- internal mechanics ----------------------------------------------

    /// Attempts to move the active piece by `(drow, dcol)`. On success,
    /// clears the T-spin candidate (a translation always breaks it).
    fn translate_active(&mut self, drow: i32, dcol: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = active.translated(drow, dcol);
        if fits(&self.playfield, &candidate) {
            self.active = Some(candidate);
            self.pending_tspin_kick = None;
            true
        } else {
            false
        }
    }

    /// After a successful grounded lateral/rotational move, resets the
    /// lock timer, up to the configured reset budget.
    fn apply_grounded_reset(&mut self) {
        if !self.is_grounded() {
            return;
        }
        if let Some(active) = &mut self.active {
            if active.lock_resets_used < self.max_lock_resets {
                active.lock_resets_used += 1;
                self.lock_accumulator_ms = 0;
            }
        }
    }

    fn lock_active_piece(&mut self, bus: &mut EventBus) {
        let active = self.active.take().expect("lock requires an active piece");
        let cells = active.absolute_cells();
        self.playfield.place(&cells, active.kind.as_cell());
        bus.publish(Event::PieceLocked {
            kind: active.kind,
            cells,
        });

        let tspin = classify_tspin(&self.playfield, &active, self.pending_tspin_kick);
        let rows = self.playfield.full_rows();

        if rows.is_empty() {
            self.combo = 0;
            self.back_to_back = false;
            if tspin != TSpinKind::None {
                let award = scoring::calculate_no_clear_tspin_score(tspin, self.level);
                self.score = self.score.saturating_add(award);
            }
        } else {
            let row_count = rows.len();
            let kind = LineClearKind::from_row_count(row_count)
                .unwrap_or_else(|| crate::error::programmer_error("unexpected clear row count"));
            self.playfield.clear_rows(rows.as_slice());
            let perfect_clear = self.playfield.is_empty();

            let result = scoring::calculate_score(
                kind,
                tspin,
                row_count,
                self.level,
                self.combo,
                self.back_to_back,
                perfect_clear,
            );

            self.combo += 1;
            self.back_to_back = result.back_to_back;
            self.score = self.score.saturating_add(result.total);

            let previous_level = self.level;
            self.lines = self.lines.saturating_add(row_count as u32);
            self.level = scoring::level_for_lines(self.lines);

            bus.publish(Event::LinesCleared {
                rows: rows.iter().copied().collect(),
                kind,
                tspin,
                perfect_clear,
                awarded: result.total,
            });

            if self.level > previous_level {
                bus.publish(Event::LevelUp {
                    from: previous_level,
                    to: self.level,
                });
            }
        }

        self.pending_tspin_kick = None;
        self.spawn_next_piece(bus);
    }

    fn spawn_next_piece(&mut self, bus: &mut EventBus) {
        let kind = self.preview.take(&mut self.bag);
        let candidate = ActivePiece::spawn(kind, self.lock_delay_budget_ms);

        if !fits(&self.playfield, &candidate) {
            self.enter_game_over(bus, GameOverReason::BlockOut);
            return;
        }

        self.active = Some(candidate);
        self.drop_accumulator_ms = 0;
        self.lock_accumulator_ms = 0;
        self.pending_tspin_kick = None;
        bus.publish(Event::Spawned { kind });
    }

    fn enter_game_over(&mut self, bus: &mut EventBus, reason: GameOverReason) {
        self.status = GameStatus::GameOver;
        self.active = None;
        bus.publish(Event::Ended {
            score: self.score,
            level: self.level,
            lines: self.lines,
            time_ms: self.game_time_ms,
        });
        bus.publish(Event::GameOver { reason });
    }
}
