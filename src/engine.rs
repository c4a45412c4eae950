//! The host-facing facade: owns the `EventBus` so handlers can subscribe
//! before any game state exists, and forwards everything else to the
//! `Scheduler`.

use crate::board::Playfield;
use crate::error::InputResult;
use crate::events::{Event, EventBus};
use crate::pieces::ActivePiece;
use crate::scheduler::Scheduler;
use crate::snapshot::GameSnapshot;
use crate::types::{GameStatus, Input, PieceKind};

/// Construction-time configuration. `seed` has no sensible default, so
/// there is no blanket `Default` impl; start from `EngineConfig::new(seed)`
/// and override the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed: u64,
    pub lock_delay_ms: u32,
    pub max_lock_resets: u8,
    pub preview_length: u8,
    pub starting_level: u8,
}

impl EngineConfig {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            lock_delay_ms: 500,
            max_lock_resets: 15,
            preview_length: 5,
            starting_level: 1,
        }
    }
}

/// The deterministic game engine. Construct once per play session; call
/// `start`, then drive it with `step`/`submit` from a host loop.
pub struct Engine {
    scheduler: Scheduler,
    bus: EventBus,
    seed: u64,
    preview_length: u8,
    starting_level: u8,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scheduler: Scheduler::new(
                config.seed,
                config.lock_delay_ms,
                config.max_lock_resets,
                config.preview_length,
                config.starting_level,
            ),
            bus: EventBus::new(),
            seed: config.seed,
            preview_length: config.preview_length,
            starting_level: config.starting_level,
        }
    }

    /// Registers a handler for every future event. Safe to call before
    /// `start`, and any number of times.
    pub fn subscribe(&mut self, handler: impl FnMut(&Event) + 'static) {
        self.bus.subscribe(handler);
    }

    pub fn start(&mut self) {
        self.scheduler.start(&mut self.bus);
    }

    pub fn pause(&mut self) {
        self.scheduler.pause(&mut self.bus);
    }

    pub fn resume(&mut self) {
        self.scheduler.resume(&mut self.bus);
    }

    /// Returns to `Menu` with fresh playfield/score/bag state, reseeded
    /// with the same construction seed. Existing subscribers stay
    /// subscribed; no events are published by reset itself.
    pub fn reset(&mut self) {
        self.scheduler
            .reset(self.seed, self.preview_length, self.starting_level);
    }

    pub fn step(&mut self, dt_ms: u32) {
        self.scheduler.step(dt_ms, &mut self.bus);
    }

    pub fn submit(&mut self, input: Input) -> InputResult {
        self.scheduler.submit(input, &mut self.bus)
    }

    // --- read-only observers (spec §4.10) --------------------------------

    #[must_use]
    pub fn playfield(&self) -> &Playfield {
        self.scheduler.playfield()
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.scheduler.active_piece()
    }

    #[must_use]
    pub fn preview(&self, n: usize) -> Vec<PieceKind> {
        self.scheduler.preview(n)
    }

    #[must_use]
    pub fn hold(&self) -> Option<PieceKind> {
        self.scheduler.hold()
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.scheduler.score()
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.scheduler.level()
    }

    #[must_use]
    pub fn lines(&self) -> u32 {
        self.scheduler.lines()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.scheduler.status()
    }

    #[must_use]
    pub fn game_time_ms(&self) -> u64 {
        self.scheduler.game_time_ms()
    }

    #[must_use]
    pub fn ghost_position(&self) -> Option<(i32, i32)> {
        self.scheduler.ghost_position()
    }

    /// Fills `snapshot` with the full observable state in one pass,
    /// reusing its buffers rather than allocating fresh ones.
    pub fn snapshot_into(&self, snapshot: &mut GameSnapshot) {
        snapshot.fill_from(&self.scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribing_before_start_still_receives_the_started_event() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut engine = Engine::new(EngineConfig::new(1));
        let started = Rc::new(RefCell::new(false));
        let started_clone = started.clone();
        engine.subscribe(move |event| {
            if matches!(event, Event::Started) {
                *started_clone.borrow_mut() = true;
            }
        });

        engine.start();
        assert!(*started.borrow());
        assert_eq!(engine.status(), GameStatus::Playing);
    }

    #[test]
    fn reset_returns_to_menu_and_replays_the_same_seed() {
        let mut engine = Engine::new(EngineConfig::new(99));
        engine.start();
        let first_kind = engine.active_piece().unwrap().kind;
        engine.submit(Input::HardDrop);

        engine.reset();
        assert_eq!(engine.status(), GameStatus::Menu);
        assert_eq!(engine.score(), 0);

        engine.start();
        let replayed_kind = engine.active_piece().unwrap().kind;
        assert_eq!(first_kind, replayed_kind);
    }

    #[test]
    fn default_config_matches_spec_defaults() {
        let config = EngineConfig::new(42);
        assert_eq!(config.lock_delay_ms, 500);
        assert_eq!(config.max_lock_resets, 15);
        assert_eq!(config.preview_length, 5);
        assert_eq!(config.starting_level, 1);
    }
}
