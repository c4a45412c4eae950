//! `GameSnapshot`: a caller-owned, reusable batch read of engine state.
//! Supplemental to the individual observers on `Engine` (§4.10); grounded
//! on the teacher's `core::snapshot` module, generalized from a fixed
//! `[PieceKind; 5]` preview to the engine's configurable preview length.

use crate::board::Playfield;
use crate::pieces::ActivePiece;
use crate::scheduler::Scheduler;
use crate::types::{GameStatus, PieceKind};

/// A snapshot of the active piece's pose, decoupled from `ActivePiece`'s
/// own per-life bookkeeping fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub origin: (i32, i32),
    pub rotation: crate::types::RotationState,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(piece: &ActivePiece) -> Self {
        Self {
            kind: piece.kind,
            origin: piece.origin,
            rotation: piece.rotation,
        }
    }
}

/// A single-pass read of everything `Engine`'s observers expose. Reusable
/// across frames: `preview` keeps its allocation and is simply
/// truncated/refilled each call, so steady-state sampling does not
/// allocate once the queue has reached its configured length.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub playfield: Playfield,
    pub active: Option<ActiveSnapshot>,
    pub ghost_position: Option<(i32, i32)>,
    pub hold: Option<PieceKind>,
    pub preview: Vec<PieceKind>,
    pub status: GameStatus,
    pub score: u64,
    pub level: u8,
    pub lines: u32,
    pub game_time_ms: u64,
}

impl GameSnapshot {
    /// An empty snapshot with `preview` pre-sized for `preview_length`
    /// entries, so the first `fill_from` call doesn't need to grow it.
    #[must_use]
    pub fn new(preview_length: usize) -> Self {
        Self {
            playfield: Playfield::new(),
            active: None,
            ghost_position: None,
            hold: None,
            preview: Vec::with_capacity(preview_length),
            status: GameStatus::Menu,
            score: 0,
            level: 1,
            lines: 0,
            game_time_ms: 0,
        }
    }

    pub(crate) fn fill_from(&mut self, scheduler: &Scheduler) {
        self.playfield = scheduler.playfield().clone();
        self.active = scheduler.active_piece().map(ActiveSnapshot::from);
        self.ghost_position = scheduler.ghost_position();
        self.hold = scheduler.hold();

        self.preview.clear();
        scheduler.fill_preview(&mut self.preview);

        self.status = scheduler.status();
        self.score = scheduler.score();
        self.level = scheduler.level();
        self.lines = scheduler.lines();
        self.game_time_ms = scheduler.game_time_ms();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;

    #[test]
    fn fill_from_reports_active_piece_and_preview_length() {
        let mut scheduler = Scheduler::new(1, 500, 15, 5, 1);
        let mut bus = EventBus::new();
        scheduler.start(&mut bus);

        let mut snapshot = GameSnapshot::new(5);
        snapshot.fill_from(&scheduler);

        assert!(snapshot.active.is_some());
        assert_eq!(snapshot.preview.len(), 5);
        assert_eq!(snapshot.status, GameStatus::Playing);
    }

    #[test]
    fn repeated_fill_from_does_not_grow_preview_capacity() {
        let mut scheduler = Scheduler::new(2, 500, 15, 3, 1);
        let mut bus = EventBus::new();
        scheduler.start(&mut bus);

        let mut snapshot = GameSnapshot::new(3);
        snapshot.fill_from(&scheduler);
        let capacity_after_first = snapshot.preview.capacity();

        for _ in 0..10 {
            scheduler.submit(crate::types::Input::HardDrop, &mut bus);
            snapshot.fill_from(&scheduler);
        }
        assert_eq!(snapshot.preview.len(), 3);
        assert!(snapshot.preview.capacity() >= capacity_after_first);
    }
}
