//! Closed, hand-written error types for the host-facing API.
//!
//! No `thiserror`/`anyhow`: the surface is small and fixed, so a plain
//! enum with a `message()` method (mirroring the teacher's `PlaceError`)
//! is clearer than a derive macro would be.

use std::fmt;

/// Why a submitted input was rejected. Rejecting an input never changes
/// engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The command arrived while status was not `Playing`.
    NotPlaying,
    /// The move/rotate/hard-drop would put the piece into an invalid pose.
    Collision,
    /// Hold was attempted twice for the same piece life.
    AlreadyHeld,
    /// The command arrived before a piece was spawned.
    NoActivePiece,
}

impl RejectReason {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::NotPlaying => "not_playing",
            RejectReason::Collision => "collision",
            RejectReason::AlreadyHeld => "already_held",
            RejectReason::NoActivePiece => "no_active_piece",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            RejectReason::NotPlaying => "command requires the engine to be playing",
            RejectReason::Collision => "move would collide with the playfield or its boundary",
            RejectReason::AlreadyHeld => "hold already used for the current piece",
            RejectReason::NoActivePiece => "no active piece to act on",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for RejectReason {}

/// The outcome of `Engine::submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Ok,
    Rejected(RejectReason),
}

impl InputResult {
    #[must_use]
    pub fn is_ok(self) -> bool {
        matches!(self, InputResult::Ok)
    }
}

/// Invariant violations that can only follow misuse of the crate-internal
/// API (out-of-range cell access, malformed shape/kick data). These never
/// occur on any path reachable from the public API; they panic rather than
/// return a `Result` because there is no sensible recovery.
pub(crate) fn programmer_error(message: &str) -> ! {
    panic!("tetris_engine: programmer error: {message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_reason_has_a_message() {
        assert!(!RejectReason::Collision.message().is_empty());
    }

    #[test]
    fn reject_reason_code_is_a_stable_slug() {
        assert_eq!(RejectReason::NotPlaying.code(), "not_playing");
        assert_eq!(RejectReason::AlreadyHeld.code(), "already_held");
    }

    #[test]
    #[should_panic(expected = "programmer error")]
    fn programmer_error_panics() {
        programmer_error("test");
    }
}
