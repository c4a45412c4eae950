//! Deterministic falling-block game engine core.
//!
//! Playfield, SRS rotation and wall kicks, a 7-bag randomizer, gravity and
//! lock-delay scheduling, T-spin-aware scoring, and an event stream — with
//! no rendering, input devices, audio, persistence, networking, or AI.
//! A host drives the engine with [`Engine::step`] and [`Engine::submit`]
//! and observes it through its read-only getters, the [`Event`] stream, or
//! a batch [`GameSnapshot`].
//!
//! ```
//! use tetris_engine::{Engine, EngineConfig, Input};
//!
//! let mut engine = Engine::new(EngineConfig::new(42));
//! engine.start();
//! engine.step(16);
//! engine.submit(Input::MoveRight);
//! ```

mod board;
mod collision;
mod engine;
mod error;
mod events;
mod pieces;
mod rng;
mod rotation;
mod scheduler;
mod scoring;
mod snapshot;
mod types;

pub use board::Playfield;
pub use engine::{Engine, EngineConfig};
pub use error::{InputResult, RejectReason};
pub use events::Event;
pub use pieces::ActivePiece;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use types::{
    kind_of_cell, Cell, Direction, GameOverReason, GameStatus, Input, LineClearKind, PieceKind,
    RotationState, TSpinKind, BOARD_HEIGHT, BOARD_WIDTH,
};
