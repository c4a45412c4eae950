//! Core types shared across the engine.
//!
//! Pure data types with no dependency on the rest of the crate: piece kinds,
//! rotation states, board dimensions, and the host-facing input/event
//! vocabulary. Row/column conventions are fixed here once so every other
//! module agrees: row grows downward, row 0 is the top of the playfield,
//! column 0 is the left edge.

/// Playfield width in columns.
pub const BOARD_WIDTH: usize = 10;
/// Playfield height in rows.
pub const BOARD_HEIGHT: usize = 20;

/// Spawn origin (row, col) shared by every piece kind; see `pieces::shape`
/// for why a single origin works for all seven shapes.
pub const SPAWN_ORIGIN: (i32, i32) = (0, 3);

/// A board cell. 0 is empty, 1..=7 identifies the locked piece kind.
pub type Cell = u8;

/// Maps a raw cell tag back to the piece kind that locked it, or `None` for
/// an empty cell. Rendering-only concern; the engine itself never needs the
/// inverse mapping.
#[must_use]
pub fn kind_of_cell(cell: Cell) -> Option<PieceKind> {
    PieceKind::from_u8(cell)
}

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Cell tag used when this piece locks onto the playfield (1..=7).
    #[must_use]
    pub fn as_cell(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    #[must_use]
    pub fn from_u8(cell: Cell) -> Option<Self> {
        match cell {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Rotation states, named by clockwise steps from spawn (R0 is spawn).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationState {
    R0,
    R1,
    R2,
    R3,
}

/// Rotation direction requested by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Cw,
    Ccw,
}

impl RotationState {
    #[must_use]
    pub fn step(self, dir: Direction) -> Self {
        match (self, dir) {
            (RotationState::R0, Direction::Cw) => RotationState::R1,
            (RotationState::R1, Direction::Cw) => RotationState::R2,
            (RotationState::R2, Direction::Cw) => RotationState::R3,
            (RotationState::R3, Direction::Cw) => RotationState::R0,
            (RotationState::R0, Direction::Ccw) => RotationState::R3,
            (RotationState::R3, Direction::Ccw) => RotationState::R2,
            (RotationState::R2, Direction::Ccw) => RotationState::R1,
            (RotationState::R1, Direction::Ccw) => RotationState::R0,
        }
    }
}

/// T-spin classification for a lock, per the corner test in `rotation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TSpinKind {
    None,
    Mini,
    Proper,
}

/// Line-clear category by row count (1..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClearKind {
    Single,
    Double,
    Triple,
    Tetris,
}

impl LineClearKind {
    #[must_use]
    pub fn from_row_count(rows: usize) -> Option<Self> {
        match rows {
            1 => Some(LineClearKind::Single),
            2 => Some(LineClearKind::Double),
            3 => Some(LineClearKind::Triple),
            4 => Some(LineClearKind::Tetris),
            _ => None,
        }
    }
}

/// Overall game state machine (spec §3 `GameStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    LockOut,
    BlockOut,
}

/// Host input commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    MoveLeft,
    MoveRight,
    SoftDropOne,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
}
