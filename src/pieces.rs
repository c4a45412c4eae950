//! Immutable shape tables for the seven tetrominoes, and the `ActivePiece`
//! that combines a shape reference with a live position.

use crate::types::{PieceKind, RotationState, SPAWN_ORIGIN};

/// A single occupied-cell offset, (dr, dc), relative to a piece's origin.
pub type Offset = (i8, i8);

/// Four offsets describing one (kind, rotation) shape.
pub type Shape = [Offset; 4];

/// Looks up the precomputed shape for `kind` at `rotation`. Spawn shapes and
/// their rotations follow the modern guideline: I horizontal on its second
/// row, O a 2×2, T/S/Z/J/L each within a 3×3 footprint.
#[must_use]
pub fn shape(kind: PieceKind, rotation: RotationState) -> Shape {
    match kind {
        PieceKind::I => shape_i(rotation),
        PieceKind::O => shape_o(rotation),
        PieceKind::T => shape_t(rotation),
        PieceKind::S => shape_s(rotation),
        PieceKind::Z => shape_z(rotation),
        PieceKind::J => shape_j(rotation),
        PieceKind::L => shape_l(rotation),
    }
}

fn shape_i(rotation: RotationState) -> Shape {
    match rotation {
        RotationState::R0 => [(1, 0), (1, 1), (1, 2), (1, 3)],
        RotationState::R1 => [(0, 2), (1, 2), (2, 2), (3, 2)],
        RotationState::R2 => [(2, 0), (2, 1), (2, 2), (2, 3)],
        RotationState::R3 => [(0, 1), (1, 1), (2, 1), (3, 1)],
    }
}

fn shape_o(_rotation: RotationState) -> Shape {
    // Identical in every rotation state; O never observably rotates.
    [(0, 1), (0, 2), (1, 1), (1, 2)]
}

fn shape_t(rotation: RotationState) -> Shape {
    match rotation {
        RotationState::R0 => [(0, 1), (1, 0), (1, 1), (1, 2)],
        RotationState::R1 => [(0, 1), (1, 1), (1, 2), (2, 1)],
        RotationState::R2 => [(1, 0), (1, 1), (1, 2), (2, 1)],
        RotationState::R3 => [(0, 1), (1, 0), (1, 1), (2, 1)],
    }
}

fn shape_s(rotation: RotationState) -> Shape {
    match rotation {
        RotationState::R0 => [(0, 1), (0, 2), (1, 0), (1, 1)],
        RotationState::R1 => [(0, 1), (1, 1), (1, 2), (2, 2)],
        RotationState::R2 => [(1, 1), (1, 2), (2, 0), (2, 1)],
        RotationState::R3 => [(0, 0), (1, 0), (1, 1), (2, 1)],
    }
}

fn shape_z(rotation: RotationState) -> Shape {
    match rotation {
        RotationState::R0 => [(0, 0), (0, 1), (1, 1), (1, 2)],
        RotationState::R1 => [(0, 2), (1, 1), (1, 2), (2, 1)],
        RotationState::R2 => [(1, 0), (1, 1), (2, 1), (2, 2)],
        RotationState::R3 => [(0, 1), (1, 0), (1, 1), (2, 0)],
    }
}

fn shape_j(rotation: RotationState) -> Shape {
    match rotation {
        RotationState::R0 => [(0, 0), (1, 0), (1, 1), (1, 2)],
        RotationState::R1 => [(0, 1), (0, 2), (1, 1), (2, 1)],
        RotationState::R2 => [(1, 0), (1, 1), (1, 2), (2, 2)],
        RotationState::R3 => [(0, 1), (1, 1), (2, 0), (2, 1)],
    }
}

fn shape_l(rotation: RotationState) -> Shape {
    match rotation {
        RotationState::R0 => [(0, 2), (1, 0), (1, 1), (1, 2)],
        RotationState::R1 => [(0, 1), (1, 1), (2, 1), (2, 2)],
        RotationState::R2 => [(1, 0), (1, 1), (1, 2), (2, 0)],
        RotationState::R3 => [(0, 0), (0, 1), (1, 1), (2, 1)],
    }
}

/// A live piece: shape reference plus position, rotation, and the per-life
/// bookkeeping the scheduler needs to apply lock-delay and hold rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub origin: (i32, i32),
    pub rotation: RotationState,
    /// Lock-delay budget in effect for this piece's life, in ms.
    pub lock_delay_ms: u32,
    /// Number of times the lock timer has been reset by a successful
    /// grounded move or rotation.
    pub lock_resets_used: u8,
    pub has_held_this_turn: bool,
    /// Row this piece spawned at, for reference by hosts/tests.
    pub spawn_row: i32,
}

impl ActivePiece {
    #[must_use]
    pub fn spawn(kind: PieceKind, lock_delay_ms: u32) -> Self {
        Self {
            kind,
            origin: SPAWN_ORIGIN,
            rotation: RotationState::R0,
            lock_delay_ms,
            lock_resets_used: 0,
            has_held_this_turn: false,
            spawn_row: SPAWN_ORIGIN.0,
        }
    }

    /// The four absolute `(row, col)` cells this piece currently occupies.
    #[must_use]
    pub fn absolute_cells(&self) -> [(i32, i32); 4] {
        let shape = shape(self.kind, self.rotation);
        let mut cells = [(0, 0); 4];
        for (index, offset) in shape.iter().enumerate() {
            cells[index] = (
                self.origin.0 + offset.0 as i32,
                self.origin.1 + offset.1 as i32,
            );
        }
        cells
    }

    /// A copy of this piece translated by `(drow, dcol)`.
    #[must_use]
    pub fn translated(&self, drow: i32, dcol: i32) -> Self {
        Self {
            origin: (self.origin.0 + drow, self.origin.1 + dcol),
            ..*self
        }
    }

    /// A copy of this piece with a new rotation state and origin, as
    /// resolved by `RotationSystem::try_rotate`.
    #[must_use]
    pub fn with_pose(&self, origin: (i32, i32), rotation: RotationState) -> Self {
        Self {
            origin,
            rotation,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_four_cells_in_bounds_of_its_box() {
        for &kind in &PieceKind::ALL {
            for &rotation in &[
                RotationState::R0,
                RotationState::R1,
                RotationState::R2,
                RotationState::R3,
            ] {
                let cells = shape(kind, rotation);
                assert_eq!(cells.len(), 4);
                for (dr, dc) in cells {
                    assert!((0..4).contains(&dr));
                    assert!((0..4).contains(&dc));
                }
            }
        }
    }

    #[test]
    fn o_piece_shape_is_rotation_invariant() {
        let r0 = shape(PieceKind::O, RotationState::R0);
        let r1 = shape(PieceKind::O, RotationState::R1);
        let r2 = shape(PieceKind::O, RotationState::R2);
        let r3 = shape(PieceKind::O, RotationState::R3);
        assert_eq!(r0, r1);
        assert_eq!(r1, r2);
        assert_eq!(r2, r3);
    }

    #[test]
    fn spawn_places_piece_fully_on_board() {
        let piece = ActivePiece::spawn(PieceKind::I, 500);
        for (row, col) in piece.absolute_cells() {
            assert!(row >= 0 && col >= 0);
        }
    }

    #[test]
    fn translated_moves_origin_only() {
        let piece = ActivePiece::spawn(PieceKind::T, 500);
        let moved = piece.translated(1, -1);
        assert_eq!(moved.origin, (piece.origin.0 + 1, piece.origin.1 - 1));
        assert_eq!(moved.rotation, piece.rotation);
    }
}
