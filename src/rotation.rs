//! SRS rotation and wall-kick resolution, plus the T-spin corner test used
//! by the scoring path.

use crate::board::Playfield;
use crate::collision::fits;
use crate::pieces::ActivePiece;
use crate::types::{Direction, PieceKind, RotationState, TSpinKind};

/// One (dcol, drow) offset to try after a rotation that doesn't fit in
/// place.
pub type KickOffset = (i8, i8);

/// Five kick offsets tried in order for one rotation transition.
pub type Kicks = [KickOffset; 5];

/// All eight CW/CCW transitions for one piece family, indexed by
/// `kick_index`.
pub type KickTable = [Kicks; 8];

/// O never needs a kick: step 2 of `try_rotate` always succeeds for it.
const O_KICKS: KickTable = [[(0, 0); 5]; 8];

/// Shared by J, L, S, T, Z.
const JLSTZ_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // R0->R1
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],    // R0->R3
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],     // R1->R0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],     // R1->R2
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)], // R2->R1
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],    // R2->R3
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],  // R3->R2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],  // R3->R0
];

/// I has its own, wider reach table.
const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],  // R0->R1
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],  // R0->R3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],  // R1->R0
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],  // R1->R2
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],  // R2->R1
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],  // R2->R3
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],  // R3->R2
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],  // R3->R0
];

fn kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

fn kick_index(from: RotationState, dir: Direction) -> usize {
    match (from, dir) {
        (RotationState::R0, Direction::Cw) => 0,
        (RotationState::R0, Direction::Ccw) => 1,
        (RotationState::R1, Direction::Ccw) => 2,
        (RotationState::R1, Direction::Cw) => 3,
        (RotationState::R2, Direction::Ccw) => 4,
        (RotationState::R2, Direction::Cw) => 5,
        (RotationState::R3, Direction::Ccw) => 6,
        (RotationState::R3, Direction::Cw) => 7,
    }
}

/// A successfully resolved rotation: the new pose, plus the index of the
/// kick offset used to reach it, if any. `None` means the rotation fit in
/// place with no translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatedPose {
    pub origin: (i32, i32),
    pub rotation: RotationState,
    pub kick_index: Option<usize>,
}

/// The rotation failed; all candidate offsets collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateFailed;

/// Resolves a rotation request into a final pose or failure, trying the
/// direct rotation first and then each wall kick in order.
pub fn try_rotate(
    playfield: &Playfield,
    piece: &ActivePiece,
    dir: Direction,
) -> Result<RotatedPose, RotateFailed> {
    let to = piece.rotation.step(dir);
    let direct = piece.with_pose(piece.origin, to);
    if fits(playfield, &direct) {
        return Ok(RotatedPose {
            origin: piece.origin,
            rotation: to,
            kick_index: None,
        });
    }

    let kicks = &kick_table(piece.kind)[kick_index(piece.rotation, dir)];
    for (index, &(dcol, drow)) in kicks.iter().enumerate() {
        let origin = (piece.origin.0 + drow as i32, piece.origin.1 + dcol as i32);
        let candidate = piece.with_pose(origin, to);
        if fits(playfield, &candidate) {
            return Ok(RotatedPose {
                origin,
                rotation: to,
                kick_index: Some(index),
            });
        }
    }

    Err(RotateFailed)
}

/// The four cells diagonally adjacent to a T piece's centre, relative to
/// its origin. Constant across rotation states: the SRS pivot always sits
/// at local (1, 1).
const T_CORNERS: [(i32, i32); 4] = [(0, 0), (0, 2), (2, 0), (2, 2)];

/// The two corners "in front of" the T's flat side, per rotation.
fn t_front_corners(rotation: RotationState) -> [(i32, i32); 2] {
    match rotation {
        RotationState::R0 => [(0, 0), (0, 2)],
        RotationState::R1 => [(0, 2), (2, 2)],
        RotationState::R2 => [(2, 0), (2, 2)],
        RotationState::R3 => [(0, 0), (2, 0)],
    }
}

/// Classifies a T-spin on lock, per §4.6: requires the lock to be the
/// result of a rotation that needed a kick (`kick_index.is_some()`), then
/// inspects corner occupancy.
#[must_use]
pub fn classify_tspin(
    playfield: &Playfield,
    piece: &ActivePiece,
    kick_index: Option<usize>,
) -> TSpinKind {
    if piece.kind != PieceKind::T || kick_index.is_none() {
        return TSpinKind::None;
    }

    let occupied = |offset: (i32, i32)| {
        playfield.is_occupied(piece.origin.0 + offset.0, piece.origin.1 + offset.1)
    };

    let filled = T_CORNERS.iter().filter(|&&c| occupied(c)).count();
    if filled < 3 {
        return TSpinKind::None;
    }

    let front = t_front_corners(piece.rotation);
    let front_filled = front.iter().filter(|&&c| occupied(c)).count();
    if front_filled == 2 {
        TSpinKind::Proper
    } else {
        TSpinKind::Mini
    }
}
