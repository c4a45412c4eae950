//! Pure boundary/occupancy tests between an `ActivePiece` pose and the
//! `Playfield`. No mutation, no allocation.

use crate::board::Playfield;
use crate::pieces::ActivePiece;

/// True iff every absolute cell of `piece` is inside the grid and empty.
#[must_use]
pub fn fits(playfield: &Playfield, piece: &ActivePiece) -> bool {
    piece
        .absolute_cells()
        .iter()
        .all(|&(row, col)| !playfield.is_occupied(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn spawn_pose_fits_empty_board() {
        let board = Playfield::new();
        let piece = ActivePiece::spawn(PieceKind::T, 500);
        assert!(fits(&board, &piece));
    }

    #[test]
    fn piece_does_not_fit_past_left_wall() {
        let board = Playfield::new();
        let piece = ActivePiece::spawn(PieceKind::I, 500).translated(0, -10);
        assert!(!fits(&board, &piece));
    }

    #[test]
    fn piece_does_not_fit_into_occupied_cell() {
        let mut board = Playfield::new();
        board.place(&[(0, 3), (0, 4), (0, 5), (0, 6)], 1);
        let piece = ActivePiece::spawn(PieceKind::I, 500);
        assert!(!fits(&board, &piece));
    }
}
