//! Movement offsets of every piece kind.
//!
//! Tables are immutable statics, so lookups are safe from any thread. Sliding rays are
//! pre-enumerated out to the largest supported board; the board drops whatever lands
//! off its own edge.

use once_cell::sync::Lazy;

use crate::config::MAX_DIMENSION;
use crate::types::{Color, Direction, Offset, PieceType};

/// Furthest a sliding piece can travel on the largest board.
pub const MAX_REACH: i8 = MAX_DIMENSION as i8 - 1;

static KING_STEPS: [Offset; 8] = [
    Offset::new(1, 1),
    Offset::new(-1, -1),
    Offset::new(-1, 1),
    Offset::new(1, -1),
    Offset::new(0, 1),
    Offset::new(0, -1),
    Offset::new(1, 0),
    Offset::new(-1, 0),
];

/// King steps plus the two castle candidates, advertised until the king moves.
static KING_UNMOVED: [Offset; 10] = [
    Offset::new(1, 1),
    Offset::new(-1, -1),
    Offset::new(-1, 1),
    Offset::new(1, -1),
    Offset::new(0, 1),
    Offset::new(0, -1),
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(2, 0),
    Offset::new(-2, 0),
];

static KNIGHT_JUMPS: [Offset; 8] = [
    Offset::new(1, 2),
    Offset::new(-1, 2),
    Offset::new(1, -2),
    Offset::new(-1, -2),
    Offset::new(2, 1),
    Offset::new(-2, 1),
    Offset::new(2, -1),
    Offset::new(-2, -1),
];

static WHITE_PAWN_UNMOVED: [Offset; 4] = [
    Offset::new(0, 1),
    Offset::new(0, 2),
    Offset::new(1, 1),
    Offset::new(-1, 1),
];

static WHITE_PAWN_MOVED: [Offset; 3] = [Offset::new(0, 1), Offset::new(1, 1), Offset::new(-1, 1)];

static BLACK_PAWN_UNMOVED: [Offset; 4] = [
    Offset::new(0, -1),
    Offset::new(0, -2),
    Offset::new(1, -1),
    Offset::new(-1, -1),
];

static BLACK_PAWN_MOVED: [Offset; 3] = [
    Offset::new(0, -1),
    Offset::new(1, -1),
    Offset::new(-1, -1),
];

static ROOK_RAYS: Lazy<Vec<Offset>> = Lazy::new(|| rays(&Direction::ORTHOGONAL));
static BISHOP_RAYS: Lazy<Vec<Offset>> = Lazy::new(|| rays(&Direction::DIAGONAL));
static QUEEN_RAYS: Lazy<Vec<Offset>> = Lazy::new(|| rays(&Direction::ALL));

/// Every offset along each direction, nearest first.
fn rays(directions: &[Direction]) -> Vec<Offset> {
    directions
        .iter()
        .flat_map(|direction| (1..=MAX_REACH).map(move |n| direction.delta().scaled(n)))
        .collect()
}

/// The ordered offsets a piece of the given kind, color and move history may use.
pub fn offsets_for(piece_type: PieceType, color: Color, has_moved: bool) -> &'static [Offset] {
    match (piece_type, color, has_moved) {
        (PieceType::King, _, false) => &KING_UNMOVED,
        (PieceType::King, _, true) => &KING_STEPS,
        (PieceType::Knight, _, _) => &KNIGHT_JUMPS,
        (PieceType::Rook, _, _) => ROOK_RAYS.as_slice(),
        (PieceType::Bishop, _, _) => BISHOP_RAYS.as_slice(),
        (PieceType::Queen, _, _) => QUEEN_RAYS.as_slice(),
        (PieceType::Pawn, Color::White, false) => &WHITE_PAWN_UNMOVED,
        (PieceType::Pawn, Color::White, true) => &WHITE_PAWN_MOVED,
        (PieceType::Pawn, Color::Black, false) => &BLACK_PAWN_UNMOVED,
        (PieceType::Pawn, Color::Black, true) => &BLACK_PAWN_MOVED,
    }
}

/// Whether an offset is one of the king's two-square castle candidates.
pub fn is_castle_offset(offset: Offset) -> bool {
    offset.drow == 0 && offset.dcol.abs() == 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_king_offsets() {
        assert_eq!(offsets_for(PieceType::King, Color::White, true).len(), 8);
        let unmoved = offsets_for(PieceType::King, Color::Black, false);
        assert_eq!(unmoved.len(), 10);
        assert_eq!(unmoved.iter().filter(|o| is_castle_offset(**o)).count(), 2);
    }

    #[test]
    fn test_knight_offsets_are_l_shaped() {
        let jumps = offsets_for(PieceType::Knight, Color::White, false);
        assert_eq!(jumps.len(), 8);
        for o in jumps {
            let (a, b) = (o.dcol.abs(), o.drow.abs());
            assert!((a, b) == (1, 2) || (a, b) == (2, 1));
        }
    }

    #[test]
    fn test_sliding_rays() {
        let rook = offsets_for(PieceType::Rook, Color::White, false);
        let bishop = offsets_for(PieceType::Bishop, Color::White, false);
        let queen = offsets_for(PieceType::Queen, Color::White, false);
        assert_eq!(rook.len(), 4 * MAX_REACH as usize);
        assert_eq!(bishop.len(), 4 * MAX_REACH as usize);
        assert!(rook.iter().all(|o| o.dcol == 0 || o.drow == 0));
        assert!(bishop.iter().all(|o| o.dcol.abs() == o.drow.abs()));

        let union: HashSet<Offset> = rook.iter().chain(bishop.iter()).copied().collect();
        let queen: HashSet<Offset> = queen.iter().copied().collect();
        assert_eq!(union, queen);
    }

    #[test]
    fn test_pawn_offsets_depend_on_color_and_history() {
        let white = offsets_for(PieceType::Pawn, Color::White, false);
        assert_eq!(white.len(), 4);
        assert!(white.contains(&Offset::new(0, 2)));
        assert!(white.iter().all(|o| o.drow > 0));

        let black = offsets_for(PieceType::Pawn, Color::Black, false);
        assert!(black.contains(&Offset::new(0, -2)));
        assert!(black.iter().all(|o| o.drow < 0));

        let moved = offsets_for(PieceType::Pawn, Color::White, true);
        assert_eq!(moved.len(), 3);
        assert!(!moved.contains(&Offset::new(0, 2)));
    }
}
