//! Integration tests for move legality on the square graph
//!
//! Run with: cargo test --test legality_tests

use std::collections::BTreeSet;

use graph_chess::board::Board;
use graph_chess::config::BoardConfig;
use graph_chess::error::ChessError;
use graph_chess::types::{Color, PieceType, SquareId};
use pretty_assertions::assert_eq;

fn board_with(layout: &[(char, &str)]) -> Board {
    Board::from_layout(BoardConfig::default(), layout.iter().copied()).unwrap()
}

fn names(board: &Board, squares: &[SquareId]) -> BTreeSet<String> {
    squares
        .iter()
        .map(|id| board.square(*id).name().to_string())
        .collect()
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Occupant of every square, as piece letters.
fn snapshot(board: &Board) -> Vec<Option<char>> {
    board
        .squares()
        .map(|(id, _)| board.piece_at(id).map(|p| p.to_letter()))
        .collect()
}

#[test]
fn test_destinations_never_friendly_or_off_board() {
    let mut board = Board::standard().unwrap();
    for (from, to, player) in [
        ("e2", "e4", Color::White),
        ("d7", "d5", Color::Black),
        ("e4", "d5", Color::White),
        ("d8", "d5", Color::Black),
        ("b1", "c3", Color::White),
    ] {
        board.make_move(from, to, player).unwrap();
    }

    for (id, piece) in board.pieces() {
        for square in board.legal_destinations(id).unwrap() {
            assert!(board.on_board(board.square(square).coord()));
            assert!(board
                .piece_at(square)
                .map_or(true, |other| other.color != piece.color));
        }
    }
}

#[test]
fn test_sliders_on_empty_board_stay_on_board() {
    let config = BoardConfig::new(5, 3).unwrap();
    for (_, square) in Board::new(config).squares() {
        let name = square.name().to_string();
        let board = Board::from_layout(config, [('R', name.as_str())]).unwrap();
        let rook = board.legal_destinations_from(&name).unwrap();
        // every other square of its row and column
        assert_eq!(rook.len(), (5 - 1) + (3 - 1));

        let board = Board::from_layout(config, [('b', name.as_str())]).unwrap();
        for id in board.legal_destinations_from(&name).unwrap() {
            let (a, b) = (square.coord(), board.square(id).coord());
            assert_eq!(a.col.abs_diff(b.col), a.row.abs_diff(b.row));
        }
    }
}

#[test]
fn test_knight_ignores_intermediate_pieces() {
    let alone = board_with(&[('N', "d4")]);
    let crowded = board_with(&[
        ('N', "d4"),
        ('P', "c4"),
        ('p', "e4"),
        ('P', "d3"),
        ('p', "d5"),
        ('P', "c3"),
        ('p', "e5"),
        ('p', "d6"),
        ('P', "b4"),
    ]);
    assert_eq!(
        names(&alone, &alone.legal_destinations_from("d4").unwrap()),
        names(&crowded, &crowded.legal_destinations_from("d4").unwrap())
    );
}

#[test]
fn test_knight_on_b1() {
    let board = board_with(&[('N', "b1"), ('p', "a2"), ('p', "a3"), ('p', "c3")]);
    assert_eq!(
        names(&board, &board.legal_destinations_from("b1").unwrap()),
        set(&["a3", "c3", "d2"])
    );

    let board = board_with(&[('N', "b1"), ('P', "a2"), ('P', "a3"), ('P', "c3")]);
    assert_eq!(
        names(&board, &board.legal_destinations_from("b1").unwrap()),
        set(&["d2"])
    );
}

#[test]
fn test_pawn_double_step_from_start() {
    let mut board = Board::standard().unwrap();
    assert_eq!(
        names(&board, &board.legal_destinations_from("e2").unwrap()),
        set(&["e3", "e4"])
    );
    assert_eq!(board.piece_on("e2").unwrap().offsets().len(), 4);

    board.make_move("e2", "e4", Color::White).unwrap();
    let pawn = board.piece_on("e4").unwrap();
    assert!(pawn.has_moved);
    assert_eq!(pawn.offsets().len(), 3);
    assert_eq!(
        names(&board, &board.legal_destinations_from("e4").unwrap()),
        set(&["e5"])
    );

    board.make_move("a7", "a6", Color::Black).unwrap();
    board.make_move("e4", "e5", Color::White).unwrap();
    assert_eq!(board.piece_on("e5").unwrap().offsets().len(), 3);
}

#[test]
fn test_rook_blocked_by_own_pawn() {
    let board = Board::standard().unwrap();
    assert_eq!(
        board.validate_move("a1", "a3", Color::White),
        Err(ChessError::PathBlocked {
            from: "a1".to_string(),
            to: "a3".to_string(),
            blocker: "a2".to_string(),
        })
    );
    assert!(board.legal_destinations_from("a1").unwrap().is_empty());
}

#[test]
fn test_bishop_cannot_land_on_own_piece() {
    let board = board_with(&[('b', "c8"), ('n', "e6"), ('P', "a6")]);
    let dests = names(&board, &board.legal_destinations_from("c8").unwrap());
    assert!(!dests.contains("e6"));
    assert!(dests.contains("d7"));
    assert!(dests.contains("a6"));
    assert!(matches!(
        board.validate_move("c8", "e6", Color::Black),
        Err(ChessError::IllegalMove { .. })
    ));
}

#[test]
fn test_king_cannot_move_into_check() {
    let board = board_with(&[('K', "e1"), ('r', "a2"), ('k', "h8")]);
    assert_eq!(
        board.validate_move("e1", "e2", Color::White),
        Err(ChessError::MoveIntoCheck("e2".to_string()))
    );
    assert!(board.validate_move("e1", "f1", Color::White).is_ok());
}

#[test]
fn test_threat_matches_opposing_destinations() {
    // no kings: every opposing destination set is the plain legal one
    let mut board = board_with(&[
        ('Q', "d1"),
        ('R', "a1"),
        ('B', "c4"),
        ('N', "g1"),
        ('P', "e2"),
        ('P', "f3"),
        ('q', "d8"),
        ('r', "h8"),
        ('b', "b7"),
        ('n', "c6"),
        ('p', "e5"),
        ('p', "g7"),
    ]);
    board.make_move("e2", "e4", Color::White).unwrap();

    for defender in [Color::White, Color::Black] {
        let reachable: BTreeSet<SquareId> = board
            .pieces_of(defender.other_color())
            .flat_map(|(id, _)| board.legal_destinations(id).unwrap())
            .collect();
        for (square, _) in board.squares() {
            assert_eq!(
                board.is_threatened(square, defender),
                reachable.contains(&square),
                "{} for {}",
                board.square(square).name(),
                defender.to_human()
            );
        }
    }
}

#[test]
fn test_commit_changes_only_source_and_destination() {
    let mut board = Board::standard().unwrap();
    let before = snapshot(&board);
    let mv = board.validate_move("g1", "f3", Color::White).unwrap();
    let knight = mv.piece();
    let record = board.commit(mv).unwrap();

    let after = snapshot(&board);
    let changed: Vec<usize> = (0..before.len()).filter(|i| before[*i] != after[*i]).collect();
    let mut expected = vec![record.from.index(), record.to.index()];
    expected.sort();
    assert_eq!(changed, expected);
    assert_eq!(after[record.from.index()], None);
    assert_eq!(after[record.to.index()], Some('N'));
    assert_eq!(board.piece(knight).unwrap().square, record.to);
    assert_eq!(board.square(record.to).occupant(), Some(knight));
}

#[test]
fn test_short_game() {
    let mut board = Board::standard().unwrap();
    let moves = [
        ("e2", "e4", Color::White),
        ("e7", "e5", Color::Black),
        ("g1", "f3", Color::White),
        ("b8", "c6", Color::Black),
        ("f1", "c4", Color::White),
        ("g8", "f6", Color::Black),
        ("e1", "g1", Color::White),
        ("f6", "e4", Color::Black),
    ];
    for (from, to, player) in moves {
        board.make_move(from, to, player).unwrap();
    }
    assert_eq!(board.piece_on("g1").unwrap().piece_type, PieceType::King);
    assert_eq!(board.piece_on("f1").unwrap().piece_type, PieceType::Rook);
    assert_eq!(board.piece_on("e4").unwrap().color, Color::Black);
    assert_eq!(board.captured().len(), 1);
    assert_eq!(board.pieces().count(), 31);
}

#[test]
fn test_small_board() {
    let config = BoardConfig::new(4, 5).unwrap();
    let mut board = Board::from_layout(config, [('K', "a1"), ('Q', "d1"), ('k', "d5")]).unwrap();
    assert_eq!(board.square_count(), 20);
    assert!(board.square_named("e1").is_none());
    assert_eq!(
        board.validate_move("d1", "e1", Color::White),
        Err(ChessError::InvalidTargetPosition("e1".to_string()))
    );
    board.make_move("d1", "d4", Color::White).unwrap();
    let king_moves = names(&board, &board.legal_destinations_from("d5").unwrap());
    // the queen covers c4 and c5, and nothing defends her on d4
    assert_eq!(king_moves, set(&["d4"]));
}
