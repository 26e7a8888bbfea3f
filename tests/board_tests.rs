//! Board tests - grid access, row clearing and checked commits

use matrix_tetris::core::{ActivePiece, Board, Footprint};
use matrix_tetris::types::{Cell, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};

const A: Cell = Cell::Filled(ShapeId(0));

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.cells().len(), 64 * 32);
    assert!(board.cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i16, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i16), None);
    assert_eq!(board.get(63, 31), Some(Cell::Empty));
}

#[test]
fn test_board_blocked_includes_walls() {
    let mut board = Board::with_size(4, 4);
    board.set(2, 1, A);

    assert!(board.is_blocked(2, 1));
    assert!(board.is_blocked(-1, 0));
    assert!(board.is_blocked(4, 0));
    assert!(board.is_blocked(0, 4));
    assert!(!board.is_blocked(3, 3));

    // Walls are blocked, but nothing is "occupied" out there.
    assert!(!board.is_occupied(-1, 0));
}

#[test]
fn test_clear_full_rows_none_full() {
    let mut board = Board::from_rows(&[
        "....", //
        "1...", //
        "11.1",
    ]);
    let before = board.clone();
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_full_rows_keeps_order_and_backfills_top() {
    let mut board = Board::from_rows(&[
        "1...", //
        "2222", //
        ".3..", //
        "4444", //
        "..5.",
    ]);
    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(
        board.to_rows(),
        vec!["....", "....", "1...", ".3..", "..5."]
    );
    assert_eq!(board.height(), 5);
}

#[test]
fn test_clear_full_rows_whole_board() {
    let mut board = Board::from_rows(&["12", "34"]);
    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(board.filled_count(), 0);
}

/// Filling the last gap of a row through a checked commit, then clearing,
/// moves that row's capacity to the top and leaves the rest alone.
#[test]
fn test_commit_then_clear_relocates_row() {
    let mut board = Board::from_rows(&[
        "......", //
        "..1...", //
        "00000.", //
        ".1....",
    ]);

    let piece = ActivePiece::new(ShapeId(2), Footprint::solid(1, 1), 5, 2);
    let placement = piece.place(&board).expect("gap is free");
    board.commit(placement);
    assert!(board.is_row_full(2));

    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(
        board.to_rows(),
        vec!["......", "......", "..1...", ".1...."]
    );
    assert_eq!(board.row(0), Some(&[Cell::Empty; 6][..]));
}

#[test]
fn test_place_refuses_overlap() {
    let board = Board::from_rows(&["..", ".1"]);
    let piece = ActivePiece::new(ShapeId(0), Footprint::solid(2, 2), 0, 0);
    let back = piece.place(&board).unwrap_err();
    assert_eq!(back, piece);
}

#[test]
fn test_commit_writes_shape_id() {
    let mut board = Board::with_size(4, 4);
    let piece = ActivePiece::new(ShapeId(6), Footprint::solid(2, 1), 3, 2);
    board.commit(piece.place(&board).unwrap());

    assert_eq!(board.get(3, 2), Some(Cell::Filled(ShapeId(6))));
    assert_eq!(board.get(3, 3), Some(Cell::Filled(ShapeId(6))));
    assert_eq!(board.filled_count(), 2);
}
