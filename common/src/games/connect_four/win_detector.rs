use super::board::Board;
use super::types::{Piece, Position};

pub const WIN_LENGTH: usize = 4;

/// Row/column steps of the four axes: horizontal, vertical, main diagonal, anti-diagonal.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Checks only the windows that contain `position`, so the cost does not grow with the board.
pub fn check_win(board: &Board, position: Position, piece: Piece) -> bool {
    if piece == Piece::Empty {
        return false;
    }

    AXES.iter()
        .any(|&(row_step, column_step)| check_axis(board, position, piece, row_step, column_step))
}

fn check_axis(board: &Board, position: Position, piece: Piece, row_step: isize, column_step: isize) -> bool {
    let row = position.row as isize;
    let column = position.column as isize;

    (0..WIN_LENGTH as isize).any(|offset| {
        let start_row = row - offset * row_step;
        let start_column = column - offset * column_step;
        window_matches(board, start_row, start_column, row_step, column_step, piece)
    })
}

fn window_matches(
    board: &Board,
    start_row: isize,
    start_column: isize,
    row_step: isize,
    column_step: isize,
    piece: Piece,
) -> bool {
    (0..WIN_LENGTH as isize).all(|i| {
        board.cell_at(start_row + i * row_step, start_column + i * column_step) == Some(piece)
    })
}
