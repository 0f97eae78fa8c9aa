use super::types::{Piece, Position};

/// Square grid stored bottom row first, so `cells[0]` is where pieces land first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Vec<Piece>>,
    dimension: usize,
}

impl Board {
    pub fn new(dimension: usize) -> Self {
        Self {
            cells: vec![vec![Piece::Empty; dimension]; dimension],
            dimension,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, position: Position) -> Piece {
        self.cells[position.row][position.column]
    }

    /// Signed lookup used by the win detector; `None` outside the board.
    pub fn cell_at(&self, row: isize, column: isize) -> Option<Piece> {
        if row < 0 || column < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(column as usize))
            .copied()
    }

    /// Lowest empty row in a zero-based column, `None` when the column is full.
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        (0..self.dimension).find(|&row| self.cells[row][column] == Piece::Empty)
    }

    pub fn place(&mut self, position: Position, piece: Piece) {
        self.cells[position.row][position.column] = piece;
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(Piece::Empty);
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&piece| piece != Piece::Empty)
            .count()
    }

    pub fn rows(&self) -> &[Vec<Piece>] {
        &self.cells
    }

    pub fn to_proto_rows(&self) -> Vec<crate::proto::BoardRow> {
        self.cells
            .iter()
            .map(|row| crate::proto::BoardRow {
                cells: row.iter().map(|piece| piece.to_proto()).collect(),
            })
            .collect()
    }
}
