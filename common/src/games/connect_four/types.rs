use crate::proto;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Piece {
    pub fn to_proto(&self) -> i32 {
        let state = match self {
            Piece::Empty => proto::CellState::Empty,
            Piece::PlayerOne => proto::CellState::PlayerOne,
            Piece::PlayerTwo => proto::CellState::PlayerTwo,
        };
        state.into()
    }
}

/// Zero-based cell coordinates, row 0 at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn to_proto(&self) -> proto::Position {
        proto::Position {
            row: self.row as u32,
            column: self.column as u32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Waiting,
    InProgress,
    Over,
}

impl SessionStatus {
    pub fn to_proto(&self) -> i32 {
        let status = match self {
            SessionStatus::Waiting => proto::SessionStatus::Waiting,
            SessionStatus::InProgress => proto::SessionStatus::InProgress,
            SessionStatus::Over => proto::SessionStatus::Over,
        };
        status.into()
    }
}
