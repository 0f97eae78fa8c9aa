use crate::PlayerId;
use super::board::Board;
use super::error::SessionError;
use super::types::{Piece, Position, SessionStatus};
use super::win_detector::check_win;

pub const DEFAULT_DIMENSION: usize = 7;
pub const MIN_DIMENSION: usize = 4;
const MAX_PLAYERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    NextTurn(PlayerId),
    Won(PlayerId),
    Draw,
}

/// One match between two players. The roster survives a reset, match state does not.
#[derive(Debug)]
pub struct ConnectFourSession {
    board: Board,
    players: Vec<PlayerId>,
    turn: Option<PlayerId>,
    move_count: usize,
    last_move: Option<Position>,
    game_over: bool,
    winner: Option<PlayerId>,
}

impl Default for ConnectFourSession {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl ConnectFourSession {
    /// Dimensions below `MIN_DIMENSION` are raised to it.
    pub fn new(dimension: usize) -> Self {
        Self {
            board: Board::new(dimension.max(MIN_DIMENSION)),
            players: Vec::with_capacity(MAX_PLAYERS),
            turn: None,
            move_count: 0,
            last_move: None,
            game_over: false,
            winner: None,
        }
    }

    pub fn join_game(&mut self, player: PlayerId) -> Result<(), SessionError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(SessionError::SlotUnavailable);
        }
        if self.players.contains(&player) {
            return Err(SessionError::DuplicatePlayer(player));
        }

        self.players.push(player);
        if self.players.len() == MAX_PLAYERS {
            self.turn = Some(self.players[0].clone());
        }
        Ok(())
    }

    pub fn leave_game(&mut self, player: &PlayerId) -> Result<(), SessionError> {
        let index = self
            .players
            .iter()
            .position(|p| p == player)
            .ok_or_else(|| SessionError::PlayerNotFound(player.clone()))?;

        self.reset_match();
        self.players.remove(index);
        Ok(())
    }

    /// `column` is 1-based. A rejected move leaves the session untouched.
    pub fn player_turn(&mut self, player: &PlayerId, column: usize) -> Result<MoveOutcome, SessionError> {
        if self.game_over {
            return Err(SessionError::GameOver);
        }
        if self.players.len() < MAX_PLAYERS {
            return Err(SessionError::GameNotStarted);
        }

        let dimension = self.board.dimension();
        if column < 1 || column > dimension {
            return Err(SessionError::IllegalMove { column, dimension });
        }

        if self.turn.as_ref() != Some(player) {
            return Err(SessionError::NotYourTurn);
        }

        let row = self
            .board
            .landing_row(column - 1)
            .ok_or(SessionError::ColumnFull { column })?;
        let position = Position::new(row, column - 1);
        let piece = self.piece_for(player).ok_or(SessionError::NotYourTurn)?;

        self.board.place(position, piece);
        self.last_move = Some(position);
        self.move_count += 1;

        if check_win(&self.board, position, piece) {
            self.game_over = true;
            self.winner = Some(player.clone());
            return Ok(MoveOutcome::Won(player.clone()));
        }

        if self.move_count == dimension * dimension {
            self.game_over = true;
            return Ok(MoveOutcome::Draw);
        }

        let next = self.opponent_of(player).ok_or(SessionError::NotYourTurn)?;
        self.turn = Some(next.clone());
        Ok(MoveOutcome::NextTurn(next))
    }

    fn opponent_of(&self, player: &PlayerId) -> Option<PlayerId> {
        self.players.iter().find(|p| *p != player).cloned()
    }

    fn reset_match(&mut self) {
        self.board.clear();
        self.turn = None;
        self.move_count = 0;
        self.last_move = None;
        self.game_over = false;
        self.winner = None;
    }

    /// First joiner plays `PlayerOne`.
    pub fn piece_for(&self, player: &PlayerId) -> Option<Piece> {
        match self.players.iter().position(|p| p == player)? {
            0 => Some(Piece::PlayerOne),
            _ => Some(Piece::PlayerTwo),
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.game_over {
            SessionStatus::Over
        } else if self.players.len() == MAX_PLAYERS {
            SessionStatus::InProgress
        } else {
            SessionStatus::Waiting
        }
    }

    /// Row 0 is the bottom of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Option<&PlayerId> {
        self.turn.as_ref()
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    pub fn dimension(&self) -> usize {
        self.board.dimension()
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }
}
