use crate::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Game in progress: both player slots are taken")]
    SlotUnavailable,

    #[error("Player {0} already in game")]
    DuplicatePlayer(PlayerId),

    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("Game over")]
    GameOver,

    #[error("Game not started")]
    GameNotStarted,

    #[error("Illegal move: column {column} is outside 1..={dimension}")]
    IllegalMove { column: usize, dimension: usize },

    #[error("Illegal move: column {column} is full")]
    ColumnFull { column: usize },

    #[error("Not your turn")]
    NotYourTurn,
}

impl SessionError {
    /// Stable variant name, independent of the display message.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::SlotUnavailable => "SlotUnavailable",
            SessionError::DuplicatePlayer(_) => "DuplicatePlayer",
            SessionError::PlayerNotFound(_) => "PlayerNotFound",
            SessionError::GameOver => "GameOver",
            SessionError::GameNotStarted => "GameNotStarted",
            SessionError::IllegalMove { .. } => "IllegalMove",
            SessionError::ColumnFull { .. } => "ColumnFull",
            SessionError::NotYourTurn => "NotYourTurn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::DuplicatePlayer(PlayerId::new("alice"));
        assert_eq!(err.to_string(), "Player alice already in game");

        let err = SessionError::IllegalMove { column: 9, dimension: 7 };
        assert_eq!(err.to_string(), "Illegal move: column 9 is outside 1..=7");

        let err = SessionError::ColumnFull { column: 3 };
        assert_eq!(err.to_string(), "Illegal move: column 3 is full");
    }

    #[test]
    fn test_error_kind_names() {
        assert_eq!(SessionError::SlotUnavailable.kind(), "SlotUnavailable");
        assert_eq!(SessionError::PlayerNotFound(PlayerId::new("bob")).kind(), "PlayerNotFound");
        assert_eq!(SessionError::ColumnFull { column: 1 }.kind(), "ColumnFull");
        assert_eq!(SessionError::NotYourTurn.kind(), "NotYourTurn");
    }
}
