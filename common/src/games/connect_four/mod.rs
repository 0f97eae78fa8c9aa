mod board;
mod error;
mod session;
mod types;
mod win_detector;

pub use board::Board;
pub use error::SessionError;
pub use session::{ConnectFourSession, DEFAULT_DIMENSION, MIN_DIMENSION, MoveOutcome};
pub use types::{Piece, Position, SessionStatus};
pub use win_detector::{WIN_LENGTH, check_win};
