use std::sync::Arc;
use tokio::sync::Mutex;
use common::games::connect_four::{Board, ConnectFourSession, MoveOutcome, Position, SessionError, SessionStatus};
use common::{PlayerId, log};

/// Everything a polling client needs, read under one lock acquisition.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub board: Board,
    pub players: Vec<PlayerId>,
    pub turn: Option<PlayerId>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub dimension: usize,
    pub move_count: usize,
    pub last_move: Option<Position>,
    pub status: SessionStatus,
}

/// Shared handle to the single game session; every call holds the lock until it returns.
#[derive(Debug, Clone)]
pub struct SessionManager {
    session: Arc<Mutex<ConnectFourSession>>,
}

impl SessionManager {
    pub fn new(session: ConnectFourSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn join_game(&self, player: PlayerId) -> Result<(), SessionError> {
        let mut session = self.session.lock().await;
        session.join_game(player.clone())?;

        log!("Player {} joined the game", player);
        if let Some(turn) = session.turn() {
            log!("Game started: {} vs {}, {} moves first", session.players()[0], session.players()[1], turn);
        }
        Ok(())
    }

    pub async fn leave_game(&self, player: &PlayerId) -> Result<(), SessionError> {
        let mut session = self.session.lock().await;
        session.leave_game(player)?;

        log!("Player {} left the game, match reset", player);
        Ok(())
    }

    pub async fn player_turn(&self, player: &PlayerId, column: usize) -> Result<MoveOutcome, SessionError> {
        let mut session = self.session.lock().await;
        let outcome = session.player_turn(player, column)?;

        log!("Player {} moved to column {}", player, column);
        match &outcome {
            MoveOutcome::NextTurn(next) => log!("Player {} turn", next),
            MoveOutcome::Won(winner) => log!("Player {} won after {} moves", winner, session.move_count()),
            MoveOutcome::Draw => log!("Game over: board full, draw"),
        }
        Ok(outcome)
    }

    pub async fn board(&self) -> Board {
        self.session.lock().await.board().clone()
    }

    pub async fn turn(&self) -> Option<PlayerId> {
        self.session.lock().await.turn().cloned()
    }

    pub async fn players(&self) -> Vec<PlayerId> {
        self.session.lock().await.players().to_vec()
    }

    pub async fn game_over(&self) -> bool {
        self.session.lock().await.game_over()
    }

    pub async fn winner(&self) -> Option<PlayerId> {
        self.session.lock().await.winner().cloned()
    }

    pub async fn dimension(&self) -> usize {
        self.session.lock().await.dimension()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot {
            board: session.board().clone(),
            players: session.players().to_vec(),
            turn: session.turn().cloned(),
            game_over: session.game_over(),
            winner: session.winner().cloned(),
            dimension: session.dimension(),
            move_count: session.move_count(),
            last_move: session.last_move(),
            status: session.status(),
        }
    }
}
