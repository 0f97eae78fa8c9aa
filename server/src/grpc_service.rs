use tonic::metadata::{MetadataMap, MetadataValue};
use tonic::{Code, Request, Response, Status};

use common::games::connect_four::SessionError;
use common::{
    GetBoardRequest, GetBoardResponse, GetDimensionRequest, GetDimensionResponse, GetGameOverRequest,
    GetGameOverResponse, GetPlayersRequest, GetPlayersResponse, GetStateRequest, GetStateResponse, GetTurnRequest,
    GetTurnResponse, GetWinnerRequest, GetWinnerResponse, JoinGameRequest, JoinGameResponse, LeaveGameRequest,
    LeaveGameResponse, PlayerId, PlayerTurnRequest, PlayerTurnResponse, four_lines_service_server::FourLinesService,
    log,
};

use crate::session_manager::SessionManager;

pub const SESSION_ERROR_METADATA_KEY: &str = "x-session-error";

#[derive(Debug)]
pub struct GrpcService {
    session_manager: SessionManager,
}

impl GrpcService {
    pub fn new(session_manager: SessionManager) -> Self {
        Self { session_manager }
    }
}

fn parse_player_id(player_id: String) -> Result<PlayerId, Status> {
    let player_id = PlayerId::new(player_id);
    if player_id.is_empty() {
        return Err(Status::invalid_argument("Player id must not be empty"));
    }
    Ok(player_id)
}

/// Kinds sharing a status code are told apart by the `x-session-error` metadata entry.
pub fn session_error_to_status(err: &SessionError) -> Status {
    let code = match err {
        SessionError::SlotUnavailable => Code::ResourceExhausted,
        SessionError::DuplicatePlayer(_) => Code::AlreadyExists,
        SessionError::PlayerNotFound(_) => Code::NotFound,
        SessionError::IllegalMove { .. } => Code::InvalidArgument,
        SessionError::GameOver
        | SessionError::GameNotStarted
        | SessionError::ColumnFull { .. }
        | SessionError::NotYourTurn => Code::FailedPrecondition,
    };

    let mut metadata = MetadataMap::new();
    metadata.insert(SESSION_ERROR_METADATA_KEY, MetadataValue::from_static(err.kind()));
    Status::with_metadata(code, err.to_string(), metadata)
}

#[tonic::async_trait]
impl FourLinesService for GrpcService {
    async fn join_game(&self, request: Request<JoinGameRequest>) -> Result<Response<JoinGameResponse>, Status> {
        let player_id = parse_player_id(request.into_inner().player_id)?;

        self.session_manager
            .join_game(player_id.clone())
            .await
            .map_err(|e| {
                log!("Join rejected for {}: {}", player_id, e);
                session_error_to_status(&e)
            })?;

        Ok(Response::new(JoinGameResponse {}))
    }

    async fn leave_game(&self, request: Request<LeaveGameRequest>) -> Result<Response<LeaveGameResponse>, Status> {
        let player_id = parse_player_id(request.into_inner().player_id)?;

        self.session_manager.leave_game(&player_id).await.map_err(|e| {
            log!("Leave rejected for {}: {}", player_id, e);
            session_error_to_status(&e)
        })?;

        Ok(Response::new(LeaveGameResponse {}))
    }

    async fn player_turn(&self, request: Request<PlayerTurnRequest>) -> Result<Response<PlayerTurnResponse>, Status> {
        let request = request.into_inner();
        let player_id = parse_player_id(request.player_id)?;
        let column = request.column as usize;

        self.session_manager
            .player_turn(&player_id, column)
            .await
            .map_err(|e| {
                log!("Move by {} to column {} rejected: {}", player_id, column, e);
                session_error_to_status(&e)
            })?;

        Ok(Response::new(PlayerTurnResponse {}))
    }

    async fn get_board(&self, _request: Request<GetBoardRequest>) -> Result<Response<GetBoardResponse>, Status> {
        let board = self.session_manager.board().await;
        Ok(Response::new(GetBoardResponse {
            rows: board.to_proto_rows(),
        }))
    }

    async fn get_turn(&self, _request: Request<GetTurnRequest>) -> Result<Response<GetTurnResponse>, Status> {
        let turn = self.session_manager.turn().await;
        Ok(Response::new(GetTurnResponse {
            player_id: turn.map(String::from).unwrap_or_default(),
        }))
    }

    async fn get_players(&self, _request: Request<GetPlayersRequest>) -> Result<Response<GetPlayersResponse>, Status> {
        let players = self.session_manager.players().await;
        Ok(Response::new(GetPlayersResponse {
            player_ids: players.into_iter().map(String::from).collect(),
        }))
    }

    async fn get_game_over(
        &self,
        _request: Request<GetGameOverRequest>,
    ) -> Result<Response<GetGameOverResponse>, Status> {
        Ok(Response::new(GetGameOverResponse {
            game_over: self.session_manager.game_over().await,
        }))
    }

    async fn get_winner(&self, _request: Request<GetWinnerRequest>) -> Result<Response<GetWinnerResponse>, Status> {
        let winner = self.session_manager.winner().await;
        Ok(Response::new(GetWinnerResponse {
            player_id: winner.map(String::from),
        }))
    }

    async fn get_dimension(
        &self,
        _request: Request<GetDimensionRequest>,
    ) -> Result<Response<GetDimensionResponse>, Status> {
        Ok(Response::new(GetDimensionResponse {
            dimension: self.session_manager.dimension().await as u32,
        }))
    }

    async fn get_state(&self, _request: Request<GetStateRequest>) -> Result<Response<GetStateResponse>, Status> {
        let snapshot = self.session_manager.snapshot().await;
        Ok(Response::new(GetStateResponse {
            rows: snapshot.board.to_proto_rows(),
            player_ids: snapshot.players.into_iter().map(String::from).collect(),
            turn: snapshot.turn.map(String::from).unwrap_or_default(),
            game_over: snapshot.game_over,
            winner: snapshot.winner.map(String::from),
            dimension: snapshot.dimension as u32,
            move_count: snapshot.move_count as u32,
            last_move: snapshot.last_move.map(|position| position.to_proto()),
            status: snapshot.status.to_proto(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::connect_four::ConnectFourSession;
    use common::{CellState, SessionStatus};

    fn service() -> GrpcService {
        GrpcService::new(SessionManager::new(ConnectFourSession::new(7)))
    }

    async fn join(service: &GrpcService, player_id: &str) -> Result<Response<JoinGameResponse>, Status> {
        service
            .join_game(Request::new(JoinGameRequest {
                player_id: player_id.to_string(),
            }))
            .await
    }

    async fn turn(service: &GrpcService, player_id: &str, column: u32) -> Result<Response<PlayerTurnResponse>, Status> {
        service
            .player_turn(Request::new(PlayerTurnRequest {
                player_id: player_id.to_string(),
                column,
            }))
            .await
    }

    fn error_kind(status: &Status) -> &str {
        status
            .metadata()
            .get(SESSION_ERROR_METADATA_KEY)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    #[test]
    fn test_error_codes() {
        let status = session_error_to_status(&SessionError::SlotUnavailable);
        assert_eq!(status.code(), Code::ResourceExhausted);
        assert_eq!(error_kind(&status), "SlotUnavailable");

        let status = session_error_to_status(&SessionError::IllegalMove { column: 0, dimension: 7 });
        assert_eq!(status.code(), Code::InvalidArgument);

        let status = session_error_to_status(&SessionError::ColumnFull { column: 2 });
        assert_eq!(status.code(), Code::FailedPrecondition);
        assert_eq!(error_kind(&status), "ColumnFull");
        assert_eq!(status.message(), "Illegal move: column 2 is full");
    }

    #[tokio::test]
    async fn test_empty_player_id_is_rejected() {
        let service = service();
        let status = join(&service, "  ").await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);

        let players = service.get_players(Request::new(GetPlayersRequest {})).await.unwrap();
        assert!(players.into_inner().player_ids.is_empty());
    }

    #[tokio::test]
    async fn test_join_errors_map_to_statuses() {
        let service = service();
        join(&service, "alice").await.unwrap();

        let status = join(&service, "alice").await.unwrap_err();
        assert_eq!(status.code(), Code::AlreadyExists);
        assert_eq!(error_kind(&status), "DuplicatePlayer");

        join(&service, "bob").await.unwrap();
        let status = join(&service, "carol").await.unwrap_err();
        assert_eq!(status.code(), Code::ResourceExhausted);
    }

    #[tokio::test]
    async fn test_turn_and_players_read_back() {
        let service = service();
        let turn_response = service.get_turn(Request::new(GetTurnRequest {})).await.unwrap();
        assert_eq!(turn_response.into_inner().player_id, "");

        join(&service, "alice").await.unwrap();
        join(&service, "bob").await.unwrap();

        let turn_response = service.get_turn(Request::new(GetTurnRequest {})).await.unwrap();
        assert_eq!(turn_response.into_inner().player_id, "alice");

        let players = service.get_players(Request::new(GetPlayersRequest {})).await.unwrap();
        assert_eq!(players.into_inner().player_ids, vec!["alice".to_string(), "bob".to_string()]);

        let dimension = service.get_dimension(Request::new(GetDimensionRequest {})).await.unwrap();
        assert_eq!(dimension.into_inner().dimension, 7);
    }

    #[tokio::test]
    async fn test_move_errors_carry_kind() {
        let service = service();
        join(&service, "alice").await.unwrap();

        let status = turn(&service, "alice", 1).await.unwrap_err();
        assert_eq!(error_kind(&status), "GameNotStarted");

        join(&service, "bob").await.unwrap();
        let status = turn(&service, "bob", 1).await.unwrap_err();
        assert_eq!(status.code(), Code::FailedPrecondition);
        assert_eq!(error_kind(&status), "NotYourTurn");

        let status = turn(&service, "alice", 8).await.unwrap_err();
        assert_eq!(error_kind(&status), "IllegalMove");
    }

    #[tokio::test]
    async fn test_vertical_win_over_grpc() {
        let service = service();
        join(&service, "alice").await.unwrap();
        join(&service, "bob").await.unwrap();

        for _ in 0..3 {
            turn(&service, "alice", 1).await.unwrap();
            turn(&service, "bob", 2).await.unwrap();
        }
        turn(&service, "alice", 1).await.unwrap();

        let game_over = service.get_game_over(Request::new(GetGameOverRequest {})).await.unwrap();
        assert!(game_over.into_inner().game_over);

        let winner = service.get_winner(Request::new(GetWinnerRequest {})).await.unwrap();
        assert_eq!(winner.into_inner().player_id.as_deref(), Some("alice"));

        let board = service.get_board(Request::new(GetBoardRequest {})).await.unwrap().into_inner();
        assert_eq!(board.rows.len(), 7);
        for row in 0..4 {
            assert_eq!(board.rows[row].cells[0], CellState::PlayerOne as i32);
            assert_eq!(board.rows[row].cells[1], if row < 3 { CellState::PlayerTwo as i32 } else { CellState::Empty as i32 });
        }

        let status = turn(&service, "bob", 3).await.unwrap_err();
        assert_eq!(error_kind(&status), "GameOver");
    }

    #[tokio::test]
    async fn test_state_snapshot_and_leave() {
        let service = service();
        join(&service, "alice").await.unwrap();
        join(&service, "bob").await.unwrap();
        turn(&service, "alice", 4).await.unwrap();

        let state = service.get_state(Request::new(GetStateRequest {})).await.unwrap().into_inner();
        assert_eq!(state.turn, "bob");
        assert_eq!(state.move_count, 1);
        assert_eq!(state.status, SessionStatus::InProgress as i32);
        let last_move = state.last_move.unwrap();
        assert_eq!((last_move.row, last_move.column), (0, 3));
        assert!(state.winner.is_none());

        service
            .leave_game(Request::new(LeaveGameRequest {
                player_id: "bob".to_string(),
            }))
            .await
            .unwrap();

        let state = service.get_state(Request::new(GetStateRequest {})).await.unwrap().into_inner();
        assert_eq!(state.player_ids, vec!["alice".to_string()]);
        assert_eq!(state.move_count, 0);
        assert_eq!(state.turn, "");
        assert_eq!(state.status, SessionStatus::Waiting as i32);
        assert!(state.last_move.is_none());
        assert!(state.rows.iter().all(|row| row.cells.iter().all(|&cell| cell == CellState::Empty as i32)));

        let status = service
            .leave_game(Request::new(LeaveGameRequest {
                player_id: "bob".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }
}
