//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domain::RoomBroadcaster;
use crate::usecase::{
    DispatchMessageUseCase, GetOnlineUsersUseCase, JoinRoomUseCase, LeaveRoomUseCase,
};

use super::{
    handler::{get_config, get_online_users, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Assemble the chat service router
///
/// Exposed separately from [`Server`] so integration tests can serve the
/// exact production routes on an ephemeral port.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/config", get(get_config))
        .route("/api/online", get(get_online_users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// WebSocket chat server
///
/// This struct encapsulates the wired-up use cases and provides a method to
/// run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_room_usecase,
///     leave_room_usecase,
///     dispatch_message_usecase,
///     get_online_users_usecase,
///     broadcaster,
///     config,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// JoinRoomUseCase（入室のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（退室のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// DispatchMessageUseCase（メッセージ配信のユースケース）
    dispatch_message_usecase: Arc<DispatchMessageUseCase>,
    /// GetOnlineUsersUseCase（在室者一覧取得のユースケース）
    get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
    /// RoomBroadcaster（接続ごとの受信チャネルの登録先）
    broadcaster: Arc<dyn RoomBroadcaster>,
    /// Server configuration
    config: Config,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        dispatch_message_usecase: Arc<DispatchMessageUseCase>,
        get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
        broadcaster: Arc<dyn RoomBroadcaster>,
        config: Config,
    ) -> Self {
        Self {
            join_room_usecase,
            leave_room_usecase,
            dispatch_message_usecase,
            get_online_users_usecase,
            broadcaster,
            config,
        }
    }

    /// Run the WebSocket chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            dispatch_message_usecase: self.dispatch_message_usecase,
            get_online_users_usecase: self.get_online_users_usecase,
            broadcaster: self.broadcaster,
            config: self.config,
        });

        let app = build_router(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "WebSocket chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
