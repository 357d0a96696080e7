//! Server state shared across handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::RoomBroadcaster;
use crate::usecase::{
    DispatchMessageUseCase, GetOnlineUsersUseCase, JoinRoomUseCase, LeaveRoomUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（入室のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（退室のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// DispatchMessageUseCase（メッセージ配信のユースケース）
    pub dispatch_message_usecase: Arc<DispatchMessageUseCase>,
    /// GetOnlineUsersUseCase（在室者一覧取得のユースケース）
    pub get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
    /// RoomBroadcaster（接続ごとの受信チャネルの登録先）
    pub broadcaster: Arc<dyn RoomBroadcaster>,
    /// Server configuration, served verbatim by `/api/config`
    pub config: Config,
}
