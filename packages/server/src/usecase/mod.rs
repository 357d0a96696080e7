//! UseCase 層
//!
//! ルームに対する操作単位（入室 / 退室 / メッセージ配信 / 状態参照）を
//! ドメインのインターフェースだけに依存して実装します。

pub mod dispatch_message;
pub mod error;
pub mod get_online_users;
pub mod join_room;
pub mod leave_room;

pub use dispatch_message::{
    DEFAULT_MEDIA_EMBED_URL, DispatchMessageUseCase, MEDIA_EMBED_FAILED_MESSAGE, RESPONDER_APOLOGY,
    build_media_embed,
};
pub use error::JoinRoomError;
pub use get_online_users::GetOnlineUsersUseCase;
pub use join_room::{JoinRoomUseCase, NAME_TAKEN_MESSAGE};
pub use leave_room::LeaveRoomUseCase;
