//! UseCase 層のエラー定義

use thiserror::Error;

/// 入室処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// 表示名が使用中。本人には join_error が通知済みで、
    /// 接続は維持されるため別名で再試行できる
    #[error("display name '{0}' is already taken")]
    NameTaken(String),
}
