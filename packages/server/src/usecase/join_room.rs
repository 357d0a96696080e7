//! UseCase: 入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 表示名の登録と welcome のブロードキャスト、重複時の本人向け通知
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：表示名の一意性を保証する
//! - welcome が参加者本人を含む全員に配信されることを保証
//! - join 失敗が本人以外へ漏れない（ブロードキャストされない）ことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の入室
//! - 異常系：使用中の表示名での入室試行
//! - エッジケース：拒否された接続が別名で再試行して成功する

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ConnectionId, DisplayName, PresenceRegistry, RegistryError, RoomBroadcaster,
};

use super::error::JoinRoomError;

/// join 拒否時にクライアントへ返す理由文
pub const NAME_TAKEN_MESSAGE: &str = "昵称已存在，请选择其他昵称";

/// 入室のユースケース
pub struct JoinRoomUseCase {
    /// PresenceRegistry（在室状態の抽象化）
    registry: Arc<dyn PresenceRegistry>,
    /// RoomBroadcaster（イベント配信の抽象化）
    broadcaster: Arc<dyn RoomBroadcaster>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn PresenceRegistry>, broadcaster: Arc<dyn RoomBroadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `name` - 登録する表示名（Domain Model）
    /// * `connection_id` - 入室する接続
    ///
    /// # Returns
    ///
    /// * `Ok(ChatEvent)` - 入室成功（ブロードキャスト済みの Welcome イベント）
    /// * `Err(JoinRoomError)` - 入室失敗（本人には join_error 通知済み）
    pub async fn execute(
        &self,
        name: DisplayName,
        connection_id: ConnectionId,
    ) -> Result<ChatEvent, JoinRoomError> {
        // 1. 表示名を登録（check-then-insert は registry 側で原子的に行われる）
        match self.registry.register(name.clone(), connection_id).await {
            Ok(()) => {}
            Err(RegistryError::NameTaken(taken)) => {
                // 2a. 失敗: 本人にのみ join_error を通知し、接続は維持する
                let event = ChatEvent::JoinError {
                    reason: NAME_TAKEN_MESSAGE.to_string(),
                };
                if let Err(e) = self.broadcaster.send_to(&connection_id, &event).await {
                    tracing::warn!(
                        "Failed to deliver join_error to connection '{}': {}",
                        connection_id,
                        e
                    );
                }
                return Err(JoinRoomError::NameTaken(taken));
            }
        }

        // 2b. 成功: 参加者本人を含む全員へ welcome をブロードキャスト
        let online_names = self.registry.snapshot().await;
        let event = ChatEvent::Welcome {
            joined_name: name,
            online_names,
        };
        let targets = self.registry.broadcast_targets().await;
        self.broadcaster.broadcast(targets, &event).await;

        Ok(event)
    }
}
