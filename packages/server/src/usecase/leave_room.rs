//! UseCase: 退室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 表示名の解放と departure のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - teardown の冪等性：join 未完了の接続の切断で departure を出さない
//! - 解放された表示名が再利用可能になることを保証
//! - 残りの参加者にだけ通知されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：入室済み参加者の切断と通知
//! - エッジケース：最後の参加者の切断（通知対象は空）
//! - 異常系：join していない接続の切断（何も起きない）

use std::sync::Arc;

use crate::domain::{ChatEvent, ConnectionId, PresenceRegistry, RoomBroadcaster};

/// 退室のユースケース
pub struct LeaveRoomUseCase {
    /// PresenceRegistry（在室状態の抽象化）
    registry: Arc<dyn PresenceRegistry>,
    /// RoomBroadcaster（イベント配信の抽象化）
    broadcaster: Arc<dyn RoomBroadcaster>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn PresenceRegistry>, broadcaster: Arc<dyn RoomBroadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// 退室を実行
    ///
    /// 接続が表示名を保持していなければ何もしない（冪等）。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断された接続
    ///
    /// # Returns
    ///
    /// * `Some(ChatEvent)` - 表示名を解放し、departure をブロードキャストした
    /// * `None` - 接続は表示名を保持していなかった（join 未完了の切断）
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<ChatEvent> {
        // 1. 接続が保持していた表示名を解放する
        let left_name = self.registry.unregister(&connection_id).await?;
        tracing::info!("Participant '{}' left the room", left_name);

        // 2. 残りの参加者へ departure をブロードキャスト
        let online_names = self.registry.snapshot().await;
        let event = ChatEvent::Departure {
            left_name,
            online_names,
        };
        let targets = self.registry.broadcast_targets().await;
        self.broadcaster.broadcast(targets, &event).await;

        Some(event)
    }
}
