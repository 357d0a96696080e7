//! WebSocket を使った RoomBroadcaster 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信チャンネル（bounded `mpsc::Sender`）の管理
//! - ドメインイベントのワイヤ形式への変換と配信（broadcast, send_to）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された送信側ハーフを受け取り、イベント配信に使用します。
//!
//! 配信は `try_send` のみを使います。受信者のキューが満杯でも送信側の
//! セッションはブロックせず、その受信者への配信失敗として記録します。
//! 遅い受信者が他の受信者への配信を止めることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    BroadcastError, ChatEvent, ConnectionId, RecipientChannel, RoomBroadcaster,
};
use crate::infrastructure::dto::websocket::ServerEvent;

/// WebSocket を使った RoomBroadcaster 実装
pub struct WebSocketBroadcaster {
    /// 接続中の受信者の送信チャンネル
    recipients: Arc<Mutex<HashMap<ConnectionId, RecipientChannel>>>,
}

impl WebSocketBroadcaster {
    /// 新しい WebSocketBroadcaster を作成
    pub fn new() -> Self {
        Self {
            recipients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// イベントをワイヤ形式（JSON）へ変換する
    ///
    /// 変換は配信ごとに一度だけ行い、受信者間で使い回す。
    fn serialize_event(event: &ChatEvent) -> Option<String> {
        match serde_json::to_string(&ServerEvent::from(event)) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("Failed to serialize chat event: {}", e);
                None
            }
        }
    }
}

impl Default for WebSocketBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomBroadcaster for WebSocketBroadcaster {
    async fn register_recipient(&self, connection_id: ConnectionId, channel: RecipientChannel) {
        let mut recipients = self.recipients.lock().await;
        recipients.insert(connection_id, channel);
        tracing::debug!("Connection '{}' registered to broadcaster", connection_id);
    }

    async fn unregister_recipient(&self, connection_id: &ConnectionId) {
        let mut recipients = self.recipients.lock().await;
        recipients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from broadcaster",
            connection_id
        );
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &ChatEvent) {
        let Some(json) = Self::serialize_event(event) else {
            return;
        };

        let recipients = self.recipients.lock().await;
        for target in targets {
            match recipients.get(&target) {
                Some(channel) => {
                    // ブロードキャストでは一部の送信失敗を許容する
                    if let Err(e) = channel.try_send(json.clone()) {
                        tracing::warn!("Failed to deliver to connection '{}': {}", target, e);
                    } else {
                        tracing::debug!("Delivered event to connection '{}'", target);
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }
    }

    async fn send_to(
        &self,
        connection_id: &ConnectionId,
        event: &ChatEvent,
    ) -> Result<(), BroadcastError> {
        let json = Self::serialize_event(event).ok_or_else(|| {
            BroadcastError::DeliveryFailed(
                connection_id.to_string(),
                "event serialization failed".to_string(),
            )
        })?;

        let recipients = self.recipients.lock().await;
        match recipients.get(connection_id) {
            Some(channel) => channel.try_send(json).map_err(|e| {
                BroadcastError::DeliveryFailed(connection_id.to_string(), e.to_string())
            }),
            None => Err(BroadcastError::RecipientNotFound(connection_id.to_string())),
        }
    }
}
