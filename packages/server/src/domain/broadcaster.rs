//! RoomBroadcaster trait 定義
//!
//! ルームへのイベント配信（fan-out）を抽象化します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{BroadcastError, ChatEvent, ConnectionId};

/// 受信者ごとの送信キューの深さ
///
/// キューが溢れた場合はその受信者への配信失敗として扱い、
/// 送信側のセッションは決してブロックしない。
pub const RECIPIENT_QUEUE_CAPACITY: usize = 100;

/// 受信者への送信チャンネル
///
/// WebSocket の生成は UI 層が行い、送信側ハーフだけを broadcaster に預ける。
pub type RecipientChannel = mpsc::Sender<String>;

/// Room Broadcaster trait
///
/// ## 配信保証
///
/// - broadcast はベストエフォート。一人への配信失敗（キュー閉鎖・満杯）は
///   ログに記録して次の受信者へ進み、呼び出し元へはエラーを返さない
/// - 同一送信者が順に投入したイベントは、各受信者に同じ順序で届く
///   （送信者ごとの FIFO。グローバルな全順序は保証しない）
#[async_trait]
pub trait RoomBroadcaster: Send + Sync {
    /// 接続の送信チャンネルを登録する
    ///
    /// join 前のエラー通知（join_error）を届けるため、
    /// transport の受付時点で呼ばれる。
    async fn register_recipient(&self, connection_id: ConnectionId, channel: RecipientChannel);

    /// 接続の送信チャンネルを破棄する
    async fn unregister_recipient(&self, connection_id: &ConnectionId);

    /// イベントを対象の全接続へ配信する
    async fn broadcast(&self, targets: Vec<ConnectionId>, event: &ChatEvent);

    /// イベントを単一の接続へ送信する（join_error などの本人宛通知）
    async fn send_to(
        &self,
        connection_id: &ConnectionId,
        event: &ChatEvent,
    ) -> Result<(), BroadcastError>;
}
