//! PresenceRegistry trait 定義
//!
//! ドメイン層が必要とする在室状態（presence）へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, RegistryError};

/// Presence Registry trait
///
/// 表示名 → 接続の対応を管理する「オンラインの真実の源」。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## 不変条件
///
/// - ある表示名を保持できる接続は常に高々一つ（名前 → 接続は単射）
/// - register は check-then-insert を単一のロック下で行い、
///   同名の同時登録は必ず一方だけが成功する
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// 表示名を登録する。既に使われていれば `RegistryError::NameTaken`
    async fn register(
        &self,
        name: DisplayName,
        connection_id: ConnectionId,
    ) -> Result<(), RegistryError>;

    /// 接続が保持していた表示名を解放する
    ///
    /// 未登録の接続に対しては何もせず `None` を返す（冪等）。
    /// join 完了前に切断したクライアントの teardown でも安全に呼べる。
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 明示的な退出。表示名を指定して解放する
    async fn unregister_by_name(&self, name: &DisplayName) -> bool;

    /// 現在のオンライン一覧を参加順で返す
    async fn snapshot(&self) -> Vec<DisplayName>;

    /// ブロードキャスト対象の接続一覧を返す
    async fn broadcast_targets(&self) -> Vec<ConnectionId>;

    /// 在室人数を返す
    async fn count(&self) -> usize;
}
