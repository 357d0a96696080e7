//! UseCase: 在室者一覧の取得
//!
//! HTTP API（`/api/online`）から参照される読み取り専用のユースケース。

use std::sync::Arc;

use crate::domain::{DisplayName, PresenceRegistry};

/// 在室者一覧取得のユースケース
pub struct GetOnlineUsersUseCase {
    /// PresenceRegistry（在室状態の抽象化）
    registry: Arc<dyn PresenceRegistry>,
}

impl GetOnlineUsersUseCase {
    /// 新しい GetOnlineUsersUseCase を作成
    pub fn new(registry: Arc<dyn PresenceRegistry>) -> Self {
        Self { registry }
    }

    /// 在室者の表示名を入室順で返す
    pub async fn execute(&self) -> Vec<DisplayName> {
        self.registry.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionId;
    use crate::infrastructure::registry::InMemoryPresenceRegistry;

    fn name(s: &str) -> DisplayName {
        DisplayName::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_execute_returns_names_in_join_order() {
        // テスト項目: 在室者一覧が入室順で返る
        // given (前提条件):
        let registry = Arc::new(InMemoryPresenceRegistry::new());
        registry.register(name("alice"), ConnectionId::new()).await.unwrap();
        registry.register(name("bob"), ConnectionId::new()).await.unwrap();
        let usecase = GetOnlineUsersUseCase::new(registry);

        // when (操作):
        let users = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(users, vec![name("alice"), name("bob")]);
    }

    #[tokio::test]
    async fn test_execute_returns_empty_list_for_empty_room() {
        // テスト項目: 誰もいなければ空の一覧が返る
        // given (前提条件):
        let registry = Arc::new(InMemoryPresenceRegistry::new());
        let usecase = GetOnlineUsersUseCase::new(registry);

        // when (操作):
        let users = usecase.execute().await;

        // then (期待する結果):
        assert!(users.is_empty());
    }
}
