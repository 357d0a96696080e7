//! InMemory Presence Registry 実装
//!
//! ドメイン層が定義する PresenceRegistry trait の具体的な実装。
//! 参加順を保持した Vec をインメモリのストレージとして使用します。
//!
//! 名前の重複チェックと挿入は同一ロックの中で行うため、同名の同時 join は
//! 必ず一方だけが成功します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, DisplayName, PresenceRegistry, RegistryError};

/// 在室エントリ（表示名と接続の対応）
#[derive(Debug, Clone)]
struct PresenceEntry {
    name: DisplayName,
    connection_id: ConnectionId,
}

/// インメモリ Presence Registry 実装
///
/// 同期機構を自身で所有し、外部のロックに依存しない。
/// エントリは参加順のまま保持され、snapshot はその順序で返る。
pub struct InMemoryPresenceRegistry {
    entries: Mutex<Vec<PresenceEntry>>,
}

impl InMemoryPresenceRegistry {
    /// 新しい InMemoryPresenceRegistry を作成
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn register(
        &self,
        name: DisplayName,
        connection_id: ConnectionId,
    ) -> Result<(), RegistryError> {
        let mut entries = self.entries.lock().await;

        // check-then-insert をロック下で行う
        if entries.iter().any(|e| e.name == name) {
            return Err(RegistryError::NameTaken(name.into_string()));
        }
        entries.push(PresenceEntry {
            name,
            connection_id,
        });

        Ok(())
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let mut entries = self.entries.lock().await;

        let position = entries
            .iter()
            .position(|e| e.connection_id == *connection_id)?;
        let entry = entries.remove(position);

        Some(entry.name)
    }

    async fn unregister_by_name(&self, name: &DisplayName) -> bool {
        let mut entries = self.entries.lock().await;

        match entries.iter().position(|e| e.name == *name) {
            Some(position) => {
                entries.remove(position);
                true
            }
            None => false,
        }
    }

    async fn snapshot(&self) -> Vec<DisplayName> {
        let entries = self.entries.lock().await;
        entries.iter().map(|e| e.name.clone()).collect()
    }

    async fn broadcast_targets(&self) -> Vec<ConnectionId> {
        let entries = self.entries.lock().await;
        entries.iter().map(|e| e.connection_id).collect()
    }

    async fn count(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.len()
    }
}
