//! WebSocket wire messages.
//!
//! Both directions are JSON with an internal `type` tag. The client sends the
//! display name in-band (`join`) instead of in the upgrade request, so a
//! rejected name can be retried over the same connection.

use serde::{Deserialize, Serialize};

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Join the room with a display name.
    Join {
        /// Requested display name.
        name: String,
    },
    /// Send a chat message (or command) to the room.
    SendMessage {
        /// Raw message text.
        text: String,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Join succeeded; broadcast to the whole room including the joiner.
    Welcome {
        /// Rendered welcome text.
        message: String,
        /// Online display names in join order.
        online_users: Vec<String>,
    },
    /// A participant left the room.
    UserLeft {
        /// Display name that left.
        username: String,
        /// Remaining online display names in join order.
        online_users: Vec<String>,
    },
    /// Join failed; sent only to the requesting connection.
    JoinError {
        /// Human-readable reason.
        message: String,
    },
    /// A chat message.
    NewMessage {
        /// Sender display name (the bot uses its own name).
        username: String,
        /// Message body, or embed markup when `is_media` is set.
        message: String,
        /// Whether `message` is embed markup rather than text.
        is_media: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_join_deserializes_from_tagged_json() {
        // テスト項目: join イベントが type タグ付き JSON から復元できる
        // given (前提条件):
        let json = r#"{"type":"join","name":"alice"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::Join {
                name: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_client_event_send_message_deserializes_from_tagged_json() {
        // テスト項目: send_message イベントが type タグ付き JSON から復元できる
        // given (前提条件):
        let json = r#"{"type":"send_message","text":"大家好"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::SendMessage {
                text: "大家好".to_string()
            }
        );
    }

    #[test]
    fn test_client_event_with_unknown_type_fails() {
        // テスト項目: 未知の type タグはデシリアライズエラーになる
        // given (前提条件):
        let json = r#"{"type":"shutdown"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_server_event_welcome_serializes_with_type_tag() {
        // テスト項目: welcome イベントが type タグ付きで直列化される
        // given (前提条件):
        let event = ServerEvent::Welcome {
            message: "欢迎 alice 加入聊天室！".to_string(),
            online_users: vec!["alice".to_string()],
        };

        // when (操作):
        let json = serde_json::to_string(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"type":"welcome","message":"欢迎 alice 加入聊天室！","online_users":["alice"]}"#
        );
    }

    #[test]
    fn test_server_event_new_message_serializes_with_media_flag() {
        // テスト項目: new_message イベントが is_media フラグ付きで直列化される
        // given (前提条件):
        let event = ServerEvent::NewMessage {
            username: "alice".to_string(),
            message: "大家好".to_string(),
            is_media: false,
        };

        // when (操作):
        let json = serde_json::to_string(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"type":"new_message","username":"alice","message":"大家好","is_media":false}"#
        );
    }

    #[test]
    fn test_server_event_user_left_round_trip() {
        // テスト項目: user_left イベントが直列化・復元で一致する
        // given (前提条件):
        let event = ServerEvent::UserLeft {
            username: "alice".to_string(),
            online_users: vec!["bob".to_string()],
        };

        // when (操作):
        let json = serde_json::to_string(&event).unwrap();
        let restored: ServerEvent = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(restored, event);
    }
}
