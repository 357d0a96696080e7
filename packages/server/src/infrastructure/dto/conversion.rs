//! Conversion logic between domain events and wire DTOs.

use crate::domain::{ChatEvent, DisplayName};
use crate::infrastructure::dto::websocket as dto;

/// Welcome text shown to the room when a participant joins.
fn render_welcome_message(joined_name: &DisplayName) -> String {
    format!("欢迎 {} 加入聊天室！", joined_name)
}

fn names_to_strings(names: &[DisplayName]) -> Vec<String> {
    names.iter().map(|n| n.as_str().to_string()).collect()
}

// ========================================
// Domain Event → DTO
// ========================================

impl From<&ChatEvent> for dto::ServerEvent {
    fn from(event: &ChatEvent) -> Self {
        match event {
            ChatEvent::Welcome {
                joined_name,
                online_names,
            } => dto::ServerEvent::Welcome {
                message: render_welcome_message(joined_name),
                online_users: names_to_strings(online_names),
            },
            ChatEvent::Departure {
                left_name,
                online_names,
            } => dto::ServerEvent::UserLeft {
                username: left_name.as_str().to_string(),
                online_users: names_to_strings(online_names),
            },
            ChatEvent::JoinError { reason } => dto::ServerEvent::JoinError {
                message: reason.clone(),
            },
            ChatEvent::Message {
                sender_name,
                body,
                kind,
            } => dto::ServerEvent::NewMessage {
                username: sender_name.as_str().to_string(),
                message: body.clone(),
                is_media: kind.is_media(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageKind;

    fn name(s: &str) -> DisplayName {
        DisplayName::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_welcome_event_renders_welcome_text() {
        // テスト項目: Welcome イベントが挨拶文と online 一覧に変換される
        // given (前提条件):
        let event = ChatEvent::Welcome {
            joined_name: name("alice"),
            online_names: vec![name("alice")],
        };

        // when (操作):
        let dto = dto::ServerEvent::from(&event);

        // then (期待する結果):
        assert_eq!(
            dto,
            dto::ServerEvent::Welcome {
                message: "欢迎 alice 加入聊天室！".to_string(),
                online_users: vec!["alice".to_string()],
            }
        );
    }

    #[test]
    fn test_departure_event_converts_to_user_left() {
        // テスト項目: Departure イベントが user_left に変換される
        // given (前提条件):
        let event = ChatEvent::Departure {
            left_name: name("alice"),
            online_names: vec![name("bob")],
        };

        // when (操作):
        let dto = dto::ServerEvent::from(&event);

        // then (期待する結果):
        assert_eq!(
            dto,
            dto::ServerEvent::UserLeft {
                username: "alice".to_string(),
                online_users: vec!["bob".to_string()],
            }
        );
    }

    #[test]
    fn test_join_error_event_carries_reason() {
        // テスト項目: JoinError イベントの理由がそのまま message になる
        // given (前提条件):
        let event = ChatEvent::JoinError {
            reason: "昵称已存在，请选择其他昵称".to_string(),
        };

        // when (操作):
        let dto = dto::ServerEvent::from(&event);

        // then (期待する結果):
        assert_eq!(
            dto,
            dto::ServerEvent::JoinError {
                message: "昵称已存在，请选择其他昵称".to_string(),
            }
        );
    }

    #[test]
    fn test_media_message_sets_is_media_flag() {
        // テスト項目: Media 種別のメッセージだけ is_media が true になる
        // given (前提条件):
        let media = ChatEvent::Message {
            sender_name: name("alice"),
            body: "<iframe></iframe>".to_string(),
            kind: MessageKind::Media,
        };
        let plain = ChatEvent::Message {
            sender_name: name("alice"),
            body: "大家好".to_string(),
            kind: MessageKind::Plain,
        };
        let error = ChatEvent::Message {
            sender_name: name("alice"),
            body: "电影解析失败，请检查URL格式".to_string(),
            kind: MessageKind::Error,
        };

        // when (操作):
        let media_dto = dto::ServerEvent::from(&media);
        let plain_dto = dto::ServerEvent::from(&plain);
        let error_dto = dto::ServerEvent::from(&error);

        // then (期待する結果):
        assert!(matches!(
            media_dto,
            dto::ServerEvent::NewMessage { is_media: true, .. }
        ));
        assert!(matches!(
            plain_dto,
            dto::ServerEvent::NewMessage {
                is_media: false,
                ..
            }
        ));
        assert!(matches!(
            error_dto,
            dto::ServerEvent::NewMessage {
                is_media: false,
                ..
            }
        ));
    }
}
