//! ドメイン層
//!
//! チャットルームの語彙（値オブジェクト・イベント・コマンド分類）と、
//! Infrastructure 層が実装するインターフェース（registry / broadcaster /
//! responder）を定義します。

pub mod broadcaster;
pub mod command;
pub mod error;
pub mod event;
pub mod registry;
pub mod responder;
pub mod value_object;

pub use broadcaster::{RECIPIENT_QUEUE_CAPACITY, RecipientChannel, RoomBroadcaster};
pub use command::{
    InboundCommand, MEDIA_COMMAND_PREFIX, RESPONDER_BOT_NAME, RESPONDER_COMMAND_PREFIX,
    classify_message,
};
pub use error::{BroadcastError, RegistryError, ResponderError, ValueObjectError};
pub use event::{ChatEvent, MessageKind};
pub use registry::PresenceRegistry;
pub use responder::{ReplySelector, ResponderEngine};
pub use value_object::{ConnectionId, DisplayName, MAX_DISPLAY_NAME_CHARS};

#[cfg(test)]
pub use responder::MockResponderEngine;
