//! ChatEvent 定義
//!
//! サーバーからクライアントへ配信されるプロトコルの単位。
//! 生成後は不変で、配信が終われば破棄される（永続化しない）。

use super::DisplayName;

/// チャットメッセージの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// 通常のテキストメッセージ
    Plain,
    /// メディア埋め込み（iframe マークアップ）
    Media,
    /// コマンド処理失敗を表すエラーメッセージ
    Error,
}

impl MessageKind {
    /// ワイヤ上の `is_media` フラグに対応するか
    pub fn is_media(&self) -> bool {
        matches!(self, MessageKind::Media)
    }
}

/// ルームに配信されるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// 参加成功。参加者本人を含む全員に配信される
    Welcome {
        joined_name: DisplayName,
        online_names: Vec<DisplayName>,
    },
    /// 退出。残りの参加者に配信される
    Departure {
        left_name: DisplayName,
        online_names: Vec<DisplayName>,
    },
    /// join 失敗。要求した接続にのみ送信される（ブロードキャストしない）
    JoinError { reason: String },
    /// チャットメッセージ
    Message {
        sender_name: DisplayName,
        body: String,
        kind: MessageKind,
    },
}
