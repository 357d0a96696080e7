//! 受信メッセージのコマンド分類
//!
//! 生メッセージ文字列の先頭文字だけで分類が決まる純粋関数。
//! ネットワークにも共有状態にも触れないため、分類そのものは失敗しない。

/// メディア埋め込みコマンドのプレフィックス
pub const MEDIA_COMMAND_PREFIX: &str = "@电影";

/// 自動応答コマンドのプレフィックス
pub const RESPONDER_COMMAND_PREFIX: &str = "@川小农";

/// 自動応答 bot の表示名
pub const RESPONDER_BOT_NAME: &str = "川小农";

/// 受信メッセージの分類結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundCommand {
    /// そのままブロードキャストするテキスト
    Plain(String),
    /// メディア埋め込み要求（埋め込み先は dispatcher が保持する固定参照）
    MediaRequest,
    /// 自動応答要求。プレフィックス以降を質問文として保持する
    ResponderRequest(String),
    /// コマンドに該当しない `@` 付きメッセージ。表示上の装飾はクライアント側の責務
    MentionOther(String),
}

/// 生メッセージを分類する
///
/// 優先順位は「メディア → 自動応答 → メンション → 通常」。
/// 二つのコマンドプレフィックスは互いに素なので、先頭一致だけで一意に決まる。
pub fn classify_message(raw: &str) -> InboundCommand {
    if raw.starts_with(MEDIA_COMMAND_PREFIX) {
        return InboundCommand::MediaRequest;
    }
    if let Some(rest) = raw.strip_prefix(RESPONDER_COMMAND_PREFIX) {
        // 質問はプレフィックスと区切り空白を除いた残り（無ければ空文字）
        return InboundCommand::ResponderRequest(rest.trim().to_string());
    }
    if raw.contains('@') {
        return InboundCommand::MentionOther(raw.to_string());
    }
    InboundCommand::Plain(raw.to_string())
}
