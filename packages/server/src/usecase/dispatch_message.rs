//! UseCase: メッセージのディスパッチ
//!
//! ## 責務
//!
//! - 受信メッセージの分類（コマンド / 通常メッセージ）
//! - 分類結果ごとの ChatEvent 生成と即時ブロードキャスト
//! - コマンド処理の失敗をイベントに変換する（セッションを落とさない）
//!
//! ## 設計ノート
//!
//! 一つのメッセージから複数のイベントが生まれることがある
//! （自動応答コマンドは「質問の原文」と「bot の応答」の二つ）。
//! イベントは生成されるたびに即ブロードキャストされるため、
//! 同一送信者のイベント順序は生成順のまま保たれる。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DispatchMessageUseCase::execute() メソッド
//! - 分類ごとのイベント内容・種別・配信順序
//!
//! ### なぜこのテストが必要か
//! - コマンドの失敗（不正な埋め込み URL、エンジン障害）がエラーイベント/
//!   謝罪文へ変換され、例外として伝播しないことを保証
//! - 自動応答の「原文 → bot 応答」の順序を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：通常メッセージ、メディアコマンド、自動応答コマンド
//! - 異常系：不正な埋め込み URL、ResponderEngine の失敗
//! - エッジケース：空メッセージ、メンション付きメッセージ

use std::sync::Arc;

use url::Url;

use crate::domain::{
    ChatEvent, DisplayName, InboundCommand, MessageKind, PresenceRegistry, RESPONDER_BOT_NAME,
    ResponderEngine, RoomBroadcaster, classify_message,
};

/// メディアコマンドが埋め込む既定の再生ページ
pub const DEFAULT_MEDIA_EMBED_URL: &str = "https://jx.m3u8.tv/jiexi/?url=2";

/// 埋め込みマークアップの生成に失敗したときの通知文
pub const MEDIA_EMBED_FAILED_MESSAGE: &str = "电影解析失败，请检查URL格式";

/// ResponderEngine が失敗したときに bot 名義で送る謝罪文
pub const RESPONDER_APOLOGY: &str = "抱歉，我现在有点忙，请稍后再试。";

/// 再生ページ URL を iframe 埋め込みマークアップへ変換する
///
/// URL の検証に失敗した場合はエラーを返す（呼び出し側がエラーイベントへ変換する）。
pub fn build_media_embed(embed_url: &str) -> Result<String, url::ParseError> {
    let url = Url::parse(embed_url)?;
    Ok(format!(
        "<div class=\"movie-container\"><h4>电影播放</h4>\
         <iframe src=\"{}\" frameborder=\"0\" width=\"100%\" height=\"300px\"></iframe></div>",
        url
    ))
}

/// メッセージディスパッチのユースケース
pub struct DispatchMessageUseCase {
    /// PresenceRegistry（配信対象の解決に使用）
    registry: Arc<dyn PresenceRegistry>,
    /// RoomBroadcaster（イベント配信の抽象化）
    broadcaster: Arc<dyn RoomBroadcaster>,
    /// ResponderEngine（bot 応答の生成）
    responder: Arc<dyn ResponderEngine>,
    /// bot の表示名
    bot_name: DisplayName,
    /// メディアコマンドが埋め込む再生ページ URL
    media_embed_url: String,
}

impl DispatchMessageUseCase {
    /// 新しい DispatchMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn PresenceRegistry>,
        broadcaster: Arc<dyn RoomBroadcaster>,
        responder: Arc<dyn ResponderEngine>,
        media_embed_url: String,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            responder,
            bot_name: DisplayName::new(RESPONDER_BOT_NAME.to_string())
                .expect("Bot display name should be valid"),
            media_embed_url,
        }
    }

    /// メッセージを分類し、生成したイベントを順にブロードキャストする
    ///
    /// # Arguments
    ///
    /// * `sender_name` - 送信者の表示名（Joined 済みであること）
    /// * `raw_message` - 受信したメッセージ本文
    ///
    /// # Returns
    ///
    /// ブロードキャストしたイベント（生成順）
    pub async fn execute(&self, sender_name: &DisplayName, raw_message: &str) -> Vec<ChatEvent> {
        let mut events = Vec::new();

        match classify_message(raw_message) {
            // 1. メディアコマンド: 固定の再生ページを埋め込む
            InboundCommand::MediaRequest => {
                let event = match build_media_embed(&self.media_embed_url) {
                    Ok(markup) => ChatEvent::Message {
                        sender_name: sender_name.clone(),
                        body: markup,
                        kind: MessageKind::Media,
                    },
                    Err(e) => {
                        tracing::warn!("Failed to build media embed markup: {}", e);
                        ChatEvent::Message {
                            sender_name: sender_name.clone(),
                            body: MEDIA_EMBED_FAILED_MESSAGE.to_string(),
                            kind: MessageKind::Error,
                        }
                    }
                };
                events.push(self.broadcast(event).await);
            }
            // 2. 自動応答コマンド: 質問の原文を見せてから bot が応答する
            InboundCommand::ResponderRequest(question) => {
                let echo = ChatEvent::Message {
                    sender_name: sender_name.clone(),
                    body: raw_message.to_string(),
                    kind: MessageKind::Plain,
                };
                events.push(self.broadcast(echo).await);

                let reply = match self.responder.respond(&question) {
                    Ok(reply) => reply,
                    Err(e) => {
                        tracing::error!("Responder engine failed: {}", e);
                        RESPONDER_APOLOGY.to_string()
                    }
                };
                let bot_event = ChatEvent::Message {
                    sender_name: self.bot_name.clone(),
                    body: reply,
                    kind: MessageKind::Plain,
                };
                events.push(self.broadcast(bot_event).await);
            }
            // 3, 4. メンション付き・通常メッセージ: そのままブロードキャスト
            InboundCommand::MentionOther(text) | InboundCommand::Plain(text) => {
                let event = ChatEvent::Message {
                    sender_name: sender_name.clone(),
                    body: text,
                    kind: MessageKind::Plain,
                };
                events.push(self.broadcast(event).await);
            }
        }

        events
    }

    /// 在室中の全接続へイベントを配信する
    async fn broadcast(&self, event: ChatEvent) -> ChatEvent {
        let targets = self.registry.broadcast_targets().await;
        self.broadcaster.broadcast(targets, &event).await;
        event
    }
}
