//! キーワード表ベースの ResponderEngine 実装
//!
//! ## 責務
//!
//! - 質問文に対する bot 応答の生成（キーワード部分一致、先勝ち）
//! - 一致しない場合のフォールバック応答の選択
//!
//! ## 設計ノート
//!
//! 応答生成は純粋関数で、現在時刻だけを `Clock` 経由で注入します。
//! 実アプリケーションでは外部の LLM API を呼ぶ `ResponderEngine` 実装に
//! 差し替えられる想定です（その場合の失敗は dispatcher が謝罪文へ変換）。

use std::sync::Arc;

use rand::seq::IndexedRandom;

use daiptalk_shared::time::{Clock, format_cst_datetime};

use crate::domain::{ReplySelector, ResponderEngine, ResponderError};

/// 質問が空のときの応答（フォールバック表の先頭と同文）
pub const EMPTY_QUESTION_REPLY: &str =
    "您好！我是川小农，很高兴为您服务。请问有什么可以帮助您的吗？";

/// キーワードに一致しなかったときの応答候補
pub const FALLBACK_REPLIES: &[&str] = &[
    "您好！我是川小农，很高兴为您服务。请问有什么可以帮助您的吗？",
    "这个问题很有意思，让我想想...",
    "感谢您的提问，我会尽力为您解答。",
    "这是一个很好的观点，我同意您的看法。",
    "根据我的理解，您想了解的是...",
    "抱歉，这个问题我还需要学习一下。",
    "您说得对，我们确实应该考虑这个方面。",
];

/// 応答のテンプレート
enum ReplyTemplate {
    /// 固定文
    Text(&'static str),
    /// 現在時刻を埋め込む応答
    CurrentTime,
}

/// キーワード → 応答の対応表
///
/// 上から順に部分一致を調べ、最初に一致したものが使われる。
const KEYWORD_REPLIES: &[(&str, ReplyTemplate)] = &[
    ("你好", ReplyTemplate::Text("你好！很高兴见到你！")),
    ("您好", ReplyTemplate::Text("您好！有什么可以帮助您的吗？")),
    ("你是谁", ReplyTemplate::Text("我是川小农，一个智能聊天助手。")),
    (
        "介绍自己",
        ReplyTemplate::Text("我是川小农，您的智能聊天伙伴，随时为您提供帮助！"),
    ),
    ("谢谢", ReplyTemplate::Text("不客气！能够帮助你我很开心。")),
    ("感谢", ReplyTemplate::Text("不用谢，这是我应该做的。")),
    ("再见", ReplyTemplate::Text("再见！期待下次与你交流。")),
    ("拜拜", ReplyTemplate::Text("拜拜！有需要随时找我。")),
    ("天气", ReplyTemplate::Text("今天天气真不错！适合出去走走。")),
    ("时间", ReplyTemplate::CurrentTime),
    (
        "帮助",
        ReplyTemplate::Text("我可以回答问题、聊天、提供建议。试试@川小农 你好 吧！"),
    ),
    (
        "功能",
        ReplyTemplate::Text("我支持聊天对话、时间查询、简单问答等功能。"),
    ),
    (
        "你能做什么",
        ReplyTemplate::Text("我可以和您聊天、回答简单问题、提供帮助信息等。"),
    ),
    (
        "AI",
        ReplyTemplate::Text("是的，我是一个基于人工智能技术的聊天助手。"),
    ),
];

/// 一様乱数でフォールバック応答を選ぶ ReplySelector
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomReplySelector;

impl ReplySelector for RandomReplySelector {
    fn pick<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.choose(&mut rand::rng()).copied()
    }
}

/// キーワード表ベースの ResponderEngine 実装
pub struct KeywordResponder {
    clock: Arc<dyn Clock>,
    selector: Box<dyn ReplySelector>,
}

impl KeywordResponder {
    /// 新しい KeywordResponder を作成
    pub fn new(clock: Arc<dyn Clock>, selector: Box<dyn ReplySelector>) -> Self {
        Self { clock, selector }
    }

    fn render(&self, template: &ReplyTemplate) -> String {
        match template {
            ReplyTemplate::Text(reply) => (*reply).to_string(),
            ReplyTemplate::CurrentTime => {
                format!(
                    "现在的时间是 {}",
                    format_cst_datetime(self.clock.now_millis())
                )
            }
        }
    }
}

impl ResponderEngine for KeywordResponder {
    fn respond(&self, question: &str) -> Result<String, ResponderError> {
        // 空の質問には固定の挨拶を返す
        if question.trim().is_empty() {
            return Ok(EMPTY_QUESTION_REPLY.to_string());
        }

        // キーワード部分一致（表の順、先勝ち）
        for (keyword, template) in KEYWORD_REPLIES {
            if question.contains(keyword) {
                return Ok(self.render(template));
            }
        }

        // 一致なし: フォールバック候補から選択
        match self.selector.pick(FALLBACK_REPLIES) {
            Some(reply) => Ok(reply.to_string()),
            None => Ok(EMPTY_QUESTION_REPLY.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use daiptalk_shared::time::{FixedClock, SystemClock};

    use super::*;

    /// 常に先頭の候補を返すテスト用 selector
    struct PickFirst;

    impl ReplySelector for PickFirst {
        fn pick<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
            candidates.first().copied()
        }
    }

    /// 常に末尾の候補を返すテスト用 selector
    struct PickLast;

    impl ReplySelector for PickLast {
        fn pick<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
            candidates.last().copied()
        }
    }

    fn responder_with(selector: Box<dyn ReplySelector>) -> KeywordResponder {
        KeywordResponder::new(Arc::new(SystemClock), selector)
    }

    #[test]
    fn test_greeting_keyword_returns_greeting_reply() {
        // テスト項目: 「你好」を含む質問に挨拶を返す
        // given (前提条件):
        let responder = responder_with(Box::new(PickFirst));

        // when (操作):
        let reply = responder.respond("你好").unwrap();

        // then (期待する結果):
        assert_eq!(reply, "你好！很高兴见到你！");
    }

    #[test]
    fn test_keyword_matches_anywhere_in_question() {
        // テスト項目: キーワードは文中のどこにあっても一致する
        // given (前提条件):
        let responder = responder_with(Box::new(PickFirst));

        // when (操作):
        let reply = responder.respond("请问你是谁呀").unwrap();

        // then (期待する結果):
        assert_eq!(reply, "我是川小农，一个智能聊天助手。");
    }

    #[test]
    fn test_empty_question_returns_fixed_greeting() {
        // テスト項目: 空の質問に固定の挨拶を返す
        // given (前提条件):
        let responder = responder_with(Box::new(PickLast));

        // when (操作):
        let reply = responder.respond("").unwrap();

        // then (期待する結果):
        assert_eq!(reply, EMPTY_QUESTION_REPLY);
    }

    #[test]
    fn test_whitespace_only_question_returns_fixed_greeting() {
        // テスト項目: 空白のみの質問も空として扱う
        // given (前提条件):
        let responder = responder_with(Box::new(PickLast));

        // when (操作):
        let reply = responder.respond("   ").unwrap();

        // then (期待する結果):
        assert_eq!(reply, EMPTY_QUESTION_REPLY);
    }

    #[test]
    fn test_time_keyword_interpolates_clock_time() {
        // テスト項目: 「时间」への応答に注入した時計の時刻が入る
        // given (前提条件): 2023-01-01 00:00:00 CST
        let clock = Arc::new(FixedClock::new(1672502400000));
        let responder = KeywordResponder::new(clock, Box::new(PickFirst));

        // when (操作):
        let reply = responder.respond("时间").unwrap();

        // then (期待する結果):
        assert_eq!(reply, "现在的时间是 2023-01-01 00:00:00");
    }

    #[test]
    fn test_first_keyword_in_table_order_wins() {
        // テスト項目: 複数キーワードを含む質問は表で先にある方が勝つ
        // given (前提条件): 「天气」は「时间」より先に並んでいる
        let responder = responder_with(Box::new(PickFirst));

        // when (操作):
        let reply = responder.respond("现在的天气和时间").unwrap();

        // then (期待する結果):
        assert_eq!(reply, "今天天气真不错！适合出去走走。");
    }

    #[test]
    fn test_unmatched_question_uses_injected_selector() {
        // テスト項目: キーワード不一致時は注入された selector の選択が返る
        // given (前提条件):
        let first = responder_with(Box::new(PickFirst));
        let last = responder_with(Box::new(PickLast));

        // when (操作):
        let first_reply = first.respond("嗯嗯嗯").unwrap();
        let last_reply = last.respond("嗯嗯嗯").unwrap();

        // then (期待する結果):
        assert_eq!(first_reply, FALLBACK_REPLIES[0]);
        assert_eq!(last_reply, FALLBACK_REPLIES[FALLBACK_REPLIES.len() - 1]);
    }

    #[test]
    fn test_unmatched_question_with_random_selector_stays_in_fallback_set() {
        // テスト項目: 乱数 selector でも応答はフォールバック集合に含まれる
        // given (前提条件):
        let responder = responder_with(Box::new(RandomReplySelector));

        // when (操作) / then (期待する結果):
        for _ in 0..20 {
            let reply = responder.respond("嗯嗯嗯").unwrap();
            assert!(FALLBACK_REPLIES.contains(&reply.as_str()));
        }
    }
}
