//! ResponderEngine trait 定義
//!
//! 自動応答（bot）の応答生成を抽象化します。
//! 同梱実装はキーワード表ベースの純粋関数（Infrastructure 層）。

#[cfg(test)]
use mockall::automock;

use super::ResponderError;

/// 自動応答エンジン
///
/// 純粋な text-in / text-out の関数として扱う。I/O を持たないため同期 trait。
/// dispatcher はエラーを bot 名義の謝罪メッセージへ変換するので、
/// このエラーがセッションを落とすことはない。
#[cfg_attr(test, automock)]
pub trait ResponderEngine: Send + Sync {
    /// 質問文に対する応答を生成する
    fn respond(&self, question: &str) -> Result<String, ResponderError>;
}

/// フォールバック応答の選択戦略
///
/// キーワードに一致しなかったときの応答を候補から一つ選ぶ。
/// 本番は一様乱数、テストでは決定的な実装を注入する。
pub trait ReplySelector: Send + Sync {
    /// 候補から応答を一つ選ぶ。候補が空の場合は `None`
    fn pick<'a>(&self, candidates: &[&'a str]) -> Option<&'a str>;
}
