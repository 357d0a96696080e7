//! Value Object 定義
//!
//! 不変条件を型で保証する値オブジェクト群。
//! 生成時にバリデーションを行い、不正な値の存在を許さない。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 表示名の最大文字数
pub const MAX_DISPLAY_NAME_CHARS: usize = 32;

/// クライアントが join 時に名乗る表示名
///
/// ## 不変条件
///
/// - 空文字・空白のみの文字列ではない
/// - 32 文字以内
/// - 制御文字を含まない
///
/// 表示名は生成後に変更されない（改名は leave + join で表現される）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// バリデーション付きで表示名を生成
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.trim().is_empty() {
            return Err(ValueObjectError::EmptyDisplayName);
        }
        if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
            return Err(ValueObjectError::DisplayNameTooLong(MAX_DISPLAY_NAME_CHARS));
        }
        if name.chars().any(|c| c.is_control()) {
            return Err(ValueObjectError::DisplayNameContainsControlCharacter);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 一つの transport チャンネルを表すプロセス内で一意なトークン
///
/// 接続の確立時に採番され、切断とともに破棄される。
/// セッション（ui 層）が所有し、registry / broadcaster のキーとして使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい ConnectionId を採番
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_accepts_valid_name() {
        // テスト項目: 通常の表示名が生成できる
        // given (前提条件):
        let raw = "alice".to_string();

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_display_name_accepts_multibyte_name() {
        // テスト項目: マルチバイト文字の表示名が生成できる
        // given (前提条件):
        let raw = "川小农".to_string();

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "川小农");
    }

    #[test]
    fn test_display_name_rejects_empty_string() {
        // テスト項目: 空文字列が拒否される
        // given (前提条件):
        let raw = "".to_string();

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyDisplayName));
    }

    #[test]
    fn test_display_name_rejects_whitespace_only() {
        // テスト項目: 空白のみの文字列が拒否される
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyDisplayName));
    }

    #[test]
    fn test_display_name_rejects_too_long_name() {
        // テスト項目: 32 文字を超える表示名が拒否される
        // given (前提条件):
        let raw = "a".repeat(MAX_DISPLAY_NAME_CHARS + 1);

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::DisplayNameTooLong(MAX_DISPLAY_NAME_CHARS))
        );
    }

    #[test]
    fn test_display_name_accepts_max_length_name() {
        // テスト項目: ちょうど 32 文字の表示名は許可される
        // given (前提条件):
        let raw = "あ".repeat(MAX_DISPLAY_NAME_CHARS);

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_display_name_rejects_control_characters() {
        // テスト項目: 制御文字を含む表示名が拒否される
        // given (前提条件):
        let raw = "ali\nce".to_string();

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::DisplayNameContainsControlCharacter)
        );
    }

    #[test]
    fn test_connection_id_is_unique() {
        // テスト項目: ConnectionId が採番ごとに一意になる
        // given (前提条件):

        // when (操作):
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_connection_id_display_is_stable() {
        // テスト項目: 同じ ConnectionId は同じ文字列表現を持つ
        // given (前提条件):
        let id = ConnectionId::new();

        // when (操作):
        let s1 = id.to_string();
        let s2 = id.to_string();

        // then (期待する結果):
        assert_eq!(s1, s2);
    }
}
