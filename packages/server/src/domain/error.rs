//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object 生成時のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("display name must be at most {0} characters")]
    DisplayNameTooLong(usize),

    #[error("display name must not contain control characters")]
    DisplayNameContainsControlCharacter,
}

/// PresenceRegistry の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 既に同名の参加者が登録済み
    #[error("display name '{0}' is already taken")]
    NameTaken(String),
}

/// RoomBroadcaster の送信エラー
///
/// broadcast では個別の送信失敗はログに落として握りつぶすため、
/// このエラーが返るのは単一送信（send_to）のみ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    /// 宛先の接続が登録されていない
    #[error("recipient '{0}' not found")]
    RecipientNotFound(String),

    /// 宛先のキューが閉じているか満杯
    #[error("failed to deliver to recipient '{0}': {1}")]
    DeliveryFailed(String, String),
}

/// ResponderEngine の応答生成エラー
///
/// 同梱の keyword responder は常に応答を返すが、外部サービスを使う
/// 実装に差し替えた場合の失敗経路として用意している。dispatcher は
/// このエラーを bot 名義の謝罪メッセージに変換する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponderError {
    #[error("responder engine failed: {0}")]
    EngineFailure(String),
}
