//! サーバー設定
//!
//! `config.json` の読み書きを担当します。ファイルが無ければ既定値で動作し、
//! 手で編集するためのテンプレートとして既定値をファイルへ書き出します。
//! 壊れたファイルは起動エラーになります（黙って既定値で上書きすると
//! 編集中の設定を失うため）。

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::usecase::DEFAULT_MEDIA_EMBED_URL;

/// 設定の読み書きで発生するエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 設定ファイルの読み書きに失敗した
    #[error("failed to read or write config file: {0}")]
    Io(#[from] std::io::Error),
    /// 設定ファイルを JSON として解釈できなかった
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// クライアントに提示する接続先サーバー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEndpoint {
    /// 表示名
    pub name: String,
    /// 接続先 URL
    pub url: String,
}

/// サーバー設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// クライアントの接続先候補（`/api/config` でそのまま返す）
    #[serde(default = "default_server_addresses")]
    pub server_addresses: Vec<ServerEndpoint>,
    /// メディアコマンドが埋め込む再生ページ URL
    #[serde(default = "default_media_embed_url")]
    pub media_embed_url: String,
}

fn default_server_addresses() -> Vec<ServerEndpoint> {
    vec![
        ServerEndpoint {
            name: "本地服务器".to_string(),
            url: "http://localhost:8080".to_string(),
        },
        ServerEndpoint {
            name: "备用服务器1".to_string(),
            url: "http://192.168.1.100:8080".to_string(),
        },
        ServerEndpoint {
            name: "备用服务器2".to_string(),
            url: "http://192.168.1.101:8080".to_string(),
        },
    ]
}

fn default_media_embed_url() -> String {
    DEFAULT_MEDIA_EMBED_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addresses: default_server_addresses(),
            media_embed_url: default_media_embed_url(),
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む。無ければ既定値で作成する
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = serde_json::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.save(path)?;
                tracing::info!("Created default config file at '{}'", path.display());
                Ok(config)
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// 現在の設定をファイルへ保存する
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("daiptalk-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("config.json")
    }

    #[test]
    fn test_default_config_has_three_server_addresses() {
        // テスト項目: 既定の接続先候補が三つ定義されている
        // given (前提条件) / when (操作):
        let config = Config::default();

        // then (期待する結果):
        assert_eq!(config.server_addresses.len(), 3);
        assert_eq!(config.server_addresses[0].name, "本地服务器");
        assert_eq!(config.server_addresses[0].url, "http://localhost:8080");
    }

    #[test]
    fn test_default_media_embed_url() {
        // テスト項目: 既定の埋め込み URL が dispatcher の既定値と一致する
        // given (前提条件) / when (操作):
        let config = Config::default();

        // then (期待する結果):
        assert_eq!(config.media_embed_url, DEFAULT_MEDIA_EMBED_URL);
    }

    #[test]
    fn test_deserialize_full_config() {
        // テスト項目: 完全な設定ファイルを読める
        // given (前提条件):
        let json = r#"{
            "server_addresses": [
                {"name": "测试服务器", "url": "http://example.com:8080"}
            ],
            "media_embed_url": "https://example.com/player"
        }"#;

        // when (操作):
        let config: Config = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(config.server_addresses.len(), 1);
        assert_eq!(config.server_addresses[0].name, "测试服务器");
        assert_eq!(config.media_embed_url, "https://example.com/player");
    }

    #[test]
    fn test_deserialize_partial_config_falls_back_to_defaults() {
        // テスト項目: 欠けているフィールドは既定値で補われる
        // given (前提条件):
        let json = r#"{"media_embed_url": "https://example.com/player"}"#;

        // when (操作):
        let config: Config = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(config.server_addresses, default_server_addresses());
        assert_eq!(config.media_embed_url, "https://example.com/player");
    }

    #[test]
    fn test_serde_roundtrip_preserves_non_ascii_names() {
        // テスト項目: 非 ASCII の表示名がそのまま往復する
        // given (前提条件):
        let config = Config::default();

        // when (操作):
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(back, config);
        assert!(json.contains("本地服务器"));
    }

    #[test]
    fn test_load_or_init_creates_file_with_defaults() {
        // テスト項目: ファイルが無ければ既定値で作成される
        // given (前提条件):
        let path = temp_config_path();

        // when (操作):
        let config = Config::load_or_init(&path).unwrap();

        // then (期待する結果):
        assert_eq!(config, Config::default());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("本地服务器"));
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_load_or_init_reads_existing_file() {
        // テスト項目: 既存のファイルが既定値で上書きされない
        // given (前提条件):
        let path = temp_config_path();
        std::fs::write(
            &path,
            r#"{"server_addresses": [], "media_embed_url": "https://example.com/player"}"#,
        )
        .unwrap();

        // when (操作):
        let config = Config::load_or_init(&path).unwrap();

        // then (期待する結果):
        assert!(config.server_addresses.is_empty());
        assert_eq!(config.media_embed_url, "https://example.com/player");
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_load_or_init_with_corrupt_file_is_an_error() {
        // テスト項目: 壊れたファイルは黙って上書きせずエラーになる
        // given (前提条件):
        let path = temp_config_path();
        std::fs::write(&path, "{ not json").unwrap();

        // when (操作):
        let result = Config::load_or_init(&path);

        // then (期待する結果): エラーになり、ファイルは書き換えられない
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
