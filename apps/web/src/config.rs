//! # Web サーバー設定
//!
//! 環境変数から Web サーバーの設定を読み込む。
//!
//! すべての変数に既定値があり、未設定でも起動できる。
//! 数値・列挙値・パスの形式が不正な場合のみ [`ConfigError`] を返す。

use std::{env, str::FromStr, time::Duration};

use storefront_infra::notification::{NotificationBackend, SenderSettings};
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 数値として解釈できない
    #[error("{name} は数値である必要があります: {value}")]
    InvalidNumber { name: &'static str, value: String },

    /// `/` で始まらないパス
    #[error("{name} は / で始まる必要があります: {value}")]
    InvalidPath { name: &'static str, value: String },

    /// 未知の通知バックエンド
    #[error("NOTIFICATION_BACKEND は smtp / ses / noop のいずれかです: {0}")]
    InvalidBackend(String),
}

/// Web サーバーの設定
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// 静的ファイルのルートディレクトリ
    pub public_dir:   String,
    pub session_gate: SessionGateConfig,
    pub notification: NotificationConfig,
    pub storage:      StorageConfig,
    pub accounts:     AccountStoreConfig,
}

/// セッションゲートの設定
#[derive(Debug, Clone)]
pub struct SessionGateConfig {
    /// 管理画面のパス（配下のパスも含む）
    pub admin_path:  String,
    /// ログイン画面のパス（`public/login.html` を返す）
    pub login_path:  String,
    /// セッション Cookie の名前
    pub cookie_name: String,
}

/// メール通知の設定
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub sender:               SenderSettings,
    /// 見積もり依頼・カタログ請求の通知先
    pub quote_notify_address: String,
    /// 注文問い合わせの通知先
    pub order_notify_address: String,
}

/// ファイルストレージ（署名付き URL）の設定
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// MinIO 等のカスタムエンドポイント（未設定なら AWS S3）
    pub endpoint_url:   Option<String>,
    pub bucket_name:    String,
    /// オブジェクトキーの接頭辞
    pub key_prefix:     String,
    /// 署名付き URL の有効期限
    pub signed_url_ttl: Duration,
}

/// アカウントストア（DynamoDB）の設定
#[derive(Debug, Clone)]
pub struct AccountStoreConfig {
    /// DynamoDB Local 等のカスタムエンドポイント（未設定なら AWS）
    pub endpoint_url: Option<String>,
    pub table_name:   String,
}

impl WebConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    ///
    /// テストではプロセスの環境変数を書き換えずに検証するため、この関数を直接使う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let optional = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let backend_name = var("NOTIFICATION_BACKEND", "noop");
        let backend = NotificationBackend::from_str(&backend_name)
            .map_err(|_| ConfigError::InvalidBackend(backend_name))?;

        Ok(Self {
            host: var("WEB_HOST", "0.0.0.0"),
            port: parse_number("WEB_PORT", lookup("WEB_PORT"), 3000)?,
            public_dir: var("PUBLIC_DIR", "public"),
            session_gate: SessionGateConfig {
                admin_path:  parse_path("ADMIN_PATH", var("ADMIN_PATH", "/admin"))?,
                login_path:  parse_path("LOGIN_PATH", var("LOGIN_PATH", "/login"))?,
                cookie_name: var("SESSION_COOKIE_NAME", "session"),
            },
            notification: NotificationConfig {
                sender:               SenderSettings {
                    backend,
                    smtp_host: var("SMTP_HOST", "localhost"),
                    smtp_port: parse_number("SMTP_PORT", lookup("SMTP_PORT"), 1025)?,
                    from_address: var(
                        "NOTIFICATION_FROM_ADDRESS",
                        "noreply@storefront.example.com",
                    ),
                },
                quote_notify_address: var("QUOTE_NOTIFY_ADDRESS", "quotes@storefront.example.com"),
                order_notify_address: var("ORDER_NOTIFY_ADDRESS", "orders@storefront.example.com"),
            },
            storage: StorageConfig {
                endpoint_url:   optional("S3_ENDPOINT_URL"),
                bucket_name:    var("S3_BUCKET_NAME", "storefront-documents"),
                key_prefix:     var("SIGNED_URL_KEY_PREFIX", ""),
                signed_url_ttl: Duration::from_secs(parse_number(
                    "SIGNED_URL_TTL_SECS",
                    lookup("SIGNED_URL_TTL_SECS"),
                    3600,
                )?),
            },
            accounts: AccountStoreConfig {
                endpoint_url: optional("DYNAMODB_ENDPOINT"),
                table_name:   var("ACCOUNTS_TABLE", "accounts"),
            },
        })
    }
}

/// 数値の環境変数を読み込む（未設定なら既定値）
fn parse_number<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

/// ルーティングに使うパスを検証する
fn parse_path(name: &'static str, value: String) -> Result<String, ConfigError> {
    if value.starts_with('/') && value.len() > 1 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidPath { name, value })
    }
}
