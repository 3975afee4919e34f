//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（Mailpit 開発用）、SES（本番用）、Noop（ログのみ）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **起動時に一度だけ構築**: トランスポートはプロセス全体で共有し、リクエストごとに作らない

mod noop;
mod ses;
mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
pub use noop::NoopNotificationSender;
pub use ses::SesNotificationSender;
pub use smtp::SmtpNotificationSender;
use storefront_domain::notification::{EmailMessage, NotificationError};

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
/// SMTP / SES / Noop の 3 実装を環境変数で切り替える。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}

/// 送信バックエンドの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NotificationBackend {
    Smtp,
    Ses,
    Noop,
}

/// 送信バックエンドの接続設定
#[derive(Debug, Clone)]
pub struct SenderSettings {
    pub backend:      NotificationBackend,
    pub smtp_host:    String,
    pub smtp_port:    u16,
    /// 送信元メールアドレス（SES では検証済みであること）
    pub from_address: String,
}

/// 設定に応じた送信実装を構築する
///
/// アプリケーション起動時に一度だけ呼び出し、以後は `Arc` で共有する。
pub async fn build_sender(settings: &SenderSettings) -> Arc<dyn NotificationSender> {
    match settings.backend {
        NotificationBackend::Smtp => {
            tracing::info!(
                host = %settings.smtp_host,
                port = settings.smtp_port,
                "SMTP 通知送信を使用します"
            );
            Arc::new(SmtpNotificationSender::new(
                &settings.smtp_host,
                settings.smtp_port,
                settings.from_address.clone(),
            ))
        }
        NotificationBackend::Ses => {
            tracing::info!("SES 通知送信を使用します");
            let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            Arc::new(SesNotificationSender::new(
                aws_sdk_sesv2::Client::new(&config),
                settings.from_address.clone(),
            ))
        }
        NotificationBackend::Noop => {
            tracing::info!("Noop 通知送信を使用します（メールは送信されません）");
            Arc::new(NoopNotificationSender)
        }
    }
}

/// 差出人表示名付きの送信元を組み立てる
///
/// 表示名がなければアドレスのみ、あれば `"表示名" <address>` 形式。
fn sender_mailbox(from_name: Option<&str>, from_address: &str) -> String {
    match from_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("\"{}\" <{}>", name.replace('"', ""), from_address),
        None => from_address.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("smtp", NotificationBackend::Smtp)]
    #[case("SES", NotificationBackend::Ses)]
    #[case("noop", NotificationBackend::Noop)]
    fn バックエンド名を大文字小文字を区別せずに解釈する(
        #[case] input: &str,
        #[case] expected: NotificationBackend,
    ) {
        assert_eq!(NotificationBackend::from_str(input).unwrap(), expected);
    }

    #[test]
    fn 未知のバックエンド名はエラーになる() {
        assert!(NotificationBackend::from_str("sendgrid").is_err());
    }

    #[rstest]
    #[case(None, "noreply@example.com")]
    #[case(Some(""), "noreply@example.com")]
    #[case(Some("  "), "noreply@example.com")]
    #[case(Some("Acme Sales"), "\"Acme Sales\" <noreply@example.com>")]
    #[case(Some("Say \"Hi\""), "\"Say Hi\" <noreply@example.com>")]
    fn 送信元は表示名の有無で形式が変わる(
        #[case] from_name: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(sender_mailbox(from_name, "noreply@example.com"), expected);
    }

    #[tokio::test]
    async fn noopバックエンドでは送信が常に成功する() {
        let sender = build_sender(&SenderSettings {
            backend:      NotificationBackend::Noop,
            smtp_host:    "localhost".to_string(),
            smtp_port:    1025,
            from_address: "noreply@example.com".to_string(),
        })
        .await;

        let email = EmailMessage {
            to: "someone@example.com".to_string(),
            ..Default::default()
        };
        assert!(sender.send_email(&email).await.is_ok());
    }
}
