//! ログ出力のみの通知送信
//!
//! `NOTIFICATION_BACKEND` の既定値。SMTP サーバーも SES も無いローカル環境で
//! フォーム送信を成功扱いにし、本来届くはずだったメールの宛先・差出人名・
//! 返信先をログで確認できるようにする。
//!
//! 一括送信でも常に成功するため、`/application` の集計は全件 `successful` になる。

use async_trait::async_trait;
use storefront_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// 送信せずにログへ書き出す通知送信
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            from_name = email.from_name.as_deref().unwrap_or_default(),
            reply_to = email.reply_to.as_deref().unwrap_or_default(),
            cc = ?email.cc,
            text_len = email.text_body.len(),
            "通知バックエンド未設定のため送信せずに記録"
        );
        Ok(())
    }
}
