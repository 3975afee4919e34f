//! # 一括送信
//!
//! 同一の件名・本文を複数の宛先に個別のメールとして送る。
//!
//! ## 設計方針
//!
//! - **settle-all**: 全宛先の送信を同時に開始し、すべての結果が出るまで待つ
//! - **fail-soft**: 個別の失敗でバッチを中断しない。失敗は件数としてのみ返す
//! - **順序保証なし**: 宛先間の送信順序・完了順序は規定しない

use std::sync::Arc;

use futures::future::join_all;
use storefront_domain::notification::{BulkEmail, DispatchSummary};
use storefront_infra::notification::NotificationSender;
use storefront_shared::{event_log::event, log_business_event};

use super::{OutgoingNotification, TemplateRenderer};

/// 一括送信サービス
pub struct BulkDispatcher {
    sender:   Arc<dyn NotificationSender>,
    renderer: Arc<TemplateRenderer>,
}

impl BulkDispatcher {
    pub fn new(sender: Arc<dyn NotificationSender>, renderer: Arc<TemplateRenderer>) -> Self {
        Self { sender, renderer }
    }

    /// 全宛先に送信し、成功数と失敗数を返す
    ///
    /// 戻り値の `successful + failed` は常に `email.recipients.len()` と等しい。
    /// 文字列でない宛先とレンダリングに失敗した宛先は送信せずに失敗として数える。
    #[tracing::instrument(skip_all, fields(recipients = email.recipients.len()))]
    pub async fn dispatch(&self, email: &BulkEmail) -> DispatchSummary {
        let notification = OutgoingNotification::Bulk { email };

        let sends = email
            .recipients
            .iter()
            .enumerate()
            .map(|(index, recipient)| self.send_one(&notification, index, recipient.as_deref()));

        let summary: DispatchSummary = join_all(sends).await.into_iter().collect();

        let result = if summary.failed == 0 {
            event::result::SUCCESS
        } else {
            event::result::FAILURE
        };
        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::BULK_DISPATCH_COMPLETED,
            event.result = result,
            dispatch.successful = summary.successful,
            dispatch.failed = summary.failed,
            "一括送信完了"
        );

        summary
    }

    /// 1 宛先分を送信し、成功したかどうかを返す
    async fn send_one(
        &self,
        notification: &OutgoingNotification<'_>,
        index: usize,
        recipient: Option<&str>,
    ) -> bool {
        let Some(to) = recipient else {
            tracing::warn!(recipient.index = index, "宛先が文字列ではないため送信しない");
            return false;
        };

        let message = match self.renderer.render(notification, to) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(recipient.index = index, error = %e, "一括メールのレンダリングに失敗");
                return false;
            }
        };

        match self.sender.send_email(&message).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(recipient.index = index, error = %e, "一括メールの送信に失敗");
                false
            }
        }
    }
}
