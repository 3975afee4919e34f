//! # 問い合わせ通知
//!
//! 見積もり依頼・注文問い合わせ・カタログ請求を管理者（と顧客）にメールで届ける。
//!
//! ## 設計方針
//!
//! - **fail-hard**: 一括送信と異なり、送信失敗はそのまま呼び出し元に返す
//! - **並行送信**: 見積もり依頼の 2 通（管理者通知 + 受付確認）は同時に送り、両方の完了を待つ
//! - **再送しない**: リトライは行わない

use std::sync::Arc;

use storefront_domain::{
    inquiry::{CatalogRequest, InquiryId, OrderInquiry, QuoteRequest},
    notification::{EmailMessage, NotificationError},
};
use storefront_infra::notification::NotificationSender;
use storefront_shared::{event_log::event, log_business_event};

use super::{OutgoingNotification, TemplateRenderer};

/// 問い合わせ通知サービス
pub struct InquiryNotifier {
    sender:               Arc<dyn NotificationSender>,
    renderer:             Arc<TemplateRenderer>,
    /// 見積もり依頼・カタログ請求の通知先
    quote_notify_address: String,
    /// 注文問い合わせの通知先
    order_notify_address: String,
}

impl InquiryNotifier {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        renderer: Arc<TemplateRenderer>,
        quote_notify_address: String,
        order_notify_address: String,
    ) -> Self {
        Self {
            sender,
            renderer,
            quote_notify_address,
            order_notify_address,
        }
    }

    /// 見積もり依頼を送信する
    ///
    /// 問い合わせ ID を発行し、管理者への通知と顧客への受付確認を並行して送る。
    /// どちらか一方でも失敗した場合はエラーを返す（管理者通知のエラーを優先）。
    #[tracing::instrument(skip_all, fields(customer.email = %request.customer.email))]
    pub async fn send_quote(&self, request: &QuoteRequest) -> Result<InquiryId, NotificationError> {
        let id = InquiryId::generate();

        let admin = self.renderer.render(
            &OutgoingNotification::QuoteAdmin {
                id:      &id,
                request,
            },
            &self.quote_notify_address,
        )?;
        let ack = self.renderer.render(
            &OutgoingNotification::QuoteAck {
                id:      &id,
                request,
            },
            &request.customer.email,
        )?;

        let (admin_result, ack_result) =
            tokio::join!(self.deliver(&admin, &id), self.deliver(&ack, &id));
        admin_result?;
        ack_result?;

        Ok(id)
    }

    /// 注文問い合わせを送信する
    ///
    /// 問い合わせ ID はクライアントが発行したものをそのまま使う。
    #[tracing::instrument(skip_all, fields(inquiry_id = %inquiry.inquiry_id))]
    pub async fn send_order_inquiry(&self, inquiry: &OrderInquiry) -> Result<(), NotificationError> {
        let email = self.renderer.render(
            &OutgoingNotification::OrderAdmin { inquiry },
            &self.order_notify_address,
        )?;
        self.deliver(&email, &inquiry.inquiry_id).await
    }

    /// カタログ請求を送信する
    #[tracing::instrument(skip_all)]
    pub async fn send_catalog_request(
        &self,
        request: &CatalogRequest,
    ) -> Result<(), NotificationError> {
        let id = InquiryId::generate();
        let email = self.renderer.render(
            &OutgoingNotification::CatalogRequest { request },
            &self.quote_notify_address,
        )?;
        self.deliver(&email, &id).await
    }

    /// 1 通送信し、結果をビジネスイベントとして記録する
    async fn deliver(&self, email: &EmailMessage, id: &InquiryId) -> Result<(), NotificationError> {
        match self.sender.send_email(email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::INQUIRY,
                    event.entity_id = %id,
                    event.result = event::result::SUCCESS,
                    notification.recipient = %email.to,
                    "通知メール送信成功"
                );
                Ok(())
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::INQUIRY,
                    event.entity_id = %id,
                    event.result = event::result::FAILURE,
                    notification.recipient = %email.to,
                    error = %e,
                    "通知メール送信失敗"
                );
                Err(e)
            }
        }
    }
}
