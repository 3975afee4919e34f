//! # 問い合わせハンドラ
//!
//! Web サイトのフォームから送信される問い合わせを受け付け、管理者にメールで通知する。
//!
//! ## エンドポイント
//!
//! - `POST /quote` - 見積もり依頼（管理者通知 + 顧客への受付確認）
//! - `POST /send-email` - 注文問い合わせ（カート内容の通知）
//! - `POST /catalog-request` - カタログ請求

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use storefront_domain::inquiry::{
    CatalogRequest,
    CustomerContact,
    InquiryId,
    LineItem,
    OrderInquiry,
    QuoteRequest,
};

use super::{log_notification_failure, notification_failure, parse_body};
use crate::{
    error::{INVALID_BODY, WebError},
    usecase::{BulkDispatcher, InquiryNotifier},
};

/// 通知 API の共有状態
pub struct NotificationState {
    pub notifier:   InquiryNotifier,
    pub dispatcher: BulkDispatcher,
}

// --- リクエスト/レスポンス型 ---

/// 見積もり依頼リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequestBody {
    pub first_name:     String,
    pub last_name:      String,
    pub email:          String,
    pub contact_number: String,
    pub street_address: String,
    #[serde(default)]
    pub company:        Option<String>,
    pub message:        String,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

impl From<QuoteRequestBody> for QuoteRequest {
    fn from(body: QuoteRequestBody) -> Self {
        Self {
            customer:       CustomerContact {
                first_name:     body.first_name,
                last_name:      body.last_name,
                email:          body.email,
                phone:          Some(body.contact_number),
                street_address: body.street_address,
                apartment:      None,
                company:        body.company.filter(|c| !c.is_empty()),
            },
            message:        body.message,
            attachment_url: body.attachment_url.filter(|url| !url.is_empty()),
        }
    }
}

/// 見積もり依頼レスポンス
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub message: &'static str,
    pub id:      InquiryId,
}

/// 注文問い合わせの顧客情報
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailsBody {
    pub first_name:     String,
    pub last_name:      String,
    pub email:          String,
    #[serde(default)]
    pub phone:          Option<String>,
    pub street_address: String,
    #[serde(default)]
    pub apartment:      Option<String>,
    #[serde(default)]
    pub order_notes:    Option<String>,
}

/// 数量の指定
///
/// カートの実装によって数値でも文字列でも送られてくるため、両方を受け付ける。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuantityField {
    Number(serde_json::Number),
    Text(String),
}

impl QuantityField {
    fn into_text(self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text,
        }
    }
}

/// 注文明細
#[derive(Debug, Deserialize)]
pub struct LineItemBody {
    pub name:     String,
    #[serde(default)]
    pub quantity: Option<QuantityField>,
    #[serde(default)]
    pub image:    Option<String>,
    #[serde(default)]
    pub sku:      Option<String>,
}

/// 注文問い合わせリクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInquiryBody {
    pub customer_details: CustomerDetailsBody,
    #[serde(default)]
    pub items:            Vec<LineItemBody>,
    pub inquiry_id:       String,
}

impl From<OrderInquiryBody> for OrderInquiry {
    fn from(body: OrderInquiryBody) -> Self {
        let details = body.customer_details;
        Self {
            inquiry_id:  InquiryId::from_client(body.inquiry_id),
            customer:    CustomerContact {
                first_name:     details.first_name,
                last_name:      details.last_name,
                email:          details.email,
                phone:          details.phone.filter(|p| !p.is_empty()),
                street_address: details.street_address,
                apartment:      details.apartment.filter(|a| !a.is_empty()),
                company:        None,
            },
            order_notes: details.order_notes.filter(|n| !n.is_empty()),
            items:       body
                .items
                .into_iter()
                .map(|item| LineItem {
                    name:     item.name,
                    quantity: item
                        .quantity
                        .map(QuantityField::into_text)
                        .unwrap_or_default(),
                    image:    item.image.filter(|i| !i.is_empty()),
                    sku:      item.sku.filter(|s| !s.is_empty()),
                })
                .collect(),
        }
    }
}

/// 注文問い合わせレスポンス
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// カタログ請求リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRequestBody {
    pub name:          String,
    pub email:         String,
    pub catalog_title: String,
}

/// カタログ請求レスポンス
///
/// 成功・失敗ともに `{"message": ...}` の形で返す。
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// --- ハンドラ ---

/// POST /quote
///
/// ## レスポンス
///
/// - `200 OK`: `{"message": "Quote request sent", "id": "..."}`
/// - `400 Bad Request`: ボディが不正
/// - `500 Internal Server Error`: メール送信に失敗
#[tracing::instrument(skip_all)]
pub async fn send_quote(
    State(state): State<Arc<NotificationState>>,
    payload: Result<Json<QuoteRequestBody>, JsonRejection>,
) -> Result<Json<QuoteResponse>, WebError> {
    let request: QuoteRequest = parse_body(payload)?.into();

    let id = state
        .notifier
        .send_quote(&request)
        .await
        .map_err(|e| notification_failure(&e, "Failed to send quote request"))?;

    Ok(Json(QuoteResponse {
        message: "Quote request sent",
        id,
    }))
}

/// POST /send-email
///
/// ## レスポンス
///
/// - `200 OK`: `{"success": true}`
/// - `400 Bad Request`: ボディが不正
/// - `500 Internal Server Error`: メール送信に失敗
#[tracing::instrument(skip_all)]
pub async fn send_order_inquiry(
    State(state): State<Arc<NotificationState>>,
    payload: Result<Json<OrderInquiryBody>, JsonRejection>,
) -> Result<Json<SuccessResponse>, WebError> {
    let inquiry: OrderInquiry = parse_body(payload)?.into();

    state
        .notifier
        .send_order_inquiry(&inquiry)
        .await
        .map_err(|e| notification_failure(&e, "Failed to send email"))?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /catalog-request
///
/// 他のエンドポイントと異なり、エラー時も `{"message": ...}` を返す。
///
/// ## レスポンス
///
/// - `200 OK`: `{"message": "Success"}`
/// - `400 Bad Request`: `{"message": "Invalid request body"}`
/// - `500 Internal Server Error`: `{"message": "Failed"}`
#[tracing::instrument(skip_all)]
pub async fn send_catalog_request(
    State(state): State<Arc<NotificationState>>,
    payload: Result<Json<CatalogRequestBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse {
                message: INVALID_BODY,
            }),
        )
            .into_response();
    };

    let request = CatalogRequest {
        name:          body.name,
        email:         body.email,
        catalog_title: body.catalog_title,
    };

    match state.notifier.send_catalog_request(&request).await {
        Ok(()) => Json(MessageResponse { message: "Success" }).into_response(),
        Err(e) => {
            log_notification_failure(&e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse { message: "Failed" }),
            )
                .into_response()
        }
    }
}
