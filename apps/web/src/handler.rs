//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | ハンドラ |
//! |---------|------|---------|
//! | POST | `/application` | [`send_bulk_email`] |
//! | POST | `/quote` | [`send_quote`] |
//! | POST | `/send-email` | [`send_order_inquiry`] |
//! | POST | `/catalog-request` | [`send_catalog_request`] |
//! | GET | `/getSignedPDF` | [`get_signed_pdf`] |
//! | POST | `/auth/register` | [`register_account`] |
//! | GET | `/health` | [`health_check`] |

pub mod account;
pub mod bulk;
pub mod document;
pub mod health;
pub mod inquiry;

pub use account::{AccountState, register_account};
use axum::{Json, extract::rejection::JsonRejection};
pub use bulk::send_bulk_email;
pub use document::{DocumentState, get_signed_pdf};
pub use health::health_check;
pub use inquiry::{NotificationState, send_catalog_request, send_order_inquiry, send_quote};
use storefront_domain::notification::NotificationError;
use storefront_shared::event_log::error;

use crate::error::WebError;

/// JSON ボディの抽出結果を取り出す
///
/// 構文エラー・必須フィールドの欠落・型の不一致はすべて
/// `400 {"error": "Invalid request body"}` にまとめる。
pub(crate) fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, WebError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "リクエストボディが不正");
        WebError::invalid_body()
    })
}

/// 通知の送信失敗をログに記録し、500 エラーに変換する
pub(crate) fn notification_failure(err: &NotificationError, message: &str) -> WebError {
    log_notification_failure(err);
    WebError::internal(message)
}

/// 通知の送信失敗をエラーコンテキスト付きでログに記録する
pub(crate) fn log_notification_failure(err: &NotificationError) {
    let kind = match err {
        NotificationError::SendFailed(_) => error::kind::EMAIL_DELIVERY,
        NotificationError::TemplateFailed(_) => error::kind::TEMPLATE,
    };
    tracing::error!(
        error.category = error::category::EXTERNAL_SERVICE,
        error.kind = kind,
        "通知の送信に失敗: {err}"
    );
}
