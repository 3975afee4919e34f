//! # Web エラー定義
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換。
//!
//! レスポンスボディは [`ErrorResponse`]（`{ "error": ..., "details"?: ... }`）。
//! 500 系のエラーは発生箇所で `error.category` / `error.kind` 付きのログを出力済みとし、
//! ここではレスポンスへの変換のみを行う。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storefront_domain::DomainError;
use storefront_shared::ErrorResponse;
use thiserror::Error;

/// JSON ボディが不正な場合のメッセージ
pub const INVALID_BODY: &str = "Invalid request body";

/// Web 層で発生するエラー
#[derive(Debug, Error)]
pub enum WebError {
    /// 不正なリクエスト（400 Bad Request）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 内部エラー（500 Internal Server Error）
    ///
    /// `details` には外部サービスのエラー文言をそのまま載せる場合がある。
    #[error("内部エラー: {message}")]
    Internal {
        message: String,
        details: Option<String>,
    },
}

impl WebError {
    /// JSON ボディのパースに失敗した
    pub fn invalid_body() -> Self {
        Self::BadRequest(INVALID_BODY.to_string())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            details: None,
        }
    }

    pub fn internal_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

impl From<DomainError> for WebError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::BadRequest(msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            WebError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            WebError::Internal { message, details } => {
                let body = ErrorResponse::new(message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    match details {
                        Some(details) => body.with_details(details),
                        None => body,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    async fn into_json(err: WebError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_requestは400とerrorフィールドを返す() {
        let (status, body) = into_json(WebError::BadRequest("Missing fileName".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing fileName"}));
    }

    #[tokio::test]
    async fn internalはdetailsがあればレスポンスに含める() {
        let (status, body) = into_json(WebError::internal_with_details(
            "Failed to register user",
            "DynamoDB エラー: timeout",
        ))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to register user", "details": "DynamoDB エラー: timeout"})
        );
    }

    #[tokio::test]
    async fn internalはdetailsがなければerrorのみを返す() {
        let (_, body) = into_json(WebError::internal("Failed to send email")).await;
        assert_eq!(body, json!({"error": "Failed to send email"}));
    }

    #[test]
    fn domain_errorのvalidationはbad_requestになる() {
        let err: WebError = DomainError::Validation("Missing required fields".to_string()).into();
        assert!(matches!(err, WebError::BadRequest(msg) if msg == "Missing required fields"));
    }
}
