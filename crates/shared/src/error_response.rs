//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は web 側の責務（shared に axum 依存を入れない）
//! - `error` はクライアントが分岐に使う短い固定文言、`details` は上流サービスの
//!   エラー内容をそのまま載せる任意フィールド

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// ```json
/// { "error": "Failed to register user", "details": "DynamoDB エラー: ..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error:   String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// `details` なしのエラーレスポンス
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error:   error.into(),
            details: None,
        }
    }

    /// 上流サービスのエラー内容を `details` に付与する
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_detailsなしではerrorフィールドのみを出力する() {
        let json = serde_json::to_value(ErrorResponse::new("Missing fileName")).unwrap();

        assert_eq!(json, serde_json::json!({"error": "Missing fileName"}));
    }

    #[test]
    fn test_with_detailsでdetailsフィールドが追加される() {
        let error = ErrorResponse::new("Failed to register user").with_details("timeout");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"error": "Failed to register user", "details": "timeout"})
        );
    }

    #[test]
    fn test_jsonデシリアライズでdetailsは省略可能() {
        let error: ErrorResponse =
            serde_json::from_str(r#"{"error": "Invalid request body"}"#).unwrap();

        assert_eq!(error, ErrorResponse::new("Invalid request body"));
    }
}
