//! # ドメイン層エラー定義
//!
//! 入力値の検証失敗を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 必須フィールドの欠落・形式不正 |
//!
//! ## 使用例
//!
//! ```rust
//! use storefront_domain::DomainError;
//!
//! fn require(value: Option<&str>) -> Result<&str, DomainError> {
//!     value
//!         .filter(|v| !v.is_empty())
//!         .ok_or_else(|| DomainError::Validation("Missing required fields".to_string()))
//! }
//!
//! assert!(require(None).is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、400 レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// メッセージはそのままクライアントに返すため、短い機械可読な文言にする。
    #[error("{0}")]
    Validation(String),
}
