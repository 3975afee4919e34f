//! # Storefront 共有ユーティリティ
//!
//! このクレートは、Storefront プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - web / infra のどちらからも依存できる
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換は web 側の責務）

pub mod error_response;
pub mod event_log;
pub mod health;
#[cfg(feature = "observability")]
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
