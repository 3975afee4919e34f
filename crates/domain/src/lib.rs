//! # Storefront ドメイン層
//!
//! 問い合わせ・通知・アカウントに関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 問い合わせ ID やロールなど、不変の値を型で表現する
//! - **閉じた列挙型**: ロールやアクセスレベルは許可リストを型で強制する
//! - **ドメインエラー**: 入力検証の失敗を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! web → infra → domain
//!         ↘
//!          shared
//! ```
//!
//! ドメイン層は外部サービス（メール送信、ストレージ、データストア）に
//! 一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`account`] - アカウントとロール正規化
//! - [`clock`] - 時刻プロバイダ（テストで固定時刻を注入）
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`inquiry`] - 見積もり・注文問い合わせ・カタログ請求
//! - [`notification`] - メールメッセージと一括送信の集計結果
//!
//! ## 使用例
//!
//! ```rust
//! use storefront_domain::account::{AccessLevel, AccountRole};
//!
//! let role = AccountRole::normalize(Some("ADMIN"));
//! assert_eq!(role, AccountRole::Admin);
//! assert_eq!(role.access_level(), AccessLevel::Full);
//! ```

pub mod account;
pub mod clock;
pub mod error;
pub mod inquiry;
pub mod notification;

pub use error::DomainError;
