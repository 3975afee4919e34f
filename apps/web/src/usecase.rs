//! # ユースケース層
//!
//! Web アプリケーションのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: 送信・ストレージ・データストアを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラはリクエストの変換のみを行い、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `notification`: テンプレートレンダリング、問い合わせ通知、一括送信
//! - `signed_link`: 署名付きダウンロード URL の発行
//! - `account`: アカウント登録

pub mod account;
pub mod notification;
pub mod signed_link;

pub use account::AccountProvisioner;
pub use notification::{BulkDispatcher, InquiryNotifier, TemplateRenderer};
pub use signed_link::SignedLinkIssuer;
