//! # 通知ユースケース
//!
//! 問い合わせ通知と一括送信を担当する。どちらもテンプレートレンダラーでメールを生成し、
//! `NotificationSender` で送る。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによるメール生成
//! - [`notifier`] - 見積もり依頼・注文問い合わせ・カタログ請求（失敗は呼び出し元へ）
//! - [`dispatcher`] - 一括送信（失敗は件数として集計）

pub mod dispatcher;
pub mod notifier;
pub mod template_renderer;

pub use dispatcher::BulkDispatcher;
pub use notifier::InquiryNotifier;
pub use template_renderer::{OutgoingNotification, TemplateRenderer};
