//! # Storefront Web サーバー
//!
//! マーケティングサイトのバックエンド。公開ページの配信と、フォームからの
//! 問い合わせ・一括送信・署名付きリンク発行・アカウント登録の API を提供する。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────────┐
//! │   Browser    │────▶│     Web      │────▶│ SMTP / SES（メール）   │
//! │              │     │  port: 3000  │────▶│ S3（署名付き URL）     │
//! └──────────────┘     └──────────────┘────▶│ DynamoDB（アカウント） │
//!                                           └──────────────────────┘
//! ```
//!
//! テストから内部モジュールへアクセスできるよう、ライブラリとして公開する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;

#[cfg(test)]
mod test_utils;
