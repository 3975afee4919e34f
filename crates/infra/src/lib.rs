//! # Storefront インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはユースケースが依存するトレイト（送信・署名・永続化）の
//! 具体的な実装を提供する。外部システムの詳細をカプセル化し、
//! ユースケースをインフラの変更から保護する。
//!
//! ## 責務
//!
//! - **メール送信**: SMTP / Amazon SES / Noop
//! - **署名付き URL**: Amazon S3（MinIO 互換）の Presigned GET URL
//! - **アカウント永続化**: Amazon DynamoDB
//!
//! ## 依存関係
//!
//! ```text
//! web → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。ドメイン層はインフラ層に依存しない。
//!
//! ## モジュール構成
//!
//! - [`dynamodb`] - DynamoDB 接続管理とテーブル自動作成
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信
//! - [`repository`] - リポジトリ実装
//! - [`s3`] - S3 接続管理と署名付き URL 生成

pub mod dynamodb;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;
pub mod s3;

pub use error::{InfraError, InfraErrorKind};
