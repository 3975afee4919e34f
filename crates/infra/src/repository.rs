//! # リポジトリ実装
//!
//! ドメインエンティティの永続化を担当するリポジトリの具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケースはトレイトにのみ依存する
//! - **データストア抽象化**: DynamoDB 固有の処理（AttributeValue 変換）をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod account_repository;

pub use account_repository::{AccountRepository, DynamoDbAccountRepository};
