//! # DynamoDB 接続管理
//!
//! Amazon DynamoDB への接続管理を行う。
//!
//! ## 設計方針
//!
//! - **ローカル開発**: DynamoDB Local を使用（`DYNAMODB_ENDPOINT` で接続先を指定）
//! - **本番環境**: IAM ロールによる認証で Amazon DynamoDB に接続
//! - **テーブル自動作成**: アプリケーション起動時にテーブルが存在しなければ作成（冪等）
//!
//! ## DynamoDB の用途
//!
//! - **アカウント**: 登録ユーザーのロール・アクセスレベル（PK = `uid`）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use storefront_infra::dynamodb;
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = dynamodb::create_client(Some("http://localhost:8000")).await;
//!     dynamodb::ensure_accounts_table(&client, "accounts").await?;
//!     Ok(())
//! }
//! ```

use aws_config::meta::region::RegionProviderChain;
use aws_sdk_dynamodb::{
    Client,
    types::{AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType},
};

use crate::InfraError;

/// アカウントテーブルのパーティションキー
pub const ACCOUNT_PARTITION_KEY: &str = "uid";

/// DynamoDB クライアントを作成する
///
/// `endpoint` が `Some` の場合は DynamoDB Local に接続する。認証情報はダミー値を使用する
/// （DynamoDB Local の `-sharedDb` モードでは認証情報を検証しない）。
/// `None` の場合は SDK のデフォルト認証チェーン（本番では IAM ロール）を使う。
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let region = RegionProviderChain::default_provider().or_else("us-east-1");
    let mut config_builder =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

    if let Some(endpoint_url) = endpoint {
        config_builder = config_builder
            .endpoint_url(endpoint_url)
            // DynamoDB Local はクレデンシャルを検証しないが、SDK はプロバイダが必要
            .credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
                "local", "local", None, None, "local",
            ));
    }

    let config = config_builder.load().await;

    Client::new(&config)
}

/// アカウントテーブルが存在しなければ作成する（冪等）
///
/// テーブルスキーマ:
/// - PK: `uid` (String) — 認証基盤が発行したユーザー ID
///
/// # 引数
///
/// * `client` - DynamoDB クライアント
/// * `table_name` - テーブル名
pub async fn ensure_accounts_table(client: &Client, table_name: &str) -> Result<(), InfraError> {
    // テーブルの存在確認
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => {
            tracing::debug!("テーブル '{}' は既に存在します", table_name);
            return Ok(());
        }
        Err(err) => {
            // ResourceNotFoundException の場合のみテーブル作成に進む
            let is_not_found = err
                .as_service_error()
                .map(|e| e.is_resource_not_found_exception())
                .unwrap_or(false);
            if !is_not_found {
                return Err(InfraError::dynamo_db(format!(
                    "テーブル '{}' の確認に失敗: {}",
                    table_name, err
                )));
            }
        }
    }

    tracing::info!("テーブル '{}' を作成します", table_name);

    let create_result = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(ACCOUNT_PARTITION_KEY)
                .key_type(KeyType::Hash)
                .build()
                .map_err(|e| InfraError::dynamo_db(format!("KeySchema 構築エラー: {}", e)))?,
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(ACCOUNT_PARTITION_KEY)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|e| {
                    InfraError::dynamo_db(format!("AttributeDefinition 構築エラー: {}", e))
                })?,
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    if let Err(err) = create_result {
        // ResourceInUseException は並行呼び出し時に発生しうる（テーブルが作成中）
        // この場合は冪等として成功扱いにする
        let is_resource_in_use = err
            .as_service_error()
            .map(|e| e.is_resource_in_use_exception())
            .unwrap_or(false);
        if !is_resource_in_use {
            return Err(InfraError::dynamo_db(format!(
                "テーブル '{}' の作成に失敗: {}",
                table_name, err
            )));
        }
        tracing::debug!(
            "テーブル '{}' は既に作成中または存在します（ResourceInUseException）",
            table_name
        );
        return Ok(());
    }

    tracing::info!("テーブル '{}' を作成しました", table_name);

    Ok(())
}
