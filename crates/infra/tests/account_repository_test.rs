//! AccountRepository の統合テスト
//!
//! DynamoDB Local を使用したテスト。ローカルサービスが必要なため既定では無視される。
//!
//! 実行方法:
//! ```bash
//! docker run -p 8000:8000 amazon/dynamodb-local -jar DynamoDBLocal.jar -sharedDb -inMemory
//! cargo test -p storefront-infra --test account_repository_test -- --ignored
//! ```

use chrono::{DateTime, Utc};
use storefront_domain::account::{Account, NewAccount};
use storefront_infra::{
    dynamodb,
    repository::{AccountRepository, DynamoDbAccountRepository},
};

/// テスト用の DynamoDB エンドポイント
fn dynamodb_endpoint() -> String {
    let _ = dotenvy::dotenv();
    std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

fn new_account(uid: &str, role: &str) -> Account {
    Account::register(
        NewAccount {
            uid: Some(uid.to_string()),
            email: Some(format!("{uid}@example.com")),
            full_name: Some("Test User".to_string()),
            role: Some(role.to_string()),
            website: None,
        },
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
#[ignore = "DynamoDB Local が必要"]
async fn test_ensure_accounts_tableは冪等に実行できる() {
    let client = dynamodb::create_client(Some(&dynamodb_endpoint())).await;
    let table_name = format!("test_accounts_{}", uuid::Uuid::now_v7());

    dynamodb::ensure_accounts_table(&client, &table_name)
        .await
        .unwrap();
    // 2 回目はテーブルが存在するため何もしない
    dynamodb::ensure_accounts_table(&client, &table_name)
        .await
        .unwrap();

    let table = client
        .describe_table()
        .table_name(&table_name)
        .send()
        .await
        .unwrap()
        .table
        .unwrap();
    assert!(
        table
            .key_schema()
            .iter()
            .any(|ks| ks.attribute_name() == "uid")
    );
}

#[tokio::test]
#[ignore = "DynamoDB Local が必要"]
async fn test_同じuidで保存すると後勝ちで上書きされる() {
    let client = dynamodb::create_client(Some(&dynamodb_endpoint())).await;
    let table_name = format!("test_accounts_{}", uuid::Uuid::now_v7());
    dynamodb::ensure_accounts_table(&client, &table_name)
        .await
        .unwrap();
    let repo = DynamoDbAccountRepository::new(client.clone(), table_name.clone());

    repo.save(&new_account("uid-1", "admin")).await.unwrap();
    repo.save(&new_account("uid-1", "sales")).await.unwrap();

    let item = client
        .get_item()
        .table_name(&table_name)
        .key(
            "uid",
            aws_sdk_dynamodb::types::AttributeValue::S("uid-1".to_string()),
        )
        .send()
        .await
        .unwrap()
        .item
        .unwrap();
    assert_eq!(item["role"].as_s().unwrap(), "sales");
    assert_eq!(item["access_level"].as_s().unwrap(), "guest");
}
