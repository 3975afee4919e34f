//! # AccountRepository
//!
//! アカウントの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **DynamoDB**: アカウントは DynamoDB に格納（PK = `uid`）
//! - **後勝ち**: `put_item` を条件なしで実行し、同じ uid の既存レコードは上書きする
//! - **全属性を文字列で保持**: 日時は RFC 3339、列挙型は小文字の文字列

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types::AttributeValue};
use storefront_domain::account::Account;

use crate::{InfraError, dynamodb::ACCOUNT_PARTITION_KEY};

/// アカウントリポジトリトレイト
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// アカウントを保存する（同じ uid が存在すれば上書き）
    async fn save(&self, account: &Account) -> Result<(), InfraError>;
}

/// DynamoDB 実装の AccountRepository
pub struct DynamoDbAccountRepository {
    client:     Client,
    table_name: String,
}

impl DynamoDbAccountRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl AccountRepository for DynamoDbAccountRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(uid = %account.uid()))]
    async fn save(&self, account: &Account) -> Result<(), InfraError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(account_to_item(account)))
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("アカウントの保存に失敗: {e}")))?;

        Ok(())
    }
}

/// Account を DynamoDB のアイテムに変換する
fn account_to_item(account: &Account) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        ACCOUNT_PARTITION_KEY.to_string(),
        AttributeValue::S(account.uid().to_string()),
    );
    item.insert(
        "email".to_string(),
        AttributeValue::S(account.email().to_string()),
    );
    item.insert(
        "full_name".to_string(),
        AttributeValue::S(account.full_name().to_string()),
    );
    item.insert(
        "role".to_string(),
        AttributeValue::S(account.role().to_string()),
    );
    item.insert(
        "access_level".to_string(),
        AttributeValue::S(account.access_level().to_string()),
    );
    item.insert(
        "status".to_string(),
        AttributeValue::S(account.status().to_string()),
    );
    item.insert(
        "created_at".to_string(),
        AttributeValue::S(account.created_at().to_rfc3339()),
    );
    item.insert(
        "last_login_at".to_string(),
        AttributeValue::S(account.last_login_at().to_rfc3339()),
    );

    if let Some(website) = account.website() {
        item.insert(
            "website".to_string(),
            AttributeValue::S(website.to_string()),
        );
    }

    item
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use storefront_domain::account::NewAccount;

    use super::*;

    fn account(role: Option<&str>, website: Option<&str>) -> Account {
        Account::register(
            NewAccount {
                uid:       Some("uid-123".to_string()),
                email:     Some("user@example.com".to_string()),
                full_name: Some("Test User".to_string()),
                role:      role.map(str::to_string),
                website:   website.map(str::to_string),
            },
            DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
        )
        .unwrap()
    }

    fn get_s<'a>(item: &'a HashMap<String, AttributeValue>, key: &str) -> &'a str {
        item.get(key).and_then(|v| v.as_s().ok()).unwrap()
    }

    #[test]
    fn アイテムの属性はすべて文字列で格納される() {
        let item = account_to_item(&account(Some("SALES"), Some("acme")));

        assert_eq!(get_s(&item, "uid"), "uid-123");
        assert_eq!(get_s(&item, "email"), "user@example.com");
        assert_eq!(get_s(&item, "full_name"), "Test User");
        assert_eq!(get_s(&item, "role"), "sales");
        assert_eq!(get_s(&item, "access_level"), "guest");
        assert_eq!(get_s(&item, "status"), "active");
        assert_eq!(get_s(&item, "website"), "acme");
        assert_eq!(get_s(&item, "created_at"), "2023-11-14T22:13:20+00:00");
        assert_eq!(get_s(&item, "last_login_at"), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn websiteが未指定なら属性を含めない() {
        let item = account_to_item(&account(None, None));

        assert!(!item.contains_key("website"));
        assert_eq!(get_s(&item, "role"), "customer");
        assert_eq!(get_s(&item, "access_level"), "full");
    }
}
