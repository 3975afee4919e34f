//! # アカウント登録
//!
//! 外部の認証基盤で作成済みのユーザーについて、アカウントレコードを作成する。
//! ロールは許可リストで正規化し、アクセスレベル・ステータスを導出して保存する。

use std::sync::Arc;

use storefront_domain::{
    account::{Account, AccountRole, NewAccount},
    clock::Clock,
};
use storefront_infra::repository::AccountRepository;
use storefront_shared::{
    event_log::{error, event},
    log_business_event,
};

use crate::error::WebError;

/// アカウント登録ユースケース
pub struct AccountProvisioner {
    repository: Arc<dyn AccountRepository>,
    clock:      Arc<dyn Clock>,
}

impl AccountProvisioner {
    pub fn new(repository: Arc<dyn AccountRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// アカウントを登録し、確定したロールを返す
    ///
    /// 同じ uid が既に存在しても確認せずに上書きする。
    ///
    /// # エラー
    ///
    /// - uid / email が欠けている: 400（保存は行わない）
    /// - データストアの失敗: 500（`details` にエラー文言を載せる）
    #[tracing::instrument(skip_all, fields(uid = input.uid.as_deref().unwrap_or_default()))]
    pub async fn register(&self, input: NewAccount) -> Result<AccountRole, WebError> {
        let account = Account::register(input, self.clock.now())
            .inspect_err(|e| tracing::warn!(reason = %e, "アカウント登録の入力が不正"))?;

        self.repository.save(&account).await.map_err(|e| {
            tracing::error!(
                error.category = error::category::INFRASTRUCTURE,
                error.kind = error::kind::DATASTORE,
                uid = %account.uid(),
                "アカウントの保存に失敗: {e}"
            );
            WebError::internal_with_details("Failed to register user", e.to_string())
        })?;

        log_business_event!(
            event.category = event::category::ACCOUNT,
            event.action = event::action::ACCOUNT_REGISTERED,
            event.entity_type = event::entity_type::ACCOUNT,
            event.entity_id = %account.uid(),
            event.result = event::result::SUCCESS,
            account.role = %account.role(),
            account.access_level = %account.access_level(),
            "アカウント登録"
        );

        Ok(account.role())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use storefront_domain::{
        account::{AccessLevel, AccountStatus},
        clock::FixedClock,
    };
    use storefront_infra::mock::MockAccountRepository;

    use super::*;
    use crate::test_utils::CapturedLogs;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn make_provisioner(repository: MockAccountRepository) -> AccountProvisioner {
        AccountProvisioner::new(Arc::new(repository), Arc::new(FixedClock::new(now())))
    }

    fn input(role: Option<&str>) -> NewAccount {
        NewAccount {
            uid: Some("uid-1".to_string()),
            email: Some("user@example.com".to_string()),
            full_name: Some("Test User".to_string()),
            role: role.map(str::to_string),
            website: None,
        }
    }

    #[rstest]
    #[case(Some("ADMIN"), AccountRole::Admin, AccessLevel::Full)]
    #[case(Some("admin"), AccountRole::Admin, AccessLevel::Full)]
    #[case(Some("sales"), AccountRole::Sales, AccessLevel::Guest)]
    #[case(Some("unknown"), AccountRole::Customer, AccessLevel::Full)]
    #[case(None, AccountRole::Customer, AccessLevel::Full)]
    #[tokio::test]
    async fn ロールを正規化してアクセスレベルとともに保存する(
        #[case] role: Option<&str>,
        #[case] expected_role: AccountRole,
        #[case] expected_level: AccessLevel,
    ) {
        let repository = MockAccountRepository::new();
        let sut = make_provisioner(repository.clone());

        let resolved = sut.register(input(role)).await.unwrap();

        assert_eq!(resolved, expected_role);
        let saved = repository.find_by_uid("uid-1").unwrap();
        assert_eq!(saved.role(), expected_role);
        assert_eq!(saved.access_level(), expected_level);
        assert_eq!(saved.status(), AccountStatus::Active);
        assert_eq!(saved.created_at(), now());
    }

    #[tokio::test]
    async fn 必須項目が欠けていると保存せずに400を返す() {
        let (logs, _guard) = CapturedLogs::install();
        let repository = MockAccountRepository::new();
        let sut = make_provisioner(repository.clone());

        let result = sut
            .register(NewAccount {
                uid: None,
                ..input(None)
            })
            .await;

        assert!(matches!(result, Err(WebError::BadRequest(msg)) if msg == "Missing required fields"));
        assert!(repository.accounts().is_empty());
        assert!(logs.contents().contains("アカウント登録の入力が不正"));
    }

    #[tokio::test]
    async fn 同じuidで再登録すると上書きされる() {
        let repository = MockAccountRepository::new();
        let sut = make_provisioner(repository.clone());

        sut.register(input(Some("sales"))).await.unwrap();
        sut.register(input(Some("admin"))).await.unwrap();

        let accounts = repository.accounts();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].role(), AccountRole::Admin);
    }

    #[tokio::test]
    async fn データストアの失敗はdetails付きの500になる() {
        let repository = MockAccountRepository::new();
        repository.fail_with("ResourceNotFoundException");
        let sut = make_provisioner(repository);

        let result = sut.register(input(None)).await;

        let Err(WebError::Internal { message, details }) = result else {
            panic!("500 エラーになること");
        };
        assert_eq!(message, "Failed to register user");
        assert_eq!(
            details.as_deref(),
            Some("DynamoDB エラー: ResourceNotFoundException")
        );
    }
}
