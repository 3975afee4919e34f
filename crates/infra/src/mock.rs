//! # テスト用モック
//!
//! ユースケース・ハンドラのテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! storefront-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use storefront_domain::{
    account::Account,
    notification::{EmailMessage, NotificationError},
};

use crate::{
    error::InfraError,
    notification::NotificationSender,
    repository::AccountRepository,
    s3::S3Client,
};

// ===== MockNotificationSender =====

/// 送信したメールを記録するモック
///
/// `fail_for` で指定した宛先への送信は `SendFailed` を返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:       Arc<Mutex<Vec<EmailMessage>>>,
    failing_to: Arc<Mutex<HashSet<String>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定した宛先への送信を失敗させる
    pub fn fail_for(&self, to: impl Into<String>) {
        self.failing_to.lock().unwrap().insert(to.into());
    }

    /// 送信に成功したメールの一覧
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// 送信に成功したメールの件数
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if self.failing_to.lock().unwrap().contains(&email.to) {
            return Err(NotificationError::SendFailed(format!(
                "mock: {} への送信を拒否",
                email.to
            )));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ===== MockS3Client =====

/// 署名付き URL の生成を記録するモック
///
/// 返す URL は `https://mock-s3.local/{key}?expires={秒}` 形式。
#[derive(Clone, Default)]
pub struct MockS3Client {
    requested_keys: Arc<Mutex<Vec<String>>>,
    fail:           Arc<Mutex<bool>>,
}

impl MockS3Client {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以後の呼び出しをすべて失敗させる
    pub fn fail_all(&self) {
        *self.fail.lock().unwrap() = true;
    }

    /// 要求されたオブジェクトキーの一覧
    pub fn requested_keys(&self) -> Vec<String> {
        self.requested_keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl S3Client for MockS3Client {
    async fn generate_signed_download_url(
        &self,
        s3_key: &str,
        expires_in: Duration,
    ) -> Result<String, InfraError> {
        self.requested_keys.lock().unwrap().push(s3_key.to_string());
        if *self.fail.lock().unwrap() {
            return Err(InfraError::s3("mock: 署名に失敗"));
        }
        Ok(format!(
            "https://mock-s3.local/{s3_key}?expires={}",
            expires_in.as_secs()
        ))
    }
}

// ===== MockAccountRepository =====

/// 保存されたアカウントを記録するモック（後勝ちで上書き）
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<Mutex<Vec<Account>>>,
    fail:     Arc<Mutex<Option<String>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以後の保存を指定メッセージで失敗させる
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail.lock().unwrap() = Some(message.into());
    }

    /// 保存済みのアカウント一覧
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }

    pub fn find_by_uid(&self, uid: &str) -> Option<Account> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.uid() == uid)
            .cloned()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn save(&self, account: &Account) -> Result<(), InfraError> {
        if let Some(message) = self.fail.lock().unwrap().as_ref() {
            return Err(InfraError::dynamo_db(message.clone()));
        }
        let mut accounts = self.accounts.lock().unwrap();
        accounts.retain(|a| a.uid() != account.uid());
        accounts.push(account.clone());
        Ok(())
    }
}
