//! # アカウント
//!
//! 登録ユーザーのアカウントとロールを管理する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`AccountRole`] | ロール | 許可リスト（admin / sales）以外はすべて customer |
//! | [`AccessLevel`] | アクセスレベル | ロールから導出される。sales のみ guest |
//! | [`AccountStatus`] | ステータス | 登録直後は active |
//! | [`Account`] | アカウント | 登録時に一度だけ作成される |
//!
//! ## 設計方針
//!
//! - **閉じた列挙型**: 呼び出し元が指定した任意の文字列はロールとして保存されない
//! - **導出値**: アクセスレベルはロールから一意に決まり、独立して指定できない
//! - **後勝ち**: 同じ uid での再登録は既存レコードを上書きする（重複検出しない）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::DomainError;

/// アカウントのロール
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccountRole {
    /// 管理者
    Admin,
    /// 営業担当
    Sales,
    /// 顧客（既定値）
    #[default]
    Customer,
}

impl AccountRole {
    /// 呼び出し元が指定したロール文字列を正規化する
    ///
    /// 大文字小文字を区別せず admin / sales のみを受け付ける。
    /// それ以外（未指定、空文字、未知の値、"customer" 自体も含む）は
    /// すべて [`AccountRole::Customer`] になる。
    pub fn normalize(input: Option<&str>) -> Self {
        match input.map(str::to_lowercase).as_deref() {
            Some("admin") => Self::Admin,
            Some("sales") => Self::Sales,
            _ => Self::Customer,
        }
    }

    /// ロールから導出されるアクセスレベル
    pub fn access_level(&self) -> AccessLevel {
        match self {
            Self::Sales => AccessLevel::Guest,
            Self::Admin | Self::Customer => AccessLevel::Full,
        }
    }
}

/// アクセスレベル
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccessLevel {
    Full,
    Guest,
}

/// アカウントステータス
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccountStatus {
    Active,
}

/// アカウント登録の入力
///
/// 外部の認証基盤でユーザーを作成した後、その uid を添えて送られてくる。
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub uid:       Option<String>,
    pub email:     Option<String>,
    pub full_name: Option<String>,
    pub role:      Option<String>,
    pub website:   Option<String>,
}

/// アカウントエンティティ
///
/// # 不変条件
///
/// - `uid` と `email` は空でない
/// - `role` は [`AccountRole`] のいずれか
/// - `access_level` は `role.access_level()` と一致する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    uid:           String,
    email:         String,
    full_name:     String,
    role:          AccountRole,
    access_level:  AccessLevel,
    status:        AccountStatus,
    website:       Option<String>,
    created_at:    DateTime<Utc>,
    last_login_at: DateTime<Utc>,
}

impl Account {
    /// 新しいアカウントを登録する
    ///
    /// # 引数
    ///
    /// - `input`: 登録リクエストの内容
    /// - `now`: 現在日時（呼び出し元から注入）
    ///
    /// # エラー
    ///
    /// `uid` または `email` が未指定・空文字の場合は `DomainError::Validation`
    pub fn register(input: NewAccount, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let (Some(uid), Some(email)) = (non_empty(input.uid), non_empty(input.email)) else {
            return Err(DomainError::Validation(
                "Missing required fields".to_string(),
            ));
        };

        let role = AccountRole::normalize(input.role.as_deref());

        Ok(Self {
            uid,
            email,
            full_name: input.full_name.unwrap_or_default(),
            role,
            access_level: role.access_level(),
            status: AccountStatus::Active,
            website: non_empty(input.website),
            created_at: now,
            last_login_at: now,
        })
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn role(&self) -> AccountRole {
        self.role
    }

    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> DateTime<Utc> {
        self.last_login_at
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
