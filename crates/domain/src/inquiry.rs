//! # 問い合わせ
//!
//! Web サイトから送信される問い合わせ（見積もり依頼・注文問い合わせ・カタログ請求）を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`InquiryId`] | 問い合わせ ID | 送信ごとに発行される相関 ID |
//! | [`QuoteRequest`] | 見積もり依頼 | 管理者通知 + 顧客への受付確認の 2 通を送る |
//! | [`OrderInquiry`] | 注文問い合わせ | カート内容（明細）を管理者に通知する |
//! | [`CatalogRequest`] | カタログ請求 | カタログ送付の依頼を管理者に通知する |
//!
//! ## 設計方針
//!
//! - **永続化しない**: 問い合わせはメール送信の副作用としてのみ届けられる
//! - **不変**: 送信時に作成され、以後変更されない

use derive_more::Display;
use rand::{Rng, distr::Alphanumeric};
use serde::Serialize;

/// 生成する問い合わせ ID の長さ
const INQUIRY_ID_LENGTH: usize = 12;

/// 問い合わせ ID（相関 ID）
///
/// サーバー側で生成する場合は英数字 12 文字のランダム文字列。
/// 注文問い合わせではクライアントが発行した値をそのまま使う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[display("{_0}")]
pub struct InquiryId(String);

impl InquiryId {
    /// 新しい問い合わせ ID を生成する
    pub fn generate() -> Self {
        let id = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(INQUIRY_ID_LENGTH)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// クライアントが発行した ID から作成する
    pub fn from_client(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 顧客の連絡先
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerContact {
    pub first_name:     String,
    pub last_name:      String,
    pub email:          String,
    pub phone:          Option<String>,
    pub street_address: String,
    pub apartment:      Option<String>,
    pub company:        Option<String>,
}

impl CustomerContact {
    /// 姓名を結合した表示名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// 注文明細
#[derive(Debug, Clone, Default, Serialize)]
pub struct LineItem {
    pub name:     String,
    /// 数量（カートが送った表記のまま通知に載せる）
    pub quantity: String,
    /// 商品画像の URL
    pub image:    Option<String>,
    /// 在庫管理コード
    pub sku:      Option<String>,
}

/// 見積もり依頼
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub customer:       CustomerContact,
    pub message:        String,
    /// 添付ファイルの URL（アップロード済みの図面など）
    pub attachment_url: Option<String>,
}

/// 注文問い合わせ
#[derive(Debug, Clone)]
pub struct OrderInquiry {
    pub inquiry_id:  InquiryId,
    pub customer:    CustomerContact,
    pub order_notes: Option<String>,
    pub items:       Vec<LineItem>,
}

/// カタログ請求
#[derive(Debug, Clone)]
pub struct CatalogRequest {
    pub name:          String,
    pub email:         String,
    pub catalog_title: String,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn generateは英数字12文字のidを返す() {
        let id = InquiryId::generate();

        assert_eq!(id.as_str().len(), INQUIRY_ID_LENGTH);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generateは呼び出しごとに異なるidを返す() {
        let ids: HashSet<InquiryId> = (0..100).map(|_| InquiryId::generate()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn from_clientは値をそのまま保持する() {
        let id = InquiryId::from_client("INQ-2024-0001");
        assert_eq!(id.to_string(), "INQ-2024-0001");
    }

    #[test]
    fn full_nameは姓名を空白で結合する() {
        let customer = CustomerContact {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            ..Default::default()
        };
        assert_eq!(customer.full_name(), "Jane Doe");
    }

    #[test]
    fn full_nameは片方が空でも余分な空白を残さない() {
        let customer = CustomerContact {
            first_name: "Jane".to_string(),
            ..Default::default()
        };
        assert_eq!(customer.full_name(), "Jane");
    }
}
