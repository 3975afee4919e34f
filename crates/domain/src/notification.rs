//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationKind`] | 通知種別 | テンプレート名と 1 対 1 で対応する |
//! | [`EmailMessage`] | メールメッセージ | テンプレートレンダリングの出力 |
//! | [`BulkEmail`] | 一括メール | 同一内容を複数の宛先に個別送信する |
//! | [`DispatchSummary`] | 送信集計 | 一括送信の成功数・失敗数 |
//!
//! ## 設計方針
//!
//! - **テンプレート分離**: 通知内容とメール生成は分離（TemplateRenderer は web 層）
//! - **宛先ごとの独立性**: 一括送信では 1 件の失敗が他の宛先に影響しない

use serde::Serialize;
use strum::IntoStaticStr;
use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知種別
///
/// snake_case の文字列がそのままテンプレート名になる
/// （`quote_admin` → `quote_admin.html` / `quote_admin.txt`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// 見積もり依頼: 管理者への通知
    QuoteAdmin,
    /// 見積もり依頼: 顧客への受付確認
    QuoteAck,
    /// 注文問い合わせ: 管理者への通知
    OrderAdmin,
    /// カタログ請求: 管理者への通知
    CatalogRequest,
    /// 一括送信
    Bulk,
}

impl NotificationKind {
    /// テンプレート名を返す
    pub fn template_name(&self) -> &'static str {
        self.into()
    }
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone, Default)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
    /// 差出人の表示名（送信元アドレスは設定値で固定）
    pub from_name: Option<String>,
    /// 返信先アドレス
    pub reply_to:  Option<String>,
    /// CC の宛先
    pub cc:        Vec<String>,
}

impl EmailMessage {
    pub fn with_from_name(mut self, from_name: impl Into<String>) -> Self {
        self.from_name = Some(from_name.into());
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }
}

/// 一括メール
///
/// 同一の件名・本文を各宛先に個別のメールとして送る。
/// 宛先同士はお互いのアドレスを知ることはない。
#[derive(Debug, Clone, Default)]
pub struct BulkEmail {
    /// 差出人の表示名
    pub from_name:  String,
    pub reply_to:   Option<String>,
    pub cc:         Vec<String>,
    pub subject:    String,
    /// 本文（プレーンテキスト。HTML 版は改行を `<br>` に変換して生成する）
    pub content:    String,
    /// 宛先一覧
    ///
    /// 文字列でない要素は `None` として保持し、送信せずに失敗として数える。
    pub recipients: Vec<Option<String>>,
}

/// 一括送信の集計結果
///
/// 不変条件: `successful + failed` は処理した宛先の数に等しい。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub successful: usize,
    pub failed:     usize,
}

impl DispatchSummary {
    /// 1 件分の結果を記録する
    pub fn record(&mut self, succeeded: bool) {
        if succeeded {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
    }

    /// 処理した宛先の総数
    pub fn total(&self) -> usize {
        self.successful + self.failed
    }
}

impl FromIterator<bool> for DispatchSummary {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut summary = Self::default();
        for succeeded in iter {
            summary.record(succeeded);
        }
        summary
    }
}
