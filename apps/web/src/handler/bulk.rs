//! # 一括送信ハンドラ
//!
//! 管理画面から同一内容のメールを複数の宛先に送る。
//!
//! ## エンドポイント
//!
//! - `POST /application` - 一括送信（成功数・失敗数を返す）

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_domain::notification::{BulkEmail, DispatchSummary};

use super::{NotificationState, parse_body};
use crate::error::WebError;

// --- リクエスト/レスポンス型 ---

/// CC の指定
///
/// 単一のアドレス文字列と、アドレスの配列の両方を受け付ける。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CcField {
    One(String),
    Many(Vec<String>),
}

impl CcField {
    fn into_addresses(self) -> Vec<String> {
        let addresses = match self {
            Self::One(address) => vec![address],
            Self::Many(addresses) => addresses,
        };
        addresses.into_iter().filter(|a| !a.is_empty()).collect()
    }
}

/// 一括送信リクエスト
///
/// `recipients` の型は自前で検証するため、任意の JSON 値として受け取る。
/// それ以外の項目は欠落・`null` ともに空として扱い、400 の理由にしない。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEmailBody {
    #[serde(default)]
    pub from:       Option<String>,
    #[serde(default)]
    pub reply_to:   Option<String>,
    #[serde(default)]
    pub cc:         Option<CcField>,
    #[serde(default)]
    pub subject:    Option<String>,
    #[serde(default)]
    pub content:    Option<String>,
    #[serde(default)]
    pub recipients: Option<Value>,
}

/// 一括送信レスポンス
#[derive(Debug, Serialize)]
pub struct BulkEmailResponse {
    pub message: &'static str,
    pub summary: DispatchSummary,
}

impl BulkEmailBody {
    /// 宛先が配列であることを検証して [`BulkEmail`] に変換する
    ///
    /// 配列の要素のうち文字列でないものは `None` として残し、送信時に失敗として数える。
    fn into_bulk_email(self) -> Result<BulkEmail, WebError> {
        let Some(Value::Array(recipients)) = self.recipients else {
            tracing::warn!("一括送信の宛先が配列ではない");
            return Err(WebError::BadRequest(
                "Recipients must be an array".to_string(),
            ));
        };

        Ok(BulkEmail {
            from_name:  self.from.unwrap_or_default(),
            reply_to:   self.reply_to,
            cc:         self.cc.map(CcField::into_addresses).unwrap_or_default(),
            subject:    self.subject.unwrap_or_default(),
            content:    self.content.unwrap_or_default(),
            recipients: recipients
                .into_iter()
                .map(|value| match value {
                    Value::String(address) => Some(address),
                    _ => None,
                })
                .collect(),
        })
    }
}

// --- ハンドラ ---

/// POST /application
///
/// 送信の成否にかかわらず、宛先が配列であれば 200 を返す。
///
/// ## レスポンス
///
/// - `200 OK`: `{"message": "Emails processed", "summary": {"successful": n, "failed": m}}`
/// - `400 Bad Request`: ボディが不正、または `recipients` が配列でない
#[tracing::instrument(skip_all)]
pub async fn send_bulk_email(
    State(state): State<Arc<NotificationState>>,
    payload: Result<Json<BulkEmailBody>, JsonRejection>,
) -> Result<Json<BulkEmailResponse>, WebError> {
    let email = parse_body(payload)?.into_bulk_email()?;

    let summary = state.dispatcher.dispatch(&email).await;

    Ok(Json(BulkEmailResponse {
        message: "Emails processed",
        summary,
    }))
}
