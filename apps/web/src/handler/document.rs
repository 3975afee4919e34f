//! # ドキュメントハンドラ
//!
//! 保存済みファイル（カタログ PDF など）の署名付きダウンロード URL を発行する。
//!
//! ## エンドポイント
//!
//! - `GET /getSignedPDF?fileName=...` - ダウンロード URL 発行

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{error::WebError, usecase::SignedLinkIssuer};

/// ドキュメント API の共有状態
pub struct DocumentState {
    pub issuer: SignedLinkIssuer,
}

/// 署名付き URL 発行のクエリパラメータ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedPdfQuery {
    pub file_name: Option<String>,
}

/// 署名付き URL レスポンス
#[derive(Debug, Serialize)]
pub struct SignedUrlResponse {
    pub url: String,
}

/// GET /getSignedPDF
///
/// ## レスポンス
///
/// - `200 OK`: `{"url": "..."}`
/// - `400 Bad Request`: `fileName` が未指定
/// - `500 Internal Server Error`: URL の生成に失敗
#[tracing::instrument(skip_all)]
pub async fn get_signed_pdf(
    State(state): State<Arc<DocumentState>>,
    Query(query): Query<SignedPdfQuery>,
) -> Result<Json<SignedUrlResponse>, WebError> {
    let url = state.issuer.issue(query.file_name.as_deref()).await?;
    Ok(Json(SignedUrlResponse { url }))
}
