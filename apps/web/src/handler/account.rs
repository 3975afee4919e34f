//! # アカウントハンドラ
//!
//! 認証基盤でのサインアップ完了後に呼ばれ、アカウントレコードを作成する。
//!
//! ## エンドポイント
//!
//! - `POST /auth/register` - アカウント登録

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use storefront_domain::account::NewAccount;

use super::parse_body;
use crate::{error::WebError, usecase::AccountProvisioner};

/// アカウント API の共有状態
pub struct AccountState {
    pub provisioner: AccountProvisioner,
}

/// アカウント登録リクエスト
///
/// 必須項目の欠落は 400 `Missing required fields` として返すため、
/// すべて省略可能として受け取る。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub uid:       Option<String>,
    #[serde(default)]
    pub email:     Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role:      Option<String>,
    #[serde(default)]
    pub website:   Option<String>,
}

/// アカウント登録レスポンス
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// POST /auth/register
///
/// ## レスポンス
///
/// - `200 OK`: `{"success": true, "message": "User registered successfully with role: ..."}`
/// - `400 Bad Request`: ボディが不正、または uid / email が未指定
/// - `500 Internal Server Error`: `{"error": "Failed to register user", "details": "..."}`
#[tracing::instrument(skip_all)]
pub async fn register_account(
    State(state): State<Arc<AccountState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, WebError> {
    let req = parse_body(payload)?;

    let role = state
        .provisioner
        .register(NewAccount {
            uid:       req.uid,
            email:     req.email,
            full_name: req.full_name,
            role:      req.role,
            website:   req.website,
        })
        .await?;

    Ok(Json(RegisterResponse {
        success: true,
        message: format!("User registered successfully with role: {role}"),
    }))
}
