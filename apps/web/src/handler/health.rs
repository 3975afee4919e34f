//! # ヘルスチェックハンドラ
//!
//! サーバーの稼働状態を確認するためのエンドポイント（Liveness Check）。
//! 外部サービスへの接続確認は行わない。

use axum::Json;
use storefront_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// 常に `{"status": "healthy", "version": ...}` を返す。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
