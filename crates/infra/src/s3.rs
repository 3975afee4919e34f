//! # S3 接続管理
//!
//! Amazon S3 / MinIO への接続管理と署名付きダウンロード URL の生成を行う。
//!
//! ## 設計方針
//!
//! - **ローカル開発**: MinIO を使用（`S3_ENDPOINT_URL` で接続先を指定）
//! - **本番環境**: IAM ロールによる認証で Amazon S3 に接続（`S3_ENDPOINT_URL` 未設定）
//! - **Presigned URL**: ブラウザが S3 から直接 GET する方式（サーバーは URL 発行のみ）
//! - **添付ファイルとして配信**: `Content-Disposition: attachment` を URL に焼き込み、
//!   ブラウザでインライン表示させない
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use storefront_infra::s3;
//! use std::time::Duration;
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     // ローカル（MinIO）
//!     let client = s3::create_client(Some("http://localhost:9000")).await;
//!     let s3 = s3::AwsS3Client::new(client, "storefront-documents".to_string());
//!
//!     let url = s3
//!         .generate_signed_download_url("catalogs/spring.pdf", Duration::from_secs(3600))
//!         .await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::{Client, presigning::PresigningConfig};

use crate::InfraError;

/// リージョン未設定時のフォールバック
const DEFAULT_REGION: &str = "us-east-1";

/// S3 クライアントのインターフェース
///
/// テスト時はモックに差し替え可能。
#[async_trait]
pub trait S3Client: Send + Sync {
    /// 署名付きダウンロード URL を生成する
    ///
    /// ブラウザがこの URL に対して HTTP GET でファイルを直接ダウンロードする。
    /// レスポンスには `Content-Disposition: attachment` が付与される。
    ///
    /// # 引数
    ///
    /// * `s3_key` - S3 オブジェクトキー（例: `documents/spec-sheet.pdf`）
    /// * `expires_in` - URL の有効期限
    async fn generate_signed_download_url(
        &self,
        s3_key: &str,
        expires_in: Duration,
    ) -> Result<String, InfraError>;
}

/// AWS S3 クライアント
///
/// `aws-sdk-s3` を使用した [`S3Client`] の実装。
/// MinIO とも互換動作する。
pub struct AwsS3Client {
    client:      Client,
    bucket_name: String,
}

impl AwsS3Client {
    /// 新しい S3 クライアントを作成する
    pub fn new(client: Client, bucket_name: String) -> Self {
        Self {
            client,
            bucket_name,
        }
    }
}

#[async_trait]
impl S3Client for AwsS3Client {
    #[tracing::instrument(skip_all, level = "debug", fields(s3_key))]
    async fn generate_signed_download_url(
        &self,
        s3_key: &str,
        expires_in: Duration,
    ) -> Result<String, InfraError> {
        let presign_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| InfraError::s3(format!("Presigned 設定の構築に失敗: {e}")))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(s3_key)
            .response_content_disposition(attachment_disposition(s3_key))
            .presigned(presign_config)
            .await
            .map_err(|e| InfraError::s3(format!("Presigned GET URL の生成に失敗: {e}")))?;

        Ok(presigned.uri().to_string())
    }
}

/// オブジェクトキーから `attachment` の Content-Disposition を組み立てる
///
/// ファイル名にはキーの最後のセグメントを使う。
fn attachment_disposition(s3_key: &str) -> String {
    let file_name = s3_key.rsplit('/').next().unwrap_or(s3_key).replace('"', "");
    format!("attachment; filename=\"{file_name}\"")
}

/// S3 クライアントを作成する
///
/// `endpoint` が `Some` の場合は MinIO 等のカスタムエンドポイントに接続する。
/// `None` の場合は AWS S3 のデフォルトエンドポイントを使用する。
///
/// 認証情報は SDK のデフォルト認証チェーンで解決する:
/// - ローカル: 環境変数 `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`（`.env` で設定）
/// - 本番: IAM ロール
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let region = RegionProviderChain::default_provider().or_else(DEFAULT_REGION);
    let mut config_builder =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

    if let Some(endpoint_url) = endpoint {
        config_builder = config_builder.endpoint_url(endpoint_url);
    }

    let config = config_builder.load().await;

    // MinIO はパススタイルが必要（バーチャルホスト型 URL を使わない）
    let s3_config_builder = aws_sdk_s3::config::Builder::from(&config);
    let s3_config = if endpoint.is_some() {
        s3_config_builder.force_path_style(true).build()
    } else {
        s3_config_builder.build()
    };

    Client::from_conf(s3_config)
}
