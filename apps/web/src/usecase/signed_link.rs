//! # 署名付きリンク発行
//!
//! 保存済みファイル（カタログ PDF など）の期限付きダウンロード URL を発行する。

use std::{sync::Arc, time::Duration};

use storefront_domain::DomainError;
use storefront_infra::s3::S3Client;
use storefront_shared::{
    event_log::{error, event},
    log_business_event,
};

use crate::error::WebError;

/// 署名付きリンク発行ユースケース
pub struct SignedLinkIssuer {
    s3_client:  Arc<dyn S3Client>,
    /// オブジェクトキーの接頭辞（`{prefix}{fileName}` がキーになる）
    key_prefix: String,
    /// URL の有効期限
    ttl:        Duration,
}

impl SignedLinkIssuer {
    pub fn new(s3_client: Arc<dyn S3Client>, key_prefix: String, ttl: Duration) -> Self {
        Self {
            s3_client,
            key_prefix,
            ttl,
        }
    }

    /// ダウンロード URL を発行する
    ///
    /// # エラー
    ///
    /// - `file_name` が未指定・空文字: 400（ストレージは呼び出さない）
    /// - ストレージ側の失敗: 500
    #[tracing::instrument(skip_all, fields(file_name = file_name.unwrap_or_default()))]
    pub async fn issue(&self, file_name: Option<&str>) -> Result<String, WebError> {
        let file_name = file_name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                tracing::warn!("fileName が指定されていない");
                DomainError::Validation("Missing fileName".to_string())
            })?;

        let s3_key = format!("{}{}", self.key_prefix, file_name);

        let url = self
            .s3_client
            .generate_signed_download_url(&s3_key, self.ttl)
            .await
            .map_err(|e| {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::SIGNED_URL,
                    s3_key = %s3_key,
                    "署名付き URL の生成に失敗: {e}"
                );
                WebError::internal("Failed to generate signed URL")
            })?;

        log_business_event!(
            event.category = event::category::DOCUMENT,
            event.action = event::action::SIGNED_LINK_ISSUED,
            event.entity_type = event::entity_type::DOCUMENT,
            event.entity_id = %s3_key,
            event.result = event::result::SUCCESS,
            "署名付きリンク発行"
        );

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use storefront_infra::mock::MockS3Client;

    use super::*;
    use crate::test_utils::CapturedLogs;

    fn make_issuer(s3: MockS3Client, prefix: &str) -> SignedLinkIssuer {
        SignedLinkIssuer::new(Arc::new(s3), prefix.to_string(), Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn 接頭辞付きのキーで署名付きurlを発行する() {
        let s3 = MockS3Client::new();
        let sut = make_issuer(s3.clone(), "catalogs/");

        let url = sut.issue(Some("spring.pdf")).await.unwrap();

        assert_eq!(url, "https://mock-s3.local/catalogs/spring.pdf?expires=3600");
        assert_eq!(s3.requested_keys(), vec!["catalogs/spring.pdf".to_string()]);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[tokio::test]
    async fn ファイル名がなければストレージを呼ばずに400を返す(#[case] file_name: Option<&str>) {
        let (logs, _guard) = CapturedLogs::install();
        let s3 = MockS3Client::new();
        let sut = make_issuer(s3.clone(), "");

        let result = sut.issue(file_name).await;

        assert!(matches!(result, Err(WebError::BadRequest(msg)) if msg == "Missing fileName"));
        assert!(s3.requested_keys().is_empty());
        assert!(logs.contents().contains("fileName が指定されていない"));
    }

    #[tokio::test]
    async fn ストレージの失敗は汎用メッセージの500になる() {
        let s3 = MockS3Client::new();
        s3.fail_all();
        let sut = make_issuer(s3, "");

        let result = sut.issue(Some("spring.pdf")).await;

        assert!(matches!(
            result,
            Err(WebError::Internal { message, details: None }) if message == "Failed to generate signed URL"
        ));
    }
}
