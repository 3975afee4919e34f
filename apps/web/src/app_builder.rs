//! # アプリケーション構築
//!
//! DI（ユースケース・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use storefront_domain::{clock::Clock, notification::NotificationError};
use storefront_infra::{
    notification::NotificationSender,
    repository::AccountRepository,
    s3::S3Client,
};
use storefront_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    config::WebConfig,
    handler::{
        AccountState,
        DocumentState,
        NotificationState,
        get_signed_pdf,
        health_check,
        register_account,
        send_bulk_email,
        send_catalog_request,
        send_order_inquiry,
        send_quote,
    },
    middleware::{no_cache, session_gate},
    usecase::{
        AccountProvisioner,
        BulkDispatcher,
        InquiryNotifier,
        SignedLinkIssuer,
        TemplateRenderer,
    },
};

/// 外部サービスへの依存
///
/// 起動時に一度だけ構築し、全リクエストで共有する。
/// テストではモックを渡す。
pub struct AppDependencies {
    pub sender:             Arc<dyn NotificationSender>,
    pub s3_client:          Arc<dyn S3Client>,
    pub account_repository: Arc<dyn AccountRepository>,
    pub clock:              Arc<dyn Clock>,
}

/// DI コンテナの構築とルーター定義を行う
///
/// インフラ初期化済みの依存を受け取り、ユースケース → State → Router の
/// 順に組み立てる。
///
/// # エラー
///
/// 埋め込みテンプレートの登録に失敗した場合
///
/// # パニック
///
/// `LOGIN_PATH` が API のパスと重複している場合（axum のルート重複）
pub fn build_app(config: &WebConfig, deps: AppDependencies) -> Result<Router, NotificationError> {
    // テンプレートレンダラーは問い合わせ通知と一括送信で共有する
    let renderer = Arc::new(TemplateRenderer::new()?);

    let notification_state = Arc::new(NotificationState {
        notifier:   InquiryNotifier::new(
            deps.sender.clone(),
            renderer.clone(),
            config.notification.quote_notify_address.clone(),
            config.notification.order_notify_address.clone(),
        ),
        dispatcher: BulkDispatcher::new(deps.sender, renderer),
    });

    let document_state = Arc::new(DocumentState {
        issuer: SignedLinkIssuer::new(
            deps.s3_client,
            config.storage.key_prefix.clone(),
            config.storage.signed_url_ttl,
        ),
    });

    let account_state = Arc::new(AccountState {
        provisioner: AccountProvisioner::new(deps.account_repository, deps.clock),
    });

    // API ルーター
    // キャッシュ制御: 動的 API レスポンスがブラウザにキャッシュされないようにする
    let api = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/application", post(send_bulk_email))
                .route("/quote", post(send_quote))
                .route("/send-email", post(send_order_inquiry))
                .route("/catalog-request", post(send_catalog_request))
                .with_state(notification_state),
        )
        .merge(
            Router::new()
                .route("/getSignedPDF", get(get_signed_pdf))
                .with_state(document_state),
        )
        .merge(
            Router::new()
                .route("/auth/register", post(register_account))
                .with_state(account_state),
        )
        .layer(from_fn(no_cache));

    // ルーター構築
    // ログイン画面はパスを設定で変えられるため、ファイル名と切り離して配信する
    // API にマッチしないパスは静的ファイル（公開ページ・管理画面）にフォールバックする
    // Request ID + TraceLayer により、すべての HTTP リクエストに request_id が付与されログに自動注入される
    Ok(Router::new()
        .merge(api)
        .route_service(
            &config.session_gate.login_path,
            ServeFile::new(Path::new(&config.public_dir).join("login.html")),
        )
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(from_fn_with_state(
            config.session_gate.clone(),
            session_gate,
        ))
        // Request ID レイヤー（レイヤー順序が重要: 下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: リクエスト受信時に UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7)))
}
