//! # Storefront Web サーバー
//!
//! ## 環境変数
//!
//! すべての変数に既定値がある。一覧は [`storefront_web::config`] を参照。
//!
//! | 変数名 | 既定値 | 説明 |
//! |--------|--------|------|
//! | `WEB_HOST` | `0.0.0.0` | バインドアドレス |
//! | `WEB_PORT` | `3000` | ポート番号 |
//! | `NOTIFICATION_BACKEND` | `noop` | メール送信（`smtp` / `ses` / `noop`） |
//! | `S3_ENDPOINT_URL` | - | MinIO のエンドポイント |
//! | `DYNAMODB_ENDPOINT` | - | DynamoDB Local のエンドポイント |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p storefront-web
//!
//! # 本番環境（環境変数を直接指定）
//! WEB_PORT=8080 NOTIFICATION_BACKEND=ses cargo run -p storefront-web --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use storefront_domain::clock::SystemClock;
use storefront_infra::{
    dynamodb,
    notification::build_sender,
    repository::DynamoDbAccountRepository,
    s3::{self, AwsS3Client},
};
use storefront_shared::observability::{TracingConfig, init_tracing};
use storefront_web::{
    app_builder::{AppDependencies, build_app},
    config::WebConfig,
};
use tokio::net::TcpListener;

/// Web サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. 外部サービスのクライアント構築
/// 5. ルーターの構築
/// 6. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("storefront-web"));
    let _tracing_guard = tracing::info_span!("app", service = "storefront-web").entered();

    // 設定読み込み
    let config = WebConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!("Web サーバーを起動します: {}:{}", config.host, config.port);

    // メール送信（プロセス全体で 1 つのトランスポートを共有する）
    let sender = build_sender(&config.notification.sender).await;

    // S3 クライアントの初期化
    let s3_client = s3::create_client(config.storage.endpoint_url.as_deref()).await;
    let s3_client = Arc::new(AwsS3Client::new(
        s3_client,
        config.storage.bucket_name.clone(),
    ));

    // DynamoDB クライアントの初期化
    let dynamodb_client = dynamodb::create_client(config.accounts.endpoint_url.as_deref()).await;
    dynamodb::ensure_accounts_table(&dynamodb_client, &config.accounts.table_name)
        .await
        .context("DynamoDB アカウントテーブルのセットアップに失敗しました")?;
    let account_repository = Arc::new(DynamoDbAccountRepository::new(
        dynamodb_client,
        config.accounts.table_name.clone(),
    ));

    // ルーター構築
    let app = build_app(
        &config,
        AppDependencies {
            sender,
            s3_client,
            account_repository,
            clock: Arc::new(SystemClock),
        },
    )
    .context("ルーターの構築に失敗しました")?;

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Web サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
