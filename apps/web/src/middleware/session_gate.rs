//! # セッションゲート
//!
//! 管理画面とログイン画面の間のリダイレクトを行う。
//!
//! | リクエスト | セッション Cookie | 結果 |
//! |-----------|------------------|------|
//! | 管理画面（配下を含む） | なし | ログイン画面へ 307 |
//! | ログイン画面 | あり | 管理画面へ 307 |
//! | それ以外 | - | そのまま通す |
//!
//! Cookie の中身は検証しない。空でない値があれば「セッションあり」とみなす。
//! セッションの正当性は認証基盤側の責務。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .fallback_service(ServeDir::new("public"))
//!     .layer(from_fn_with_state(config.session_gate.clone(), session_gate))
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::config::SessionGateConfig;

/// セッションゲートミドルウェア
pub async fn session_gate(
    State(config): State<SessionGateConfig>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    let has_session = jar
        .get(&config.cookie_name)
        .is_some_and(|cookie| !cookie.value().is_empty());

    if is_under(path, &config.admin_path) && !has_session {
        tracing::debug!(path, "セッションがないためログイン画面へリダイレクト");
        return Redirect::temporary(&config.login_path).into_response();
    }

    if path == config.login_path && has_session {
        tracing::debug!(path, "セッションがあるため管理画面へリダイレクト");
        return Redirect::temporary(&config.admin_path).into_response();
    }

    next.run(request).await
}

/// `path` が `base` 自身またはその配下かどうか
///
/// `/admin` に対して `/administrator` は配下とみなさない。
fn is_under(path: &str, base: &str) -> bool {
    path.strip_prefix(base)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{StatusCode, header},
        middleware::from_fn_with_state,
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;

    fn test_app() -> Router {
        let config = SessionGateConfig {
            admin_path:  "/admin".to_string(),
            login_path:  "/login".to_string(),
            cookie_name: "session".to_string(),
        };
        Router::new()
            .route("/admin", get(|| async { "admin" }))
            .route("/admin/orders", get(|| async { "orders" }))
            .route("/login", get(|| async { "login" }))
            .route("/administrator", get(|| async { "other" }))
            .layer(from_fn_with_state(config, session_gate))
    }

    async fn request(path: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        test_app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[rstest]
    #[case("/admin")]
    #[case("/admin/orders")]
    #[tokio::test]
    async fn test_セッションなしで管理画面にアクセスするとログイン画面へ(#[case] path: &str) {
        let response = request(path, None).await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_空のcookieはセッションなしとみなす() {
        let response = request("/admin", Some("session=")).await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_セッションありで管理画面にアクセスすると通過する() {
        let response = request("/admin", Some("session=abc123")).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_セッションありでログイン画面にアクセスすると管理画面へ() {
        let response = request("/login", Some("theme=dark; session=abc123")).await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/admin");
    }

    #[tokio::test]
    async fn test_セッションなしでログイン画面にアクセスすると通過する() {
        let response = request("/login", None).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_接頭辞が一致するだけのパスは対象外() {
        let response = request("/administrator", None).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[case("/admin", "/admin", true)]
    #[case("/admin/", "/admin", true)]
    #[case("/admin/a/b", "/admin", true)]
    #[case("/administrator", "/admin", false)]
    #[case("/", "/admin", false)]
    fn test_is_underは区切り文字で判定する(
        #[case] path: &str,
        #[case] base: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_under(path, base), expected);
    }
}
