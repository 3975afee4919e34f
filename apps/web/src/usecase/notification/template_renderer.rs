//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **自動エスケープなし**: 入力は信頼済みとして扱い、HTML をそのまま埋め込む
//! - **改行の変換**: HTML 版では本文の改行を `<br>` に変換する。テキスト版は元の改行を保つ
//! - **純粋関数**: 外部呼び出しを行わない

use storefront_domain::{
    inquiry::{CatalogRequest, InquiryId, OrderInquiry, QuoteRequest},
    notification::{BulkEmail, EmailMessage, NotificationError, NotificationKind},
};
use tera::{Context, Tera};

/// レンダリング対象の通知
///
/// 1 つのバリアントが 1 通のメール（= 1 組のテンプレート）に対応する。
#[derive(Debug, Clone, Copy)]
pub enum OutgoingNotification<'a> {
    /// 見積もり依頼: 管理者への通知
    QuoteAdmin {
        id:      &'a InquiryId,
        request: &'a QuoteRequest,
    },
    /// 見積もり依頼: 顧客への受付確認
    QuoteAck {
        id:      &'a InquiryId,
        request: &'a QuoteRequest,
    },
    /// 注文問い合わせ: 管理者への通知
    OrderAdmin { inquiry: &'a OrderInquiry },
    /// カタログ請求: 管理者への通知
    CatalogRequest { request: &'a CatalogRequest },
    /// 一括送信の 1 宛先分
    Bulk { email: &'a BulkEmail },
}

impl OutgoingNotification<'_> {
    /// 通知種別を返す
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::QuoteAdmin { .. } => NotificationKind::QuoteAdmin,
            Self::QuoteAck { .. } => NotificationKind::QuoteAck,
            Self::OrderAdmin { .. } => NotificationKind::OrderAdmin,
            Self::CatalogRequest { .. } => NotificationKind::CatalogRequest,
            Self::Bulk { .. } => NotificationKind::Bulk,
        }
    }
}

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、[`OutgoingNotification`] から
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();
        engine.autoescape_on(vec![]);

        engine
            .add_raw_templates(vec![
                (
                    "quote_admin.html",
                    include_str!("../../../templates/notifications/quote_admin.html"),
                ),
                (
                    "quote_admin.txt",
                    include_str!("../../../templates/notifications/quote_admin.txt"),
                ),
                (
                    "quote_ack.html",
                    include_str!("../../../templates/notifications/quote_ack.html"),
                ),
                (
                    "quote_ack.txt",
                    include_str!("../../../templates/notifications/quote_ack.txt"),
                ),
                (
                    "order_admin.html",
                    include_str!("../../../templates/notifications/order_admin.html"),
                ),
                (
                    "order_admin.txt",
                    include_str!("../../../templates/notifications/order_admin.txt"),
                ),
                (
                    "catalog_request.html",
                    include_str!("../../../templates/notifications/catalog_request.html"),
                ),
                (
                    "catalog_request.txt",
                    include_str!("../../../templates/notifications/catalog_request.txt"),
                ),
                (
                    "bulk.html",
                    include_str!("../../../templates/notifications/bulk.html"),
                ),
                (
                    "bulk.txt",
                    include_str!("../../../templates/notifications/bulk.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 通知からメールメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `notification`: レンダリング対象の通知
    /// - `to`: 送信先メールアドレス
    pub fn render(
        &self,
        notification: &OutgoingNotification<'_>,
        to: &str,
    ) -> Result<EmailMessage, NotificationError> {
        let template_name = notification.kind().template_name();
        let context = build_context(notification, to);

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let email = EmailMessage {
            to: to.to_string(),
            subject: subject(notification),
            html_body,
            text_body,
            ..Default::default()
        };

        Ok(with_sender_headers(email, notification))
    }
}

/// 件名を組み立てる
fn subject(notification: &OutgoingNotification<'_>) -> String {
    match notification {
        OutgoingNotification::QuoteAdmin { id, request } => format!(
            "New quote request {id} from {} {}",
            request.customer.first_name, request.customer.last_name
        ),
        OutgoingNotification::QuoteAck { id, .. } => {
            format!("We received your quote request ({id})")
        }
        OutgoingNotification::OrderAdmin { inquiry } => format!(
            "New inquiry {} from {} {}",
            inquiry.inquiry_id, inquiry.customer.first_name, inquiry.customer.last_name
        ),
        OutgoingNotification::CatalogRequest { request } => {
            format!("Catalog request: {}", request.catalog_title)
        }
        OutgoingNotification::Bulk { email } => email.subject.clone(),
    }
}

/// 差出人表示名・返信先・CC を設定する
///
/// 管理者向けの通知は顧客に直接返信できるよう、返信先を顧客のアドレスにする。
fn with_sender_headers(email: EmailMessage, notification: &OutgoingNotification<'_>) -> EmailMessage {
    match notification {
        OutgoingNotification::QuoteAdmin { request, .. } => email
            .with_from_name(request.customer.full_name())
            .with_reply_to(&request.customer.email),
        OutgoingNotification::QuoteAck { .. } => email,
        OutgoingNotification::OrderAdmin { inquiry } => email
            .with_from_name(inquiry.customer.full_name())
            .with_reply_to(&inquiry.customer.email),
        OutgoingNotification::CatalogRequest { request } => email
            .with_from_name(&request.name)
            .with_reply_to(&request.email),
        OutgoingNotification::Bulk { email: bulk } => EmailMessage {
            from_name: Some(bulk.from_name.clone()).filter(|name| !name.is_empty()),
            reply_to: bulk.reply_to.clone().filter(|addr| !addr.is_empty()),
            cc: bulk.cc.clone(),
            ..email
        },
    }
}

/// テンプレートに渡すコンテキストを構築する
///
/// 送信先は全テンプレートで `recipient` として参照できる。
fn build_context(notification: &OutgoingNotification<'_>, to: &str) -> Context {
    let mut context = Context::new();
    context.insert("recipient", to);

    match notification {
        OutgoingNotification::QuoteAdmin { id, request }
        | OutgoingNotification::QuoteAck { id, request } => {
            let customer = &request.customer;
            context.insert("id", id.as_str());
            context.insert("first_name", &customer.first_name);
            context.insert("last_name", &customer.last_name);
            context.insert("email", &customer.email);
            context.insert("phone", &customer.phone.as_deref().unwrap_or(""));
            context.insert("street_address", &customer.street_address);
            context.insert("company", &customer.company);
            context.insert("message", &request.message);
            context.insert("message_html", &nl2br(&request.message));
            context.insert("attachment_url", &request.attachment_url);
        }
        OutgoingNotification::OrderAdmin { inquiry } => {
            let customer = &inquiry.customer;
            context.insert("inquiry_id", inquiry.inquiry_id.as_str());
            context.insert("first_name", &customer.first_name);
            context.insert("last_name", &customer.last_name);
            context.insert("email", &customer.email);
            context.insert("phone", &customer.phone);
            context.insert("street_address", &customer.street_address);
            context.insert("apartment", &customer.apartment);
            context.insert("order_notes", &inquiry.order_notes);
            context.insert(
                "order_notes_html",
                &inquiry.order_notes.as_deref().map(nl2br),
            );
            context.insert("items", &inquiry.items);
        }
        OutgoingNotification::CatalogRequest { request } => {
            context.insert("name", &request.name);
            context.insert("email", &request.email);
            context.insert("catalog_title", &request.catalog_title);
        }
        OutgoingNotification::Bulk { email } => {
            context.insert("from_name", &email.from_name);
            context.insert("subject", &email.subject);
            context.insert("content", &email.content);
            context.insert("content_html", &nl2br(&email.content));
        }
    }

    context
}

/// 改行を `<br>` に変換する
///
/// `\r\n` / `\n` / `\r` のいずれも 1 つの `<br>` になる。
pub fn nl2br(text: &str) -> String {
    text.replace("\r\n", "<br>").replace(['\r', '\n'], "<br>")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use storefront_domain::inquiry::{CustomerContact, LineItem};

    use super::*;

    fn customer() -> CustomerContact {
        CustomerContact {
            first_name:     "Jane".to_string(),
            last_name:      "Doe".to_string(),
            email:          "jane@example.com".to_string(),
            phone:          Some("555-0100".to_string()),
            street_address: "1 Main St".to_string(),
            apartment:      None,
            company:        Some("Acme".to_string()),
        }
    }

    fn quote() -> QuoteRequest {
        QuoteRequest {
            customer:       customer(),
            message:        "Line one\nLine two\r\nLine three".to_string(),
            attachment_url: Some("https://files.example.com/drawing.pdf".to_string()),
        }
    }

    /// `<p>` 本文段落の中身を取り出す
    fn paragraph_containing<'a>(html: &'a str, needle: &str) -> &'a str {
        html.split("<p>")
            .find(|p| p.contains(needle))
            .and_then(|p| p.split("</p>").next())
            .unwrap()
    }

    #[test]
    fn newが正常に初期化される() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[rstest]
    #[case("a\nb", "a<br>b")]
    #[case("a\r\nb", "a<br>b")]
    #[case("a\rb", "a<br>b")]
    #[case("a\n\nb", "a<br><br>b")]
    #[case("no newline", "no newline")]
    fn nl2brは全種類の改行をbrに変換する(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(nl2br(input), expected);
    }

    #[test]
    fn quote_adminのレンダリングが正しい() {
        let renderer = TemplateRenderer::new().unwrap();
        let id = InquiryId::from_client("ABC123def456");
        let request = quote();

        let email = renderer
            .render(
                &OutgoingNotification::QuoteAdmin {
                    id:      &id,
                    request: &request,
                },
                "quotes@example.com",
            )
            .unwrap();

        assert_eq!(email.to, "quotes@example.com");
        assert_eq!(email.subject, "New quote request ABC123def456 from Jane Doe");
        assert_eq!(email.from_name.as_deref(), Some("Jane Doe"));
        assert_eq!(email.reply_to.as_deref(), Some("jane@example.com"));
        assert!(email.html_body.contains("Acme"));
        assert!(email.html_body.contains("https://files.example.com/drawing.pdf"));
        assert!(email.text_body.contains("Line one\nLine two\r\nLine three"));
    }

    #[test]
    fn html本文の段落には生の改行が残らない() {
        let renderer = TemplateRenderer::new().unwrap();
        let id = InquiryId::generate();
        let request = quote();

        let email = renderer
            .render(
                &OutgoingNotification::QuoteAck {
                    id:      &id,
                    request: &request,
                },
                "jane@example.com",
            )
            .unwrap();

        let body = paragraph_containing(&email.html_body, "Line one");
        assert_eq!(body, "Line one<br>Line two<br>Line three");
    }

    #[test]
    fn quote_ackは顧客宛てで返信先を持たない() {
        let renderer = TemplateRenderer::new().unwrap();
        let id = InquiryId::from_client("ABC123def456");
        let request = quote();

        let email = renderer
            .render(
                &OutgoingNotification::QuoteAck {
                    id:      &id,
                    request: &request,
                },
                "jane@example.com",
            )
            .unwrap();

        assert_eq!(email.subject, "We received your quote request (ABC123def456)");
        assert!(email.reply_to.is_none());
        assert!(email.html_body.contains("Hi Jane"));
    }

    #[test]
    fn order_adminは明細を一覧に含める() {
        let renderer = TemplateRenderer::new().unwrap();
        let inquiry = OrderInquiry {
            inquiry_id:  InquiryId::from_client("INQ-42"),
            customer:    customer(),
            order_notes: Some("Leave at door\nThanks".to_string()),
            items:       vec![
                LineItem {
                    name:     "Oak Table".to_string(),
                    quantity: "2".to_string(),
                    image:    Some("https://img.example.com/oak.png".to_string()),
                    sku:      Some("OAK-01".to_string()),
                },
                LineItem {
                    name:     "Pine Chair".to_string(),
                    quantity: "4".to_string(),
                    image:    None,
                    sku:      None,
                },
            ],
        };

        let email = renderer
            .render(
                &OutgoingNotification::OrderAdmin { inquiry: &inquiry },
                "orders@example.com",
            )
            .unwrap();

        assert_eq!(email.subject, "New inquiry INQ-42 from Jane Doe");
        assert!(email.html_body.contains("Oak Table"));
        assert!(email.html_body.contains("OAK-01"));
        assert!(email.html_body.contains("https://img.example.com/oak.png"));
        assert!(email.html_body.contains("Leave at door<br>Thanks"));
        assert!(email.text_body.contains("- 2 x Oak Table (OAK-01)"));
        assert!(email.text_body.contains("- 4 x Pine Chair"));
    }

    #[test]
    fn catalog_requestの件名にカタログ名が入る() {
        let renderer = TemplateRenderer::new().unwrap();
        let request = CatalogRequest {
            name:          "Sam".to_string(),
            email:         "sam@example.com".to_string(),
            catalog_title: "Spring 2025".to_string(),
        };

        let email = renderer
            .render(
                &OutgoingNotification::CatalogRequest { request: &request },
                "quotes@example.com",
            )
            .unwrap();

        assert_eq!(email.subject, "Catalog request: Spring 2025");
        assert_eq!(email.reply_to.as_deref(), Some("sam@example.com"));
        assert!(email.text_body.contains("Sam (sam@example.com)"));
    }

    #[test]
    fn bulkは呼び出し元の件名とccをそのまま使う() {
        let renderer = TemplateRenderer::new().unwrap();
        let bulk = BulkEmail {
            from_name:  "Acme Sales".to_string(),
            reply_to:   Some("sales@example.com".to_string()),
            cc:         vec!["manager@example.com".to_string()],
            subject:    "Spring promotion".to_string(),
            content:    "Hello\nWorld".to_string(),
            recipients: vec![],
        };

        let email = renderer
            .render(&OutgoingNotification::Bulk { email: &bulk }, "a@example.com")
            .unwrap();

        assert_eq!(email.to, "a@example.com");
        assert_eq!(email.subject, "Spring promotion");
        assert_eq!(email.from_name.as_deref(), Some("Acme Sales"));
        assert_eq!(email.cc, vec!["manager@example.com".to_string()]);
        assert_eq!(paragraph_containing(&email.html_body, "Hello"), "Hello<br>World");
        assert!(email.text_body.starts_with("Hello\nWorld"));
    }

    #[test]
    fn bulkは宛先ごとに個別の本文を生成する() {
        let renderer = TemplateRenderer::new().unwrap();
        let bulk = BulkEmail {
            from_name: "Acme".to_string(),
            subject: "s".to_string(),
            content: "Hello".to_string(),
            ..Default::default()
        };
        let notification = OutgoingNotification::Bulk { email: &bulk };

        let first = renderer.render(&notification, "a@example.com").unwrap();
        let second = renderer.render(&notification, "b@example.com").unwrap();

        assert!(first.html_body.contains("a@example.com"));
        assert!(second.text_body.contains("b@example.com"));
        assert_ne!(first.html_body, second.html_body);
    }

    #[test]
    fn 自動エスケープは行わない() {
        let renderer = TemplateRenderer::new().unwrap();
        let bulk = BulkEmail {
            from_name: "Acme".to_string(),
            subject: "s".to_string(),
            content: "<b>bold</b>".to_string(),
            ..Default::default()
        };

        let email = renderer
            .render(&OutgoingNotification::Bulk { email: &bulk }, "a@example.com")
            .unwrap();

        assert!(email.html_body.contains("<b>bold</b>"));
    }
}
