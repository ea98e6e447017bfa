// src/services/mailer.rs

//! Email digest rendering and delivery.
//!
//! Renders matched papers into an HTML digest and sends it over SMTP with
//! STARTTLS. Rendering uses plain `{placeholder}` substitution on const
//! templates.

use async_trait::async_trait;
use chrono::Utc;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
};

use crate::error::{AppError, Result};
use crate::models::{EmailConfig, KeywordRuleSet, Paper};

/// Authors shown per paper before truncating with "et al.".
const MAX_DISPLAY_AUTHORS: usize = 3;

/// HTML shell of the digest.
const DIGEST_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; }
        h1 { color: #0066cc; border-bottom: 1px solid #ddd; padding-bottom: 10px; }
        h2 { color: #0066cc; margin-top: 20px; }
        .paper { margin-bottom: 30px; padding-bottom: 20px; border-bottom: 1px solid #eee; }
        .authors { color: #666; font-style: italic; }
        .abstract { margin-top: 10px; text-align: justify; }
        .link { margin-top: 10px; }
        .link a { color: #0066cc; text-decoration: none; }
        .footer { margin-top: 30px; font-size: 0.8em; color: #999; text-align: center; }
    </style>
</head>
<body>
    <h1>arXiv Paper Alert - {date}</h1>

    <p>The following papers match your search criteria:</p>

{papers}
    <div class="footer">
        <p>This email was sent automatically by arXiv Alert.</p>
        <p>Keywords: {keywords}</p>
    </div>
</body>
</html>
"#;

/// One paper block within the digest.
const PAPER_TEMPLATE: &str = r#"    <div class="paper">
        <h2>{title}</h2>
        <div class="authors">{authors}</div>
        <div class="abstract">{abstract}</div>
        <div class="link"><a href="{link}">Read on arXiv</a></div>
    </div>
"#;

/// Trait for delivering a digest of matched papers.
///
/// Only after a successful delivery may the orchestrator mark the papers
/// as sent.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Render and deliver the matches. Zero matches is a successful no-op.
    async fn deliver(&self, matches: &[Paper], rules: &KeywordRuleSet) -> Result<()>;
}

/// Render the full HTML digest for a set of matched papers.
pub fn render_digest(papers: &[Paper], rules: &KeywordRuleSet, date: &str) -> String {
    let blocks: String = papers.iter().map(render_paper).collect();

    render_template(
        DIGEST_TEMPLATE,
        &[
            ("date", date.to_string()),
            ("papers", blocks),
            ("keywords", html_escape(&rules.display())),
        ],
    )
}

fn render_paper(paper: &Paper) -> String {
    render_template(
        PAPER_TEMPLATE,
        &[
            ("title", html_escape(&paper.title)),
            (
                "authors",
                html_escape(&paper.format_authors(MAX_DISPLAY_AUTHORS)),
            ),
            ("abstract", html_escape(&paper.abstract_text)),
            ("link", html_escape(&paper.link)),
        ],
    )
}

/// Substitute `{key}` placeholders in a single pass over the template.
///
/// Substituted values are never rescanned, so paper content that happens
/// to contain a literal placeholder stays verbatim. Brace pairs that match
/// no known key (the CSS block) are kept as-is.
fn render_template(template: &str, fields: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        match tail.find('}') {
            Some(close) => {
                let key = &tail[1..close];
                match fields.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&tail[..=close]),
                }
                rest = &tail[close + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// SMTP notifier using STARTTLS and credential login.
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, html: String, date: &str) -> Result<Message> {
        let mut builder = Message::builder()
            .from(
                self.config
                    .sender
                    .parse()
                    .map_err(|e| AppError::email(format!("invalid sender address: {}", e)))?,
            )
            .subject(format!("arXiv Paper Alert - {}", date));

        for recipient in &self.config.recipients {
            builder = builder.to(recipient
                .parse()
                .map_err(|e| AppError::email(format!("invalid recipient address: {}", e)))?);
        }

        builder
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| AppError::email(format!("failed to build message: {}", e)))
    }
}

#[async_trait]
impl Notifier for SmtpMailer {
    async fn deliver(&self, matches: &[Paper], rules: &KeywordRuleSet) -> Result<()> {
        if matches.is_empty() {
            log::info!("No papers to send, skipping email");
            return Ok(());
        }

        let date = Utc::now().format("%Y-%m-%d").to_string();
        let html = render_digest(matches, rules, &date);
        let email = self.build_message(html, &date)?;

        let credentials = Credentials::new(
            self.config.sender.clone(),
            self.config.password.clone(),
        );
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_server)
            .map_err(|e| AppError::email(format!("SMTP relay error: {}", e)))?
            .credentials(credentials)
            .port(self.config.smtp_port)
            .build();

        mailer
            .send(email)
            .await
            .map_err(|e| AppError::email(format!("failed to send email: {}", e)))?;

        log::info!(
            "Email sent to {} recipient(s) with {} paper(s)",
            self.config.recipients.len(),
            matches.len()
        );
        Ok(())
    }
}

/// Notifier that records deliveries instead of sending mail, for tests.
#[derive(Debug, Default)]
pub struct MockNotifier {
    /// Ids of papers delivered, one entry per deliver call
    pub delivered: std::sync::Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose deliveries always fail.
    pub fn failing() -> Self {
        Self {
            delivered: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn delivery_count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn deliver(&self, matches: &[Paper], _rules: &KeywordRuleSet) -> Result<()> {
        if self.fail {
            return Err(AppError::email("mock delivery failure"));
        }
        let ids = matches.iter().map(|p| p.id.clone()).collect();
        self.delivered.lock().unwrap().push(ids);
        Ok(())
    }
}
