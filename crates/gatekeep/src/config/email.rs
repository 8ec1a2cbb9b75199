use std::collections::VecDeque;
use std::sync::Arc;

use futures::lock::Mutex;
use handlebars::Handlebars;
use lettre::message::{header, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde_json::Value;

use crate::{Error, Result, Success};

lazy_static! {
    static ref HANDLEBARS: Handlebars<'static> = Handlebars::new();
}

/// SMTP mail server configuration
#[derive(Serialize, Deserialize, Clone)]
pub struct SmtpSettings {
    /// Sender address
    pub from: String,

    /// Reply-To address
    pub reply_to: Option<String>,

    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: Option<u16>,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Whether to use TLS
    pub use_tls: Option<bool>,
}

/// Email template
#[derive(Serialize, Deserialize, Clone)]
pub struct Template {
    /// Title of the email
    pub title: String,
    /// Plain text version of this email
    pub text: String,
    /// HTML version of this email
    pub html: Option<String>,
}

impl Template {
    /// Substitute variables into the text and HTML bodies
    pub fn render(&self, variables: &Value) -> Result<(String, Option<String>)> {
        let text = HANDLEBARS
            .render_template(&self.text, variables)
            .map_err(|_| Error::RenderFail)?;

        let html = match &self.html {
            Some(html) => Some(
                HANDLEBARS
                    .render_template(html, variables)
                    .map_err(|_| Error::RenderFail)?,
            ),
            None => None,
        };

        Ok((text, html))
    }
}

/// Email templates
#[derive(Serialize, Deserialize, Clone)]
pub struct Templates {
    /// Template for the password reset code email
    ///
    /// `{{username}}`, `{{otp}}`, `{{browser}}` and `{{os}}` are
    /// substituted at send time.
    pub reset: Template,
}

impl Default for Templates {
    fn default() -> Templates {
        Templates {
            reset: Template {
                title: "Your password reset code".into(),
                text: "Hi {{username}},\n\nYour password reset code is {{otp}}.\n\n\
                       This was requested from {{browser}} on {{os}} and \
                       expires in ten minutes.\n\nIf this wasn't you, you \
                       can safely ignore this email."
                    .into(),
                html: Some(include_str!("../../templates/reset.html").into()),
            },
        }
    }
}

/// Outbound message captured by the dummy sender
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Rendered plain text body
    pub text: String,
}

/// In-memory outbox recording outbound email
///
/// Stands in for a real transport in tests and local development.
#[derive(Default, Clone)]
pub struct DummyOutbox(Arc<Mutex<VecDeque<OutboundEmail>>>);

impl DummyOutbox {
    pub async fn push(&self, mail: OutboundEmail) {
        let mut outbox = self.0.lock().await;
        outbox.push_back(mail);
    }

    /// Most recent message delivered to the given address
    pub async fn find_by_recipient(&self, to: &str) -> Option<OutboundEmail> {
        let outbox = self.0.lock().await;
        outbox.iter().rev().find(|mail| mail.to == to).cloned()
    }

    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.0.lock().await.is_empty()
    }
}

/// Email delivery configuration
#[derive(Serialize, Deserialize, Clone)]
pub enum EmailConfig {
    /// Don't deliver email, failing any flow which requires it
    Disabled,
    /// Deliver over SMTP
    Smtp {
        settings: SmtpSettings,
        templates: Templates,
    },
    /// Record outbound email in memory instead of delivering it
    #[serde(skip)]
    Dummy {
        outbox: DummyOutbox,
        templates: Templates,
    },
}

impl Default for EmailConfig {
    fn default() -> EmailConfig {
        EmailConfig::Disabled
    }
}

fn generate_multipart(text: String, html: Option<String>) -> MultiPart {
    if let Some(html) = html {
        MultiPart::alternative()
            .singlepart(
                SinglePart::builder()
                    .header(
                        "text/plain; charset=utf8"
                            .parse::<header::ContentType>()
                            .unwrap(),
                    )
                    .body(text),
            )
            .singlepart(
                SinglePart::builder()
                    .header(
                        "text/html; charset=utf8"
                            .parse::<header::ContentType>()
                            .unwrap(),
                    )
                    .body(html),
            )
    } else {
        MultiPart::mixed().singlepart(
            SinglePart::builder()
                .header(
                    "text/plain; charset=utf8"
                        .parse::<header::ContentType>()
                        .unwrap(),
                )
                .body(text),
        )
    }
}

impl SmtpSettings {
    /// Deliver a rendered message to an address
    pub fn send(&self, to: &str, subject: &str, text: String, html: Option<String>) -> Success {
        let mut builder = Message::builder()
            .from(self.from.parse().map_err(|_| Error::EmailFailed)?)
            .to(to.parse().map_err(|_| Error::EmailFailed)?);

        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(reply_to.parse().map_err(|_| Error::EmailFailed)?);
        }

        let message = builder
            .subject(subject)
            .multipart(generate_multipart(text, html))
            .map_err(|_| Error::InternalError)?;

        let transport = match self.use_tls {
            Some(false) => SmtpTransport::builder_dangerous(&self.host),
            _ => SmtpTransport::relay(&self.host).map_err(|_| Error::EmailFailed)?,
        };

        let mut transport = transport.credentials(Credentials::new(
            self.username.clone(),
            self.password.clone(),
        ));

        if let Some(port) = self.port {
            transport = transport.port(port);
        }

        transport
            .build()
            .send(&message)
            .map_err(|_| Error::EmailFailed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_renders_reset_variables() {
        let templates = Templates::default();

        let (text, html) = templates
            .reset
            .render(&json!({
                "username": "tester",
                "otp": "123456",
                "browser": "Firefox",
                "os": "Linux",
            }))
            .unwrap();

        assert!(text.contains("tester"));
        assert!(text.contains("123456"));

        let html = html.expect("default template carries an HTML part");
        assert!(html.contains("tester"));
        assert!(html.contains("123456"));
        assert!(html.contains("Firefox"));
        assert!(html.contains("Linux"));
    }

    #[test]
    fn it_fails_on_malformed_templates() {
        let template = Template {
            title: "broken".into(),
            text: "{{#each}}".into(),
            html: None,
        };

        assert_eq!(
            template.render(&json!({})).unwrap_err(),
            Error::RenderFail
        );
    }

    #[async_std::test]
    async fn it_records_outbound_email() {
        let outbox = DummyOutbox::default();
        assert!(outbox.is_empty().await);

        outbox
            .push(OutboundEmail {
                to: "one@validemail.com".into(),
                subject: "first".into(),
                text: "body".into(),
            })
            .await;
        outbox
            .push(OutboundEmail {
                to: "one@validemail.com".into(),
                subject: "second".into(),
                text: "body".into(),
            })
            .await;

        assert_eq!(outbox.len().await, 2);

        let mail = outbox.find_by_recipient("one@validemail.com").await.unwrap();
        assert_eq!(mail.subject, "second");

        assert!(outbox.find_by_recipient("other@validemail.com").await.is_none());
    }
}
