//! SendGrid v3 mail send client

use super::{MailError, Mailer, OutboundEmail};
use crate::config::EmailConfig;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const MAIL_SEND_PATH: &str = "/v3/mail/send";

/// Shared handle to the SendGrid API, built once at startup.
#[derive(Clone)]
pub struct SendGridClient {
    http: Client,
    endpoint: String,
}

impl SendGridClient {
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key.trim()))
            .map_err(|_| {
                MailError::InvalidCredentials(
                    "API key contains characters that cannot be sent in a header".to_string(),
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("contact-server/", env!("CARGO_PKG_VERSION")));

        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: format!(
                "{}{}",
                config.api_base_url.trim_end_matches('/'),
                MAIL_SEND_PATH
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Mailer for SendGridClient {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&MailSendRequest::from(email))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "SendGrid accepted message");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MailError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

impl<'a> From<&'a OutboundEmail> for MailSendRequest<'a> {
    fn from(email: &'a OutboundEmail) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address { email: &email.to }],
            }],
            from: Address { email: &email.from },
            subject: &email.subject,
            // SendGrid requires text/plain ahead of text/html.
            content: [
                Content {
                    kind: "text/plain",
                    value: &email.text,
                },
                Content {
                    kind: "text/html",
                    value: &email.html,
                },
            ],
        }
    }
}
