//! Outbound email: message composition and delivery

pub mod composer;
pub mod sendgrid;

pub use composer::MessageComposer;
pub use sendgrid::SendGridClient;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// A fully addressed message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
}

/// Delivery seam between the contact service and the email provider.
///
/// One call is one delivery attempt; implementations do not retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}
