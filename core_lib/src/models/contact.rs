//! Contact form payloads and responses

use serde::{Deserialize, Serialize};

/// Raw contact form body as posted by the site.
///
/// Every field is optional on the wire so that absent values are reported
/// by the required-field check rather than by the JSON decoder. A field with
/// a non-string JSON type still fails to decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub honeypot: Option<String>,
}

impl SubmissionRequest {
    /// The honeypot input is hidden from people, so any content means a bot.
    pub fn is_bot_trap(&self) -> bool {
        self.honeypot.as_deref().is_some_and(|value| !value.is_empty())
    }
}

/// A submission that passed the required-field and length checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactResponse {
    /// Same shape a real success has minus the message, handed to bots.
    pub fn suppressed() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn delivered() -> Self {
        Self {
            success: true,
            message: Some("Email sent successfully".to_string()),
        }
    }
}
