use super::OutboundEmail;
use crate::{config::EmailConfig, models::ContactSubmission, validation::sanitize_html};

/// Builds the notification email sent to the site owner for a submission.
///
/// The plain-text body carries the submitted values verbatim. The HTML body
/// escapes them so a submission cannot inject markup into the owner's inbox.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    to: String,
    from: String,
    subject_prefix: String,
    default_subject: String,
}

impl MessageComposer {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            to: config.to.clone(),
            from: config.from.clone(),
            subject_prefix: config.subject_prefix.clone(),
            default_subject: config.default_subject.clone(),
        }
    }

    pub fn compose(&self, submission: &ContactSubmission) -> OutboundEmail {
        let subject_line = submission
            .subject
            .as_deref()
            .unwrap_or(&self.default_subject);

        OutboundEmail {
            to: self.to.clone(),
            from: self.from.clone(),
            subject: format!("{}{}", self.subject_prefix, subject_line),
            text: format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}",
                submission.name, submission.email, submission.message
            ),
            html: render_html(submission, subject_line),
        }
    }
}

fn render_html(submission: &ContactSubmission, subject_line: &str) -> String {
    let name = sanitize_html(&submission.name);
    let email = sanitize_html(&submission.email);
    let subject = sanitize_html(subject_line);
    let message = sanitize_html(&submission.message);

    format!(
        r#"<div style="font-family: sans-serif; padding: 20px; background: #f4f4f4;">
  <div style="background: white; padding: 20px; border-radius: 8px;">
    <h2 style="color: #333;">New Project Inquiry</h2>
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
    <p><strong>Subject:</strong> {subject}</p>
    <hr />
    <p><strong>Message:</strong></p>
    <p style="white-space: pre-wrap;">{message}</p>
  </div>
</div>"#
    )
}
