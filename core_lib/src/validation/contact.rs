//! Required-field and length checks for the contact form

use super::ValidationResult;
use crate::{
    config::LimitsConfig,
    error::{AppError, Result},
    models::{ContactSubmission, SubmissionRequest},
};
use validator::ValidateLength;

/// Turns a raw submission into one that is safe to compose an email from.
///
/// Missing or empty `name`, `email` or `message` yields
/// [`AppError::MissingFields`]. Whitespace is content and passes. Over-long
/// fields yield [`AppError::Validation`] listing every offending field. An
/// empty subject is treated as absent.
pub fn validate_submission(
    request: SubmissionRequest,
    limits: &LimitsConfig,
) -> Result<ContactSubmission> {
    let SubmissionRequest {
        name,
        email,
        subject,
        message,
        ..
    } = request;

    let (Some(name), Some(email), Some(message)) =
        (present(name), present(email), present(message))
    else {
        return Err(AppError::MissingFields);
    };
    let subject = present(subject);

    let mut result = ValidationResult::success();
    check_length(&mut result, "name", &name, limits.max_name_length);
    check_length(&mut result, "email", &email, limits.max_email_length);
    if let Some(subject) = &subject {
        check_length(&mut result, "subject", subject, limits.max_subject_length);
    }
    check_length(&mut result, "message", &message, limits.max_message_length);

    if !result.is_valid {
        return Err(AppError::Validation(result));
    }

    Ok(ContactSubmission {
        name,
        email,
        subject,
        message,
    })
}

/// Escapes user text for interpolation into HTML markup.
pub fn sanitize_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn check_length(result: &mut ValidationResult, field: &str, value: &str, max: u64) {
    if !value.validate_length(None, Some(max), None) {
        result.add_error(field, &format!("Must not exceed {} characters", max));
    }
}
