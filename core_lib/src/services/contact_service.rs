use crate::{
    config::{AppConfig, LimitsConfig},
    email::{Mailer, MessageComposer},
    error::{AppError, Result},
    models::SubmissionRequest,
    validation::validate_submission,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Honeypot tripped; nothing was sent.
    Suppressed,
    Delivered,
}

/// Runs a contact submission through the bot trap, validation and a single
/// delivery attempt.
#[derive(Clone)]
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    composer: MessageComposer,
    limits: LimitsConfig,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn Mailer>, composer: MessageComposer, limits: LimitsConfig) -> Self {
        Self {
            mailer,
            composer,
            limits,
        }
    }

    pub fn from_config(mailer: Arc<dyn Mailer>, config: &AppConfig) -> Self {
        Self::new(
            mailer,
            MessageComposer::new(&config.email),
            config.limits.clone(),
        )
    }

    pub async fn submit(&self, request: SubmissionRequest) -> Result<SubmissionOutcome> {
        if request.is_bot_trap() {
            info!("Honeypot field filled, dropping submission");
            return Ok(SubmissionOutcome::Suppressed);
        }

        let submission = match validate_submission(request, &self.limits) {
            Ok(submission) => submission,
            Err(err) => {
                warn!("Rejected contact submission: {}", err);
                return Err(err);
            }
        };

        let email = self.composer.compose(&submission);
        self.mailer.send(&email).await.map_err(AppError::Delivery)?;

        info!(subject = %email.subject, "Contact email delivered");
        Ok(SubmissionOutcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::EmailConfig,
        email::{MailError, OutboundEmail},
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutboundEmail) -> std::result::Result<(), MailError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _email: &OutboundEmail) -> std::result::Result<(), MailError> {
            Err(MailError::Rejected {
                status: 403,
                body: "sender identity not verified".to_string(),
            })
        }
    }

    fn email_config() -> EmailConfig {
        EmailConfig {
            api_key: "SG.test".to_string(),
            from: "noreply@example.com".to_string(),
            to: "owner@example.com".to_string(),
            ..EmailConfig::default()
        }
    }

    fn service(mailer: Arc<dyn Mailer>) -> ContactService {
        ContactService::new(
            mailer,
            MessageComposer::new(&email_config()),
            LimitsConfig::default(),
        )
    }

    fn well_formed() -> SubmissionRequest {
        SubmissionRequest {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            subject: Some("Hello".to_string()),
            message: Some("Let's talk.".to_string()),
            honeypot: Some(String::new()),
        }
    }

    #[tokio::test]
    async fn test_honeypot_suppresses_delivery() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(mailer.clone());

        let mut request = well_formed();
        request.honeypot = Some("gotcha".to_string());
        assert_eq!(
            service.submit(request).await.unwrap(),
            SubmissionOutcome::Suppressed
        );

        // Even an otherwise invalid request is answered as a success.
        let request = SubmissionRequest {
            honeypot: Some("gotcha".to_string()),
            ..SubmissionRequest::default()
        };
        assert_eq!(
            service.submit(request).await.unwrap(),
            SubmissionOutcome::Suppressed
        );

        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_skip_delivery() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(mailer.clone());

        let mut request = well_formed();
        request.message = None;

        assert!(matches!(
            service.submit(request).await,
            Err(AppError::MissingFields)
        ));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_well_formed_request_is_delivered_once() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(mailer.clone());

        let outcome = service.submit(well_formed()).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Delivered);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].from, "noreply@example.com");
        assert_eq!(sent[0].subject, "Portfolio Lead: Hello");
        assert!(sent[0].text.contains("Jane Doe"));
        assert!(sent[0].text.contains("jane@example.com"));
        assert!(sent[0].text.contains("Let's talk."));
    }

    #[tokio::test]
    async fn test_missing_subject_uses_placeholder() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(mailer.clone());

        let mut request = well_formed();
        request.subject = None;
        service.submit(request).await.unwrap();

        assert_eq!(
            mailer.sent.lock().unwrap()[0].subject,
            "Portfolio Lead: New Message"
        );
    }

    #[tokio::test]
    async fn test_whitespace_only_name_is_delivered() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(mailer.clone());

        let mut request = well_formed();
        request.name = Some("   ".to_string());
        request.subject = Some(" ".to_string());

        assert_eq!(
            service.submit(request).await.unwrap(),
            SubmissionOutcome::Delivered
        );

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Portfolio Lead:  ");
        assert!(sent[0].text.starts_with("Name:    \n"));
    }

    #[tokio::test]
    async fn test_delivery_failure_is_reported() {
        let service = service(Arc::new(FailingMailer));

        assert!(matches!(
            service.submit(well_formed()).await,
            Err(AppError::Delivery(MailError::Rejected { status: 403, .. }))
        ));
    }

    #[tokio::test]
    async fn test_identical_submissions_are_not_deduplicated() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(mailer.clone());

        service.submit(well_formed()).await.unwrap();
        service.submit(well_formed()).await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
    }
}
