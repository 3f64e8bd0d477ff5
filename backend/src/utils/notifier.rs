use async_trait::async_trait;
use chrono::{DateTime, Utc};
use emyux_shared::{ContactRequest, Locale};
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpSettings;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid email address: {0}")]
    Address(String),
    #[error("Failed to build email message: {0}")]
    Message(String),
    #[error("Failed to deliver email: {0}")]
    Transport(String),
}

/// A validated request plus what the server knows about its arrival.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub reference: String,
    pub request: ContactRequest,
    pub locale: Locale,
    pub received_at: DateTime<Utc>,
}

/// Hands a contact request to whoever answers them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifyError>;
}

/// Writes the request to the log. Used when no mail server is configured.
pub struct LogNotifier;

#[async_trait]
impl ContactNotifier for LogNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let request = &submission.request;
        tracing::info!(
            reference = %submission.reference,
            locale = %submission.locale,
            project_type = %request.project_type,
            timeline = %request.timeline,
            name = %request.name,
            email = %request.email,
            "New contact request: {}",
            request.description
        );
        Ok(())
    }
}

pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    inbox: Mailbox,
}

impl SmtpNotifier {
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotifyError> {
        let from = settings
            .from
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::Address(format!("{}: {}", settings.from, e)))?;
        let inbox = settings
            .inbox
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::Address(format!("{}: {}", settings.inbox, e)))?;
        let creds = Credentials::new(settings.username.clone(), settings.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| NotifyError::Transport(format!("Failed to create SMTP relay: {}", e)))?
            .port(settings.port)
            .credentials(creds)
            .build();
        Ok(Self { mailer, from, inbox })
    }
}

pub fn format_subject(submission: &ContactSubmission) -> String {
    let request = &submission.request;
    format!(
        "[{}] {} from {} ({})",
        submission.reference, request.project_type, request.name, request.timeline
    )
}

pub fn format_body(submission: &ContactSubmission) -> String {
    let request = &submission.request;
    format!(
        "Name: {}\nEmail: {}\nProject type: {}\nTimeline: {}\nLocale: {}\nReceived: {}\nReference: {}\n\n{}\n",
        request.name,
        request.email,
        request.project_type,
        request.timeline,
        submission.locale,
        submission.received_at.to_rfc3339(),
        submission.reference,
        request.description,
    )
}

#[async_trait]
impl ContactNotifier for SmtpNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let request = &submission.request;
        let reply_address = request
            .email
            .parse::<Address>()
            .map_err(|e| NotifyError::Address(format!("{}: {}", request.email, e)))?;
        let email_message = Message::builder()
            .from(self.from.clone())
            .to(self.inbox.clone())
            .reply_to(Mailbox::new(Some(request.name.clone()), reply_address))
            .subject(format_subject(submission))
            .header(ContentType::TEXT_PLAIN)
            .body(format_body(submission))
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        tracing::info!("Sending contact request {} via SMTP", submission.reference);
        self.mailer
            .send(email_message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        tracing::info!("Contact request {} delivered", submission.reference);
        Ok(())
    }
}
