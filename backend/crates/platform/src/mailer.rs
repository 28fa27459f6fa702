//! Outbound Mail
//!
//! SMTP mail sending behind a trait seam so application code can be tested
//! against an in-memory fake. Delivery failures surface as errors to the
//! caller; nothing is silently swallowed or retried.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Mail sending errors
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport configuration is invalid
    #[error("Mailer configuration error: {0}")]
    Configuration(String),

    /// Message could not be built (bad address, etc.)
    #[error("Invalid mail message: {0}")]
    InvalidMessage(String),

    /// The relay rejected or failed to deliver the message
    #[error("Mail delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Mail sender seam
///
/// `send` is fire-and-forget from the caller's perspective: a best-effort
/// success/failure result with no delivery guarantees beyond the relay's.
#[trait_variant::make(MailSender: Send)]
pub trait LocalMailSender {
    /// Send an HTML mail to one or more recipients
    async fn send(&self, recipients: &[String], subject: &str, html_body: &str)
    -> Result<(), MailError>;
}

/// SMTP mailer configuration
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// SMTP relay hostname
    pub smtp_host: String,
    /// SMTP relay port
    pub smtp_port: u16,
    /// SMTP username
    pub smtp_username: String,
    /// SMTP password
    pub smtp_password: String,
    /// From address used on every outbound mail
    pub from_address: String,
}

impl MailerConfig {
    /// Load mailer configuration from environment variables
    pub fn from_env() -> Result<Self, MailError> {
        let require = |name: &str| {
            std::env::var(name)
                .map_err(|_| MailError::Configuration(format!("{name} must be set")))
        };

        Ok(Self {
            smtp_host: require("SMTP_HOST")?,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_username: require("SMTP_USERNAME")?,
            smtp_password: require("SMTP_PASSWORD")?,
            from_address: require("SMTP_FROM")?,
        })
    }
}

/// SMTP-backed mail sender
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Build an SMTP mailer from configuration
    pub fn new(config: MailerConfig) -> Result<Self, MailError> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailError::Configuration(format!("SMTP relay: {e}")))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address,
        })
    }
}

impl MailSender for SmtpMailer {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<(), MailError> {
        let from = self
            .from_address
            .parse()
            .map_err(|e| MailError::InvalidMessage(format!("from address: {e}")))?;

        let mut builder = Message::builder()
            .from(from)
            .subject(subject)
            .header(ContentType::TEXT_HTML);

        for recipient in recipients {
            let to = recipient
                .parse()
                .map_err(|e| MailError::InvalidMessage(format!("recipient {recipient}: {e}")))?;
            builder = builder.to(to);
        }

        let message = builder
            .body(html_body.to_string())
            .map_err(|e| MailError::InvalidMessage(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::DeliveryFailed(e.to_string()))?;

        tracing::debug!(recipients = recipients.len(), subject, "Mail sent");

        Ok(())
    }
}
