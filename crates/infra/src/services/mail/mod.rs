mod inmemory;
mod smtp;

pub use inmemory::{InMemoryMailer, SentMail};
pub use smtp::SmtpMailer;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SendError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),
    #[error("Unable to build the message: {0}")]
    Message(String),
    #[error("Mail transport failed: {0}")]
    Transport(String),
    #[error("No mail server is configured")]
    NotConfigured,
}

/// Outbound email transport. A single best-effort attempt per call, the
/// caller decides what a failure means.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), SendError>;
}
