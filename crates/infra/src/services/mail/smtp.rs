use super::{IMailer, SendError};
use crate::config::MailConfig;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::warn;

struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

/// Sends email through an SMTP relay using STARTTLS
pub struct SmtpMailer {
    relay: Option<SmtpRelay>,
}

impl SmtpMailer {
    /// A mailer without a relay fails every send with `SendError::NotConfigured`
    pub fn new(config: Option<&MailConfig>) -> Self {
        let relay = match config {
            Some(config) => match Self::create_relay(config) {
                Ok(relay) => Some(relay),
                Err(e) => {
                    warn!("Unable to set up the SMTP relay: {}", e);
                    None
                }
            },
            None => None,
        };
        Self { relay }
    }

    fn create_relay(config: &MailConfig) -> Result<SmtpRelay, SendError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| SendError::Message(format!("Invalid sender {}: {}", config.from, e)))?;
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
            .map_err(|e| SendError::Transport(e.to_string()))?
            .port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(SmtpRelay {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), SendError> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|_| SendError::InvalidRecipient(to.to_string()))?;
        let relay = match &self.relay {
            Some(relay) => relay,
            None => return Err(SendError::NotConfigured),
        };

        let message = Message::builder()
            .from(relay.from.clone())
            .to(recipient)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text_body.to_string(),
                html_body.to_string(),
            ))
            .map_err(|e| SendError::Message(e.to_string()))?;

        relay
            .transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| SendError::Transport(e.to_string()))
    }
}
