use super::{IMailer, SendError};
use std::{collections::HashSet, sync::Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Records every message instead of sending it. Used when testing.
pub struct InMemoryMailer {
    sent: Mutex<Vec<SentMail>>,
    failing_recipients: Mutex<HashSet<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing_recipients: Mutex::new(HashSet::new()),
        }
    }

    /// Every following send to `recipient` fails with a transport error
    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .insert(recipient.to_string());
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, recipient: &str) -> Vec<SentMail> {
        self.sent()
            .into_iter()
            .filter(|mail| mail.to == recipient)
            .collect()
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), SendError> {
        if self.failing_recipients.lock().unwrap().contains(to) {
            return Err(SendError::Transport(format!(
                "Connection refused while sending to {}",
                to
            )));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            text_body: text_body.to_string(),
        });
        Ok(())
    }
}
