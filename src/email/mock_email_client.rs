use crate::email::{Email, OutgoingEmail};
use async_trait::async_trait;
use std::sync::Mutex;

/// Records every message it is handed. Built with [`MockEmailClient::failing`]
/// it records the attempt and then reports a delivery error.
#[derive(Default)]
pub struct MockEmailClient {
    pub sent_emails: Mutex<Vec<OutgoingEmail>>,
    failure: Option<String>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent_emails: Mutex::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait]
impl Email for MockEmailClient {
    #[tracing::instrument(name = "Sending mock email", skip(self, message), fields(recipient = %message.to))]
    async fn send_email(&self, message: &OutgoingEmail) -> anyhow::Result<()> {
        self.sent_emails
            .lock()
            .map_err(|_| anyhow::anyhow!("Mock mailbox lock was poisoned"))?
            .push(message.clone());
        match &self.failure {
            Some(reason) => Err(anyhow::anyhow!(reason.clone())),
            None => Ok(()),
        }
    }
}
