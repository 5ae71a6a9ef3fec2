mod mock_email_client;
mod ses_email_client;
mod smtp_email_client;

use crate::domain::RegistrantEmail;
use async_trait::async_trait;
pub use mock_email_client::MockEmailClient;
pub use ses_email_client::SesEmailClient;
pub use smtp_email_client::SmtpEmailClient;

/// The mailbox reminders are sent from.
#[derive(Debug, Clone, PartialEq)]
pub struct SenderIdentity {
    pub name: String,
    pub email: RegistrantEmail,
}

impl std::fmt::Display for SenderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" <{}>", self.name, self.email)
    }
}

/// A single plaintext message, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub from: SenderIdentity,
    pub to: RegistrantEmail,
    pub subject: String,
    pub text: String,
}

#[async_trait]
pub trait Email: Send + Sync {
    async fn send_email(&self, message: &OutgoingEmail) -> Result<(), anyhow::Error>;
}
