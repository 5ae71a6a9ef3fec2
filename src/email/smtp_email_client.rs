use crate::email::{Email, OutgoingEmail};
use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Delivers through an authenticated SMTP relay, upgrading with STARTTLS.
pub struct SmtpEmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailClient {
    pub fn new(
        host: &str,
        port: u16,
        username: String,
        password: Secret<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let credentials = Credentials::new(username, password.expose_secret().to_owned());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .with_context(|| format!("Failed to configure the SMTP relay {}", host))?
            .port(port)
            .credentials(credentials)
            .timeout(Some(timeout))
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl Email for SmtpEmailClient {
    async fn send_email(&self, message: &OutgoingEmail) -> anyhow::Result<()> {
        let from_address: Address = message
            .from
            .email
            .as_ref()
            .parse()
            .context("Sender address was rejected by the SMTP client")?;
        let to_address: Address = message
            .to
            .as_ref()
            .parse()
            .context("Recipient address was rejected by the SMTP client")?;
        let email = Message::builder()
            .from(Mailbox::new(Some(message.from.name.clone()), from_address))
            .to(Mailbox::new(None, to_address))
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.text.clone())
            .context("Failed to build the SMTP message")?;

        self.transport.send(email).await?;
        Ok(())
    }
}
