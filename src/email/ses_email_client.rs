use crate::email::{Email, OutgoingEmail};
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_sesv2 as ses;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use std::time::Duration;

pub struct SesEmailClient {
    ses_client: ses::Client,
}

impl SesEmailClient {
    pub fn new(ses_client: ses::Client) -> Self {
        Self { ses_client }
    }

    /// Region and credentials come from the AWS default provider chain.
    pub async fn from_env(timeout: Duration) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build())
            .load()
            .await;
        Self::new(ses::Client::new(&sdk_config))
    }
}

#[async_trait]
impl Email for SesEmailClient {
    async fn send_email(&self, message: &OutgoingEmail) -> anyhow::Result<()> {
        let text_content = Content::builder()
            .data(&message.text)
            .charset("UTF-8")
            .build()?;
        let body = Body::builder().text(text_content).build();
        let subject = Content::builder()
            .data(&message.subject)
            .charset("UTF-8")
            .build()?;
        let content = EmailContent::builder()
            .simple(Message::builder().subject(subject).body(body).build())
            .build();
        let destination = Destination::builder()
            .to_addresses(message.to.as_ref())
            .build();

        self.ses_client
            .send_email()
            .from_email_address(message.from.to_string())
            .destination(destination)
            .content(content)
            .send()
            .await?;
        Ok(())
    }
}
