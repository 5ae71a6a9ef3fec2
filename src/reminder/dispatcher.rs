use crate::domain::{RecordSnapshot, Registrant, RegistrantEmail, ValidationError};
use crate::email::{Email, OutgoingEmail, SenderIdentity};
use crate::error_chain_fmt;
use crate::reminder::template::{render_body, SUBJECT};
use std::sync::Arc;
use uuid::Uuid;

/// Identifies the document that triggered an invocation. Only used for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct EventContext {
    pub collection: String,
    pub document_id: String,
    pub event_id: Option<String>,
}

#[derive(thiserror::Error)]
#[error("Failed to deliver the reminder to {recipient}")]
pub struct DeliveryError {
    pub recipient: RegistrantEmail,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl std::fmt::Debug for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// How a single invocation ended. Neither failure is an `Err`: both have
/// already been logged by the time the caller sees them.
#[derive(Debug)]
pub enum Outcome {
    Suppressed(ValidationError),
    Sent { recipient: RegistrantEmail },
    Failed(DeliveryError),
}

/// What the trigger infrastructure is told when delivery fails.
#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryFailurePolicy {
    /// Log the failure and report the event as handled. The reminder is lost.
    Drop,
    /// Report the event as failed so an at-least-once trigger redelivers it.
    /// Redelivery may duplicate a reminder that did reach the relay.
    Surface,
}

impl Default for DeliveryFailurePolicy {
    fn default() -> Self {
        Self::Drop
    }
}

impl DeliveryFailurePolicy {
    pub fn requests_redelivery(&self, outcome: &Outcome) -> bool {
        matches!(
            (self, outcome),
            (DeliveryFailurePolicy::Surface, Outcome::Failed(_))
        )
    }
}

pub struct ReminderDispatcher {
    email_client: Arc<dyn Email>,
    sender: SenderIdentity,
    delivery_failure_policy: DeliveryFailurePolicy,
}

impl ReminderDispatcher {
    pub fn new(
        email_client: Arc<dyn Email>,
        sender: SenderIdentity,
        delivery_failure_policy: DeliveryFailurePolicy,
    ) -> Self {
        Self {
            email_client,
            sender,
            delivery_failure_policy,
        }
    }

    pub fn delivery_failure_policy(&self) -> DeliveryFailurePolicy {
        self.delivery_failure_policy
    }

    /// Send at most one reminder for a newly created registrant record.
    ///
    /// Redelivering the same event sends the reminder again.
    #[tracing::instrument(
        name = "Dispatching a registration reminder",
        skip(self, snapshot, context),
        fields(
            invocation_id = %Uuid::new_v4(),
            collection = %context.collection,
            document_id = %context.document_id,
            event_id = ?context.event_id,
        )
    )]
    pub async fn handle(&self, snapshot: &RecordSnapshot, context: &EventContext) -> Outcome {
        let registrant = match Registrant::try_from(snapshot) {
            Ok(registrant) => registrant,
            Err(error) => {
                tracing::error!(
                    error.message = %error,
                    "Registrant record is missing required fields, no reminder sent"
                );
                return Outcome::Suppressed(error);
            }
        };

        let message = self.compose(&registrant);
        match self.email_client.send_email(&message).await {
            Ok(()) => {
                tracing::info!(
                    recipient = %message.to,
                    "Reminder email sent to {}",
                    message.to
                );
                Outcome::Sent {
                    recipient: message.to,
                }
            }
            Err(error) => {
                let error = DeliveryError {
                    recipient: message.to,
                    source: error.into(),
                };
                tracing::error!(
                    recipient = %error.recipient,
                    error.cause_chain = ?error,
                    error.message = %error,
                    "Failed to send reminder email"
                );
                Outcome::Failed(error)
            }
        }
    }

    fn compose(&self, registrant: &Registrant) -> OutgoingEmail {
        OutgoingEmail {
            from: self.sender.clone(),
            to: registrant.email.clone(),
            subject: SUBJECT.to_string(),
            text: render_body(
                &registrant.name,
                registrant.registration_date.test_date(),
            ),
        }
    }
}
