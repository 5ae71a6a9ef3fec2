use crate::configuration::TriggerSettings;
use crate::domain::RecordSnapshot;
use crate::reminder::{EventContext, ReminderDispatcher};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;

/// A create event as pushed by the datastore's trigger infrastructure.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreatedEvent {
    event_id: Option<String>,
    fields: RecordSnapshot,
}

#[tracing::instrument(
    name = "Handling a document creation event",
    skip(event, trigger, dispatcher),
    fields(collection = %collection, document_id = %document_id)
)]
#[post("/events/<collection>/<document_id>", data = "<event>")]
pub async fn document_created(
    collection: &str,
    document_id: &str,
    event: Json<DocumentCreatedEvent>,
    trigger: &State<TriggerSettings>,
    dispatcher: &State<ReminderDispatcher>,
) -> Result<(), Status> {
    if collection != trigger.collection {
        tracing::warn!(
            expected_collection = %trigger.collection,
            "Ignoring an event for a collection this trigger is not bound to"
        );
        return Err(Status::NotFound);
    }

    let DocumentCreatedEvent { event_id, fields } = event.into_inner();
    let context = EventContext {
        collection: collection.to_string(),
        document_id: document_id.to_string(),
        event_id,
    };
    let outcome = dispatcher.handle(&fields, &context).await;
    if dispatcher
        .delivery_failure_policy()
        .requests_redelivery(&outcome)
    {
        return Err(Status::InternalServerError);
    }
    Ok(())
}
