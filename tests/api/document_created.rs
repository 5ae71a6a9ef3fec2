use crate::helpers::{spawn_app, spawn_app_with};
use blood_quest::email::MockEmailClient;
use blood_quest::reminder::{DeliveryFailurePolicy, SUBJECT};
use serde_json::json;

#[tokio::test]
async fn a_new_registrant_receives_one_reminder() {
    // arrange
    let app = spawn_app().await;
    let event = json!({
        "eventId": "evt-1",
        "fields": {
            "email": "a@x.com",
            "name": "Asha",
            "registrationDate": "2024-01-30",
        }
    });

    // act
    let response = app.post_event("doc-asha", &event).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let emails = app.email_client.sent_emails.lock().unwrap();
    assert_eq!(
        emails.len(),
        1,
        "Expected 1 email, {} were sent",
        emails.len()
    );
    let email = &emails[0];
    assert_eq!(email.to.as_ref(), "a@x.com");
    assert_eq!(email.subject, SUBJECT);
    assert_eq!(
        email.subject,
        "Reminder: Required Documents and Preparation for Blood Donation Test"
    );
    assert_eq!(
        email.from.to_string(),
        "\"Blood Quest\" <reminders@blood-quest.example>"
    );
    assert!(email.text.contains("Dear Asha"));
    assert!(email.text.contains("Fri Feb 02 2024"));
}

#[tokio::test]
async fn typed_datastore_values_are_understood() {
    // arrange
    let app = spawn_app().await;
    let event = json!({
        "fields": {
            "email": { "stringValue": "dev@x.com" },
            "name": { "stringValue": "Dev" },
            "registrationDate": { "timestampValue": "2024-12-30T10:00:00Z" },
        }
    });

    // act
    let response = app.post_event("doc-dev", &event).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let emails = app.email_client.sent_emails.lock().unwrap();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].to.as_ref(), "dev@x.com");
    assert!(emails[0].text.contains("Thu Jan 02 2025"));
}

#[tokio::test]
async fn incomplete_records_are_acknowledged_without_sending() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (
            json!({ "email": "", "name": "Bob", "registrationDate": "2024-05-01" }),
            "empty email",
        ),
        (
            json!({ "name": "Cleo", "registrationDate": "2024-05-01" }),
            "missing email",
        ),
        (
            json!({ "email": "d@x.com", "name": "", "registrationDate": "2024-05-01" }),
            "empty name",
        ),
        (
            json!({ "email": "e@x.com", "name": "Eve", "registrationDate": "whenever" }),
            "unreadable registration date",
        ),
        (json!({}), "empty document"),
    ];

    for (fields, description) in test_cases {
        // act
        let response = app.post_event("doc-invalid", &json!({ "fields": fields })).await;

        // assert
        assert_eq!(
            200,
            response.status().as_u16(),
            "The trigger did not acknowledge a record with {}.",
            description
        );
    }
    assert_eq!(app.sent_email_count(), 0);
}

#[tokio::test]
async fn delivery_failures_are_acknowledged_by_default() {
    // arrange
    let app = spawn_app_with(
        MockEmailClient::failing("smtp relay unreachable"),
        DeliveryFailurePolicy::Drop,
    )
    .await;
    let event = json!({
        "fields": { "email": "a@x.com", "name": "Asha", "registrationDate": "2024-01-30" }
    });

    // act
    let response = app.post_event("doc-asha", &event).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.sent_email_count(), 1);
}

#[tokio::test]
async fn delivery_failures_request_redelivery_when_surfaced() {
    // arrange
    let app = spawn_app_with(
        MockEmailClient::failing("smtp relay unreachable"),
        DeliveryFailurePolicy::Surface,
    )
    .await;
    let event = json!({
        "fields": { "email": "a@x.com", "name": "Asha", "registrationDate": "2024-01-30" }
    });
    let invalid_event = json!({ "fields": { "name": "Cleo" } });

    // act
    let failed = app.post_event("doc-asha", &event).await;
    let suppressed = app.post_event("doc-cleo", &invalid_event).await;

    // assert
    assert_eq!(500, failed.status().as_u16());
    assert_eq!(200, suppressed.status().as_u16());
}

#[tokio::test]
async fn redelivered_events_send_duplicate_reminders() {
    // arrange
    let app = spawn_app().await;
    let event = json!({
        "eventId": "evt-1",
        "fields": { "email": "a@x.com", "name": "Asha", "registrationDate": "2024-01-30" }
    });

    // act
    app.post_event("doc-asha", &event).await;
    app.post_event("doc-asha", &event).await;

    // assert
    assert_eq!(app.sent_email_count(), 2);
}

#[tokio::test]
async fn events_for_other_collections_are_not_handled() {
    // arrange
    let app = spawn_app().await;
    let event = json!({
        "fields": { "email": "a@x.com", "name": "Asha", "registrationDate": "2024-01-30" }
    });

    // act
    let response = app.post_event_to("blood_banks", "doc-asha", &event).await;

    // assert
    assert_eq!(404, response.status().as_u16());
    assert_eq!(app.sent_email_count(), 0);
}

#[tokio::test]
async fn malformed_payloads_are_rejected_with_a_400() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        ("not json at all".to_string(), "a body that is not JSON"),
        (
            json!({ "email": "a@x.com" }).to_string(),
            "an event without fields",
        ),
        (
            json!({ "fields": ["a@x.com"] }).to_string(),
            "fields that are not a document",
        ),
    ];

    for (body, description) in test_cases {
        // act
        let response = app.post_raw_event("doc-bad", body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}.",
            description
        );
    }
    assert_eq!(app.sent_email_count(), 0);
}
