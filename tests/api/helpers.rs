use blood_quest::configuration::get_configuration;
use blood_quest::email::MockEmailClient;
use blood_quest::reminder::DeliveryFailurePolicy;
use blood_quest::startup::Application;
use blood_quest::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use std::sync::Arc;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const COLLECTION: &str = "donors_wisher";

pub struct TestApp {
    pub address: String,
    pub email_client: Arc<MockEmailClient>,
}

impl TestApp {
    pub async fn post_event(&self, document_id: &str, body: &serde_json::Value) -> reqwest::Response {
        self.post_event_to(COLLECTION, document_id, body).await
    }

    pub async fn post_event_to(
        &self,
        collection: &str,
        document_id: &str,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/events/{}/{}", &self.address, collection, document_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_event(&self, document_id: &str, body: String) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/events/{}/{}", &self.address, COLLECTION, document_id))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn sent_email_count(&self) -> usize {
        self.email_client.sent_emails.lock().unwrap().len()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(MockEmailClient::new(), DeliveryFailurePolicy::Drop).await
}

pub async fn spawn_app_with(
    email_client: MockEmailClient,
    delivery_failure_policy: DeliveryFailurePolicy,
) -> TestApp {
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = None;
        c.dispatcher.delivery_failure_policy = delivery_failure_policy;
        c
    };

    let email_client = Arc::new(email_client);
    let app = Application::build(&configuration, email_client.clone())
        .await
        .expect("Failed to build application.");
    let port = app.port.clone();
    let _ = tokio::spawn(app.server.launch());
    TestApp {
        address: format!(
            "http://127.0.0.1:{}",
            port.get().await.expect("Server stopped before binding.")
        ),
        email_client,
    }
}
