use crate::catchers::*;
use crate::configuration::{EmailClientSettings, Settings, Transport};
use crate::email::{Email, SesEmailClient, SmtpEmailClient};
use crate::port_saver;
use crate::port_saver::Port;
use crate::reminder::ReminderDispatcher;
use crate::routes::*;
use anyhow::{anyhow, Context};
use rocket::{Config, Ignite, Rocket};
use std::sync::Arc;

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: Port,
}

impl Application {
    /// A port of `None` binds to any free port; read it back through [`Port::get`].
    pub async fn build(
        configuration: &Settings,
        email_client: Arc<dyn Email>,
    ) -> Result<Application, anyhow::Error> {
        let sender = configuration
            .email_client
            .sender()
            .map_err(|e| anyhow!(e))
            .context("Invalid sender email address.")?;
        let dispatcher = ReminderDispatcher::new(
            email_client,
            sender,
            configuration.dispatcher.delivery_failure_policy,
        );

        let (port_saver, port) = port_saver::create_pair();
        let server = rocket::custom(Config {
            address: configuration.application.host,
            port: configuration.application.port.unwrap_or(0),
            ..Config::default()
        })
        .attach(port_saver)
        .manage(configuration.trigger.clone())
        .manage(dispatcher)
        .mount("/", routes![health, document_created])
        .register("/", catchers![unprocessable_entity_to_bad_request])
        .ignite()
        .await
        .context("Failed to ignite the HTTP server.")?;
        Ok(Application { server, port })
    }
}

/// Build the mail transport selected by configuration. Called once at startup;
/// the client is shared by every invocation afterwards.
pub async fn build_email_client(
    settings: &EmailClientSettings,
) -> Result<Arc<dyn Email>, anyhow::Error> {
    match settings.transport {
        Transport::Ses => Ok(Arc::new(SesEmailClient::from_env(settings.timeout()).await)),
        Transport::Smtp => {
            let smtp = settings
                .smtp
                .as_ref()
                .context("`email_client.smtp` must be set when the transport is smtp.")?;
            let client = SmtpEmailClient::new(
                &smtp.host,
                smtp.port,
                smtp.username.clone(),
                smtp.password.clone(),
                settings.timeout(),
            )?;
            Ok(Arc::new(client))
        }
    }
}
