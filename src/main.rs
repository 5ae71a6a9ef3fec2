use blood_quest::configuration::get_configuration;
use blood_quest::startup::{build_email_client, Application};
use blood_quest::telemetry::{get_subscriber, init_subscriber};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("blood_quest".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let email_client = build_email_client(&configuration.email_client).await?;
    let application = Application::build(&configuration, email_client).await?;
    application.server.launch().await?;
    Ok(())
}
