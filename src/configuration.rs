use crate::domain::RegistrantEmail;
use crate::email::SenderIdentity;
use crate::reminder::DeliveryFailurePolicy;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

#[derive(serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub trigger: TriggerSettings,
    pub email_client: EmailClientSettings,
    #[serde(default)]
    pub dispatcher: DispatcherSettings,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub port: Option<u16>,
    pub host: IpAddr,
}

/// The collection whose creations this deployment reacts to.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct TriggerSettings {
    pub collection: String,
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Ses,
    Smtp,
}

#[derive(serde::Deserialize)]
pub struct EmailClientSettings {
    pub transport: Transport,
    pub sender_email: String,
    pub sender_name: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub smtp: Option<SmtpSettings>,
}

#[derive(serde::Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
}

#[derive(serde::Deserialize, Default)]
pub struct DispatcherSettings {
    #[serde(default)]
    pub delivery_failure_policy: DeliveryFailurePolicy,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<SenderIdentity, String> {
        Ok(SenderIdentity {
            name: self.sender_name.clone(),
            email: RegistrantEmail::parse(self.sender_email.clone())?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either 'local' or 'production'.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");

    let mut settings = config::Config::default();
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;
    settings.try_into()
}
