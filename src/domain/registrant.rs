use crate::domain::{RecordSnapshot, RegistrantEmail, RegistrantName, RegistrationDate};
use serde_json::Value;

pub const EMAIL_FIELD: &str = "email";
pub const NAME_FIELD: &str = "name";
pub const REGISTRATION_DATE_FIELD: &str = "registrationDate";

/// A registrant whose record carries everything a reminder needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Registrant {
    pub email: RegistrantEmail,
    pub name: RegistrantName,
    pub registration_date: RegistrationDate,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FieldError {
    #[error("`{0}` is missing")]
    Missing(&'static str),
    #[error("`{0}` is empty")]
    Empty(&'static str),
    #[error("`{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing(field) | FieldError::Empty(field) => *field,
            FieldError::Invalid { field, .. } => *field,
        }
    }
}

/// Every problem found on a record, in field order.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("registrant record is not usable: {}", display_field_errors(.0))]
pub struct ValidationError(pub Vec<FieldError>);

impl ValidationError {
    pub fn field_errors(&self) -> &[FieldError] {
        &self.0
    }
}

fn display_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TryFrom<&RecordSnapshot> for Registrant {
    type Error = ValidationError;

    fn try_from(snapshot: &RecordSnapshot) -> Result<Self, Self::Error> {
        let email = required_text(snapshot, EMAIL_FIELD).and_then(|email| {
            RegistrantEmail::parse(email).map_err(|reason| invalid(EMAIL_FIELD, reason))
        });
        let name = required_text(snapshot, NAME_FIELD).and_then(|name| {
            RegistrantName::parse(name).map_err(|reason| invalid(NAME_FIELD, reason))
        });
        let registration_date = required(snapshot, REGISTRATION_DATE_FIELD).and_then(|value| {
            RegistrationDate::parse(&value)
                .map_err(|reason| invalid(REGISTRATION_DATE_FIELD, reason))
        });

        match (email, name, registration_date) {
            (Ok(email), Ok(name), Ok(registration_date)) => Ok(Registrant {
                email,
                name,
                registration_date,
            }),
            (email, name, registration_date) => Err(ValidationError(
                [email.err(), name.err(), registration_date.err()]
                    .into_iter()
                    .flatten()
                    .collect(),
            )),
        }
    }
}

fn invalid(field: &'static str, reason: String) -> FieldError {
    FieldError::Invalid { field, reason }
}

/// `0` and `false` count as empty, like a blank string.
fn required(snapshot: &RecordSnapshot, field: &'static str) -> Result<Value, FieldError> {
    match snapshot.field(field) {
        None => Err(FieldError::Missing(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(FieldError::Empty(field)),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(FieldError::Empty(field)),
        Some(Value::Bool(false)) => Err(FieldError::Empty(field)),
        Some(value) => Ok(value),
    }
}

fn required_text(snapshot: &RecordSnapshot, field: &'static str) -> Result<String, FieldError> {
    match required(snapshot, field)? {
        Value::String(s) => Ok(s),
        other => Err(invalid(field, format!("expected text, found {}", other))),
    }
}
