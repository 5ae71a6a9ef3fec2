mod record_snapshot;
mod registrant;
mod registrant_email;
mod registrant_name;
mod registration_date;

pub use record_snapshot::RecordSnapshot;
pub use registrant::{FieldError, Registrant, ValidationError};
pub use registrant_email::RegistrantEmail;
pub use registrant_name::RegistrantName;
pub use registration_date::RegistrationDate;
