mod dispatcher;
mod template;

pub use dispatcher::{DeliveryError, DeliveryFailurePolicy, EventContext, Outcome, ReminderDispatcher};
pub use template::{format_test_date, render_body, SUBJECT};
