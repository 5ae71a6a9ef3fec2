mod events;
mod health_check;

pub use events::*;
pub use health_check::*;
