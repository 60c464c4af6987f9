mod handle_event;

pub use handle_event::{handle_event, EventOutcome};
