pub mod feedback_evaluation;
pub mod feedback_request;
pub mod feedback_response;
pub mod feed;

pub use feed::*;
pub use feedback_evaluation::*;
pub use feedback_request::*;
pub use feedback_response::*;
