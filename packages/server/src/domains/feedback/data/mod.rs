pub mod inputs;
pub mod request;
pub mod response;
pub mod types;

pub use inputs::*;
pub use request::*;
pub use response::*;
pub use types::*;
