pub mod community;
pub mod membership;

pub use community::*;
pub use membership::*;
