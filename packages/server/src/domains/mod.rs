// Business domains
pub mod auth;
pub mod communities;
pub mod feedback;
pub mod identity;
pub mod users;
