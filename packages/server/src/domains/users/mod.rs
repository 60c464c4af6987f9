//! Users domain - local profiles, onboarding and the credit balance column
//!
//! Rows are created by the identity webhook (`domains::identity`); this domain
//! only reads and edits them. Credit mutations go through
//! `domains::feedback::ledger`.

pub mod activities;
pub mod data;
pub mod edges;
pub mod models;

pub use data::{UpdateProfileInput, UserData, UserSummaryData};
pub use models::user::{NewUser, UpdateProfile, User};
