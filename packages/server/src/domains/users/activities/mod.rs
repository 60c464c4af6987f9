//! User activities - profile and onboarding

mod onboarding;
mod profile;

pub use onboarding::complete_onboarding;
pub use profile::update_profile;
