//! Identity domain - provisioning local users from identity provider webhooks
//!
//! The provider owns sign-up and sign-in. It notifies us of user lifecycle
//! events through signed webhooks; this domain verifies them and mirrors the
//! identity fields into the `users` table.

pub mod activities;
pub mod events;
pub mod signature;

pub use events::{IdentityEvent, IdentityUser};
pub use signature::{SignatureError, WebhookHeaders, WebhookVerifier};
