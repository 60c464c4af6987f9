use tracing::{info, warn};

use crate::common::DomainError;
use crate::domains::identity::events::{IdentityEvent, IdentityUser};
use crate::domains::users::{NewUser, User};
use crate::kernel::ServerDeps;

/// What a verified delivery resulted in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A new local user row was created
    Provisioned,
    /// `user.created` for an external id we already have
    AlreadyExists,
    Updated,
    /// Received but deliberately not acted on (missing email, deletions, other events)
    Acknowledged(&'static str),
}

/// Apply a verified identity event to the users table.
///
/// Errors are infrastructure failures; the caller answers 500 so the provider retries.
pub async fn handle_event(
    event: IdentityEvent,
    deps: &ServerDeps,
) -> Result<EventOutcome, DomainError> {
    match event {
        IdentityEvent::UserCreated(user) => provision(&user, deps).await,
        IdentityEvent::UserUpdated(user) => update(&user, deps).await,
        IdentityEvent::UserDeleted(deleted) => {
            // Requests and responses reference the row, so it stays
            info!(external_id = ?deleted.id, "Identity user deleted; keeping local row");
            Ok(EventOutcome::Acknowledged("user deletion is not mirrored"))
        }
        IdentityEvent::Other(event_type) => {
            info!(event_type = %event_type, "Ignoring identity event");
            Ok(EventOutcome::Acknowledged("event type ignored"))
        }
    }
}

async fn provision(identity: &IdentityUser, deps: &ServerDeps) -> Result<EventOutcome, DomainError> {
    let Some(email) = identity.primary_email() else {
        warn!(external_id = %identity.id, "Primary email missing, not provisioning user");
        return Ok(EventOutcome::Acknowledged("primary email missing"));
    };

    let new_user = NewUser::builder()
        .external_id(identity.id.as_str())
        .email(email)
        .first_name(identity.first_name.clone())
        .last_name(identity.last_name.clone())
        .image_url(identity.image_url.clone())
        .credits(deps.starting_credits)
        .build();

    match User::create_if_absent(&new_user, &deps.db_pool).await? {
        Some(user) => {
            info!(user_id = %user.id, external_id = %user.external_id, "Provisioned user");
            Ok(EventOutcome::Provisioned)
        }
        None => {
            info!(external_id = %identity.id, "User already provisioned, skipping");
            Ok(EventOutcome::AlreadyExists)
        }
    }
}

async fn update(identity: &IdentityUser, deps: &ServerDeps) -> Result<EventOutcome, DomainError> {
    let Some(email) = identity.primary_email() else {
        warn!(external_id = %identity.id, "Primary email missing, not updating user");
        return Ok(EventOutcome::Acknowledged("primary email missing"));
    };

    let updated = User::update_identity(
        &identity.id,
        email,
        identity.first_name.as_deref(),
        identity.last_name.as_deref(),
        identity.image_url.as_deref(),
        &deps.db_pool,
    )
    .await?;

    match updated {
        Some(user) => {
            info!(user_id = %user.id, "Updated user from identity event");
            Ok(EventOutcome::Updated)
        }
        // Missed the create event; provision now
        None => provision(identity, deps).await,
    }
}
