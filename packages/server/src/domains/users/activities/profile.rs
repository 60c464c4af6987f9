use crate::common::DomainError;
use crate::domains::users::{UpdateProfile, User};
use crate::kernel::ServerDeps;

const MAX_NAME_LENGTH: usize = 100;
const MAX_BIO_LENGTH: usize = 1000;

/// Edit the caller's own profile
pub async fn update_profile(
    user: &User,
    changes: UpdateProfile,
    deps: &ServerDeps,
) -> Result<User, DomainError> {
    validate(&changes)?;
    Ok(User::update_profile(user.id, &changes, &deps.db_pool).await?)
}

fn validate(changes: &UpdateProfile) -> Result<(), DomainError> {
    let too_long = |value: &Option<String>, max: usize| {
        value
            .as_deref()
            .map(|v| v.trim().chars().count() > max)
            .unwrap_or(false)
    };

    if too_long(&changes.first_name, MAX_NAME_LENGTH) || too_long(&changes.last_name, MAX_NAME_LENGTH)
    {
        return Err(DomainError::validation(format!(
            "Names must be at most {MAX_NAME_LENGTH} characters"
        )));
    }

    if too_long(&changes.bio, MAX_BIO_LENGTH) {
        return Err(DomainError::validation(format!(
            "Bio must be at most {MAX_BIO_LENGTH} characters"
        )));
    }

    Ok(())
}
