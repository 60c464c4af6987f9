use std::sync::Arc;

use juniper::FieldResult;
use sqlx::PgPool;

use crate::common::{AuthError, DomainError};
use crate::domains::users::User;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared dependencies plus the session of the caller, if any.
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(server_deps: Arc<ServerDeps>, auth_user: Option<AuthUser>) -> Self {
        Self {
            db_pool: server_deps.db_pool.clone(),
            server_deps,
            auth_user,
        }
    }

    pub fn deps(&self) -> &ServerDeps {
        &self.server_deps
    }

    /// Resolve the session to its local user row.
    ///
    /// A valid session without a row means the identity webhook has not
    /// provisioned the user yet.
    pub async fn require_user(&self) -> Result<User, DomainError> {
        let auth_user = self
            .auth_user
            .as_ref()
            .ok_or(AuthError::AuthenticationRequired)?;

        User::find_by_external_id(&auth_user.external_id, &self.db_pool)
            .await?
            .ok_or_else(|| AuthError::UserNotProvisioned.into())
    }

    /// [`Self::require_user`] for resolvers
    pub async fn current_user(&self) -> FieldResult<User> {
        self.require_user()
            .await
            .map_err(DomainError::into_field_error)
    }
}
