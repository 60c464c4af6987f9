//! Server dependencies shared by every activity
//!
//! Built once at startup (or per test harness) and handed to resolvers and
//! route handlers behind an `Arc`.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::domains::identity::WebhookVerifier;

#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Session token verification
    pub jwt_service: Arc<JwtService>,
    /// `None` when no webhook secret is configured; the webhook then answers 500
    pub webhook_verifier: Option<Arc<WebhookVerifier>>,
    /// Balance given to newly provisioned users
    pub starting_credits: i32,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        jwt_service: Arc<JwtService>,
        webhook_verifier: Option<Arc<WebhookVerifier>>,
        starting_credits: i32,
    ) -> Self {
        Self {
            db_pool,
            jwt_service,
            webhook_verifier,
            starting_credits,
        }
    }

    /// Wire dependencies from configuration
    pub fn from_config(db_pool: PgPool, config: &Config) -> Result<Self> {
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));

        let webhook_verifier = config
            .identity_webhook_secret
            .as_deref()
            .map(WebhookVerifier::from_secret)
            .transpose()
            .context("IDENTITY_WEBHOOK_SECRET must be a whsec_<base64> secret")?
            .map(Arc::new);

        Ok(Self::new(
            db_pool,
            jwt_service,
            webhook_verifier,
            config.starting_credits,
        ))
    }
}
