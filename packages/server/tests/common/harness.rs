//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests. The container and
//! migrations are initialized once on first use, then reused. Tests isolate
//! themselves by creating their own users and communities.

use anyhow::{Context, Result};
use axum::Router;
use skillswap_core::domains::auth::JwtService;
use skillswap_core::domains::identity::WebhookVerifier;
use skillswap_core::domains::users::User;
use skillswap_core::kernel::ServerDeps;
use skillswap_core::server::build_app;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use super::GraphQLClient;

/// Signing secret used by webhook tests, base64("skillswap-test-webhook-secret")
pub const TEST_WEBHOOK_SECRET: &str = "whsec_c2tpbGxzd2FwLXRlc3Qtd2ViaG9vay1zZWNyZXQ=";

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "skillswap-test";
pub const TEST_STARTING_CREDITS: i32 = 10;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let user = fixtures::create_user(&ctx.db_pool, 10).await.unwrap();
///     let client = ctx.graphql_as(&user);
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        let server_deps = Arc::new(ServerDeps::new(
            db_pool.clone(),
            Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string())),
            Some(Arc::new(
                WebhookVerifier::from_secret(TEST_WEBHOOK_SECRET)
                    .context("Invalid test webhook secret")?,
            )),
            TEST_STARTING_CREDITS,
        ));

        Ok(Self {
            db_pool,
            server_deps,
        })
    }

    /// GraphQL client without a session
    pub fn graphql(&self) -> GraphQLClient {
        GraphQLClient::new(self.server_deps.clone(), None)
    }

    /// GraphQL client with a session for `user`
    pub fn graphql_as(&self, user: &User) -> GraphQLClient {
        GraphQLClient::new(self.server_deps.clone(), Some(user.external_id.clone()))
    }

    /// The full HTTP router, for route-level tests
    pub fn app(&self) -> Router {
        build_app(self.server_deps.clone(), &[])
    }

    /// Same dependencies but without a webhook secret configured
    pub fn app_without_webhook_secret(&self) -> Router {
        let mut deps = (*self.server_deps).clone();
        deps.webhook_verifier = None;
        build_app(Arc::new(deps), &[])
    }
}
