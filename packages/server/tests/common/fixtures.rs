//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data. Names
//! and external ids are randomized so tests sharing the database never collide.

use anyhow::{Context, Result};
use skillswap_core::domains::communities::{Community, Membership};
use skillswap_core::domains::users::{NewUser, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a provisioned user with the given balance
pub async fn create_user(pool: &PgPool, credits: i32) -> Result<User> {
    create_named_user(pool, "Test", credits).await
}

pub async fn create_named_user(pool: &PgPool, first_name: &str, credits: i32) -> Result<User> {
    let suffix = Uuid::new_v4().simple().to_string();
    let new_user = NewUser::builder()
        .external_id(format!("user_{suffix}"))
        .email(format!("{suffix}@example.com"))
        .first_name(Some(first_name.to_string()))
        .last_name(Some("Tester".to_string()))
        .credits(credits)
        .build();

    User::create_if_absent(&new_user, pool)
        .await?
        .context("Fixture user already existed")
}

/// Create a community with a unique name
pub async fn create_community(pool: &PgPool, name: &str) -> Result<Community> {
    let unique_name = format!("{} {}", name, Uuid::new_v4().simple());
    Community::find_or_create(&unique_name, "Test community", pool).await
}

/// Add `user` to `community`
pub async fn join(pool: &PgPool, user: &User, community: &Community) -> Result<()> {
    Membership::join(user.id, community.id, pool).await?;
    Ok(())
}

/// Current balance straight from the database
pub async fn credits_of(pool: &PgPool, user: &User) -> Result<i32> {
    let user = User::find_by_id(user.id, pool)
        .await?
        .context("User disappeared")?;
    Ok(user.credits)
}
