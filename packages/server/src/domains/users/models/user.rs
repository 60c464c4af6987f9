use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use typed_builder::TypedBuilder;

use crate::common::UserId;

/// User model - SQL persistence layer
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    /// Identity provider user id (session `sub`)
    pub external_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub credits: i32,
    pub has_completed_onboarding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for provisioning a user from an identity event
#[derive(Debug, Clone, TypedBuilder)]
pub struct NewUser {
    #[builder(setter(into))]
    pub external_id: String,
    #[builder(setter(into))]
    pub email: String,
    #[builder(default)]
    pub first_name: Option<String>,
    #[builder(default)]
    pub last_name: Option<String>,
    #[builder(default)]
    pub image_url: Option<String>,
    pub credits: i32,
}

/// Profile fields a user may edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// Join first and last name, skipping blank parts
pub fn display_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let name = [first_name, last_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

impl User {
    /// Full name for display, `None` when neither part is set
    pub fn display_name(&self) -> Option<String> {
        display_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find user by identity provider id
    pub async fn find_by_external_id(external_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE external_id = $1")
            .bind(external_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new user unless one already exists for the external id.
    ///
    /// Returns `None` when the row already existed (webhook redelivery).
    pub async fn create_if_absent(new_user: &NewUser, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, external_id, email, first_name, last_name, image_url, credits)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (external_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(&new_user.external_id)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.image_url)
        .bind(new_user.credits)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Refresh identity-owned fields (email, names, avatar) for a known user
    pub async fn update_identity(
        external_id: &str,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        image_url: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE users
            SET email = $2, first_name = $3, last_name = $4, image_url = $5, updated_at = NOW()
            WHERE external_id = $1
            RETURNING *
            "#,
        )
        .bind(external_id)
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .bind(image_url)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Apply profile edits. Empty strings clear a field.
    pub async fn update_profile(id: UserId, changes: &UpdateProfile, pool: &PgPool) -> Result<Self> {
        fn normalize(value: &Option<String>) -> (bool, Option<String>) {
            match value {
                None => (false, None),
                Some(v) if v.trim().is_empty() => (true, None),
                Some(v) => (true, Some(v.trim().to_string())),
            }
        }

        let (set_first, first_name) = normalize(&changes.first_name);
        let (set_last, last_name) = normalize(&changes.last_name);
        let (set_bio, bio) = normalize(&changes.bio);

        sqlx::query_as::<_, Self>(
            r#"
            UPDATE users
            SET first_name = CASE WHEN $2 THEN $3 ELSE first_name END,
                last_name  = CASE WHEN $4 THEN $5 ELSE last_name END,
                bio        = CASE WHEN $6 THEN $7 ELSE bio END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(set_first)
        .bind(first_name)
        .bind(set_last)
        .bind(last_name)
        .bind(set_bio)
        .bind(bio)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Set the onboarding flag inside an open transaction
    pub async fn mark_onboarded(id: UserId, conn: &mut PgConnection) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE users
            SET has_completed_onboarding = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }
}
