use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};

use crate::common::UserId;
use crate::domains::users::models::display_name;
use crate::domains::users::{UpdateProfile, User};

/// The signed-in user's profile
#[derive(Debug, Clone, GraphQLObject)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
    pub credits: i32,
    pub has_completed_onboarding: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        let name = user.display_name();
        Self {
            id: user.id.to_string(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            name,
            image_url: user.image_url,
            bio: user.bio,
            credits: user.credits,
            has_completed_onboarding: user.has_completed_onboarding,
            created_at: user.created_at,
        }
    }
}

/// Public author summary shown next to requests and responses
#[derive(Debug, Clone, GraphQLObject)]
pub struct UserSummaryData {
    pub id: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

impl UserSummaryData {
    pub fn new(
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: display_name(first_name, last_name),
            image_url,
        }
    }
}

impl From<&User> for UserSummaryData {
    fn from(user: &User) -> Self {
        Self::new(
            user.id,
            user.first_name.as_deref(),
            user.last_name.as_deref(),
            user.image_url.clone(),
        )
    }
}

#[derive(Debug, Clone, GraphQLInputObject)]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

impl From<UpdateProfileInput> for UpdateProfile {
    fn from(input: UpdateProfileInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            bio: input.bio,
        }
    }
}
