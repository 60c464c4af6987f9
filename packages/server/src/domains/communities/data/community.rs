use chrono::{DateTime, Utc};
use juniper::GraphQLObject;

use crate::domains::communities::activities::CommunityDetails;
use crate::domains::communities::models::{CommunityMember, CommunityWithStats};
use crate::domains::users::models::display_name;

/// Community GraphQL data type
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(description = "A topical community that scopes who can see feedback requests")]
pub struct CommunityData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub member_count: i32,
    /// Whether the current user belongs to this community
    pub is_member: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CommunityWithStats> for CommunityData {
    fn from(row: CommunityWithStats) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
            description: row.description,
            member_count: row.member_count as i32,
            is_member: row.is_member,
            created_at: row.created_at,
        }
    }
}

/// Minimal community reference embedded in request views
#[derive(Debug, Clone, GraphQLObject)]
pub struct CommunityRefData {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct CommunityMemberData {
    pub user_id: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl From<CommunityMember> for CommunityMemberData {
    fn from(member: CommunityMember) -> Self {
        Self {
            user_id: member.user_id.to_string(),
            name: display_name(member.first_name.as_deref(), member.last_name.as_deref()),
            image_url: member.image_url,
            joined_at: member.joined_at,
        }
    }
}

#[derive(Debug, Clone, GraphQLObject)]
pub struct CommunityDetailsData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub member_count: i32,
    pub is_member: bool,
    pub members: Vec<CommunityMemberData>,
}

impl From<CommunityDetails> for CommunityDetailsData {
    fn from(details: CommunityDetails) -> Self {
        Self {
            id: details.community.id.to_string(),
            name: details.community.name,
            description: details.community.description,
            member_count: details.members.len() as i32,
            is_member: details.is_member,
            members: details
                .members
                .into_iter()
                .map(CommunityMemberData::from)
                .collect(),
        }
    }
}

/// Outcome of a join/leave mutation
#[derive(Debug, Clone, GraphQLObject)]
pub struct MembershipResult {
    pub community_id: String,
    pub is_member: bool,
    /// False when the call did not change anything (already joined / not a member)
    pub changed: bool,
}
