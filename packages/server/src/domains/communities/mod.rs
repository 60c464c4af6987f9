//! Communities domain - community directory and membership
//!
//! Membership is the visibility boundary for feedback requests: a request is
//! only shown to, and only answerable by, members of its target communities.

pub mod activities;
pub mod data;
pub mod edges;
pub mod models;

pub use data::{CommunityData, CommunityDetailsData, CommunityMemberData};
pub use models::{Community, CommunityMember, CommunityWithStats, Membership};
