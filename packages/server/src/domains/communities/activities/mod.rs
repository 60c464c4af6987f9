//! Community activities - business logic functions

mod membership;
mod queries;

pub use membership::{join_community, leave_community};
pub use queries::{get_all_communities, get_community_details, CommunityDetails};
