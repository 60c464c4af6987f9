//! Typed ID definitions for all domain entities.

pub use super::id::Id;

/// Marker type for User entities.
pub struct User;

/// Marker type for Community entities.
pub struct Community;

/// Marker type for FeedbackRequest entities.
pub struct FeedbackRequest;

/// Marker type for FeedbackResponse entities.
pub struct FeedbackResponse;

/// Marker type for FeedbackEvaluation entities.
pub struct FeedbackEvaluation;

pub type UserId = Id<User>;
pub type CommunityId = Id<Community>;
pub type FeedbackRequestId = Id<FeedbackRequest>;
pub type FeedbackResponseId = Id<FeedbackResponse>;
pub type FeedbackEvaluationId = Id<FeedbackEvaluation>;
