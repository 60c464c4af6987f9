use juniper::GraphQLEnum;

use crate::domains::feedback::lifecycle::{RequestStatus, RequestType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum RequestTypeData {
    Linkedin,
    Email,
    Resume,
    Portfolio,
    Coverletter,
}

impl From<RequestType> for RequestTypeData {
    fn from(value: RequestType) -> Self {
        match value {
            RequestType::Linkedin => Self::Linkedin,
            RequestType::Email => Self::Email,
            RequestType::Resume => Self::Resume,
            RequestType::Portfolio => Self::Portfolio,
            RequestType::Coverletter => Self::Coverletter,
        }
    }
}

impl From<RequestTypeData> for RequestType {
    fn from(value: RequestTypeData) -> Self {
        match value {
            RequestTypeData::Linkedin => Self::Linkedin,
            RequestTypeData::Email => Self::Email,
            RequestTypeData::Resume => Self::Resume,
            RequestTypeData::Portfolio => Self::Portfolio,
            RequestTypeData::Coverletter => Self::Coverletter,
        }
    }
}

/// Lifecycle stage of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum RequestStatusData {
    /// Waiting for a response
    Pending,
    /// Answered, waiting for the requester's rating
    InProgress,
    /// Rated
    Completed,
}

impl From<RequestStatus> for RequestStatusData {
    fn from(value: RequestStatus) -> Self {
        match value {
            RequestStatus::Pending => Self::Pending,
            RequestStatus::InProgress => Self::InProgress,
            RequestStatus::Completed => Self::Completed,
        }
    }
}
