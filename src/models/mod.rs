// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    College, FieldOfStudy, Profile, Requester, SearchCriteria, SeekingCode, VisibilityPreference,
};
pub use requests::SearchRequest;
pub use responses::{ErrorResponse, HealthResponse, ProfileSummary, RecallResponse, SearchResponse};
