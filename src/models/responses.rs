use crate::models::domain::{College, Profile, SearchCriteria, SeekingCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One visible search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: i64,
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub age: Option<u32>,
    pub seeking: SeekingCode,
    pub college: College,
    #[serde(rename = "fieldOfStudy")]
    pub field_of_study: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ProfileSummary {
    pub fn from_profile(profile: &Profile, today: NaiveDate) -> Self {
        Self {
            id: profile.id,
            account_id: profile.account_id.clone(),
            age: profile.age_on(today),
            seeking: profile.seeking,
            college: profile.college.clone(),
            field_of_study: profile.field_of_study.clone(),
            created_at: profile.created_at,
        }
    }
}

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub results: Vec<ProfileSummary>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the criteria recall endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallResponse {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub criteria: Option<SearchCriteria>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
