use crate::models::{SearchCriteria, SeekingCode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

/// Request to search the member directory
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "account_id", rename = "accountId")]
    pub account_id: String,
    #[validate(range(min = 18, max = 120))]
    #[serde(alias = "age_min", rename = "ageMin", default)]
    pub age_min: Option<u8>,
    #[validate(range(min = 18, max = 120))]
    #[serde(alias = "age_max", rename = "ageMax", default)]
    pub age_max: Option<u8>,
    #[serde(default)]
    pub seeking: Option<String>,
    #[serde(alias = "college_country", rename = "collegeCountry", default)]
    pub college_country: Option<String>,
    #[serde(alias = "college_state", rename = "collegeState", default)]
    pub college_state: Option<String>,
    #[serde(alias = "college_name", rename = "collegeName", default)]
    pub college_name: Option<String>,
    #[serde(alias = "field_of_study", rename = "fieldOfStudy", default)]
    pub field_of_study: Option<String>,
}

impl SearchRequest {
    /// Convert the raw request into domain criteria.
    ///
    /// The seeking code is the only field that can fail; everything else is
    /// optional pass-through.
    pub fn criteria(&self) -> Result<SearchCriteria, String> {
        let seeking = match &self.seeking {
            Some(code) => Some(SeekingCode::from_str(code)?),
            None => None,
        };

        Ok(SearchCriteria {
            age_min: self.age_min,
            age_max: self.age_max,
            seeking,
            college_country: self.college_country.clone(),
            college_state: self.college_state.clone(),
            college_name: self.college_name.clone(),
            field_of_study: self.field_of_study.clone(),
        })
    }
}
