use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sought-type code: who the member is combined with who they seek.
///
/// The wire/storage representation is the two-letter code used throughout
/// the directory ("MW", "WM", "MM", "WW").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeekingCode {
    #[serde(rename = "MW")]
    ManSeekingWoman,
    #[serde(rename = "WM")]
    WomanSeekingMan,
    #[serde(rename = "MM")]
    ManSeekingMan,
    #[serde(rename = "WW")]
    WomanSeekingWoman,
}

impl SeekingCode {
    /// The code a matching counterpart carries on their own profile.
    ///
    /// "MW" and "WM" are mutual inverses; "MM" and "WW" are self-symmetric.
    pub fn sought_counterpart(self) -> Self {
        match self {
            Self::ManSeekingWoman => Self::WomanSeekingMan,
            Self::WomanSeekingMan => Self::ManSeekingWoman,
            other => other,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::ManSeekingWoman => "MW",
            Self::WomanSeekingMan => "WM",
            Self::ManSeekingMan => "MM",
            Self::WomanSeekingWoman => "WW",
        }
    }
}

impl FromStr for SeekingCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MW" => Ok(Self::ManSeekingWoman),
            "WM" => Ok(Self::WomanSeekingMan),
            "MM" => Ok(Self::ManSeekingMan),
            "WW" => Ok(Self::WomanSeekingWoman),
            other => Err(format!("unknown seeking code: {}", other)),
        }
    }
}

impl fmt::Display for SeekingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// College affiliation, compared by full equality of all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub country: String,
    pub state: String,
    pub name: String,
}

/// Canonical field-of-study reference entity.
///
/// Names are unique case-insensitively; free-text criteria resolve against
/// this set before they become a predicate clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOfStudy {
    pub id: i64,
    pub name: String,
}

/// A member's three independent search-visibility opt-outs.
///
/// The flags OR-combine: a profile may trigger more than one rule at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityPreference {
    /// Hide from anyone at the same college.
    #[serde(rename = "restrictSameCollege", default)]
    pub restrict_same_college: bool,
    /// Hide from anyone at the same college with the same field of study.
    #[serde(rename = "restrictMajor", default)]
    pub restrict_major: bool,
    /// Hide from anyone not at the same college.
    #[serde(rename = "restrictOtherColleges", default)]
    pub restrict_other_colleges: bool,
}

/// One searchable member profile, joined with its owning account, college
/// and visibility preference as read from the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: NaiveDate,
    pub seeking: SeekingCode,
    pub college: College,
    #[serde(rename = "fieldOfStudyId", default)]
    pub field_of_study_id: Option<i64>,
    #[serde(rename = "fieldOfStudy", default)]
    pub field_of_study: Option<String>,
    pub published: bool,
    pub deactivated: bool,
    #[serde(rename = "accountActive")]
    pub account_active: bool,
    #[serde(rename = "accountVerified")]
    pub account_verified: bool,
    #[serde(default)]
    pub visibility: VisibilityPreference,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Baseline validity: active and verified account, published profile,
    /// not deactivated. Applied identically to the search predicate and the
    /// exclusion set.
    pub fn searchable(&self) -> bool {
        self.account_active && self.account_verified && self.published && !self.deactivated
    }

    /// Whole-year age as of the given date.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.date_of_birth)
    }
}

/// The identity issuing a search: its account, affiliation and approved
/// profile's field of study (either may be absent), plus the elevated flag
/// that bypasses visibility rules entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(default)]
    pub college: Option<College>,
    #[serde(rename = "fieldOfStudyId", default)]
    pub field_of_study_id: Option<i64>,
    #[serde(default)]
    pub elevated: bool,
}

/// Raw, request-scoped search criteria. Every field is optional; the
/// normalizer decides which become predicate clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(rename = "ageMin", default)]
    pub age_min: Option<u8>,
    #[serde(rename = "ageMax", default)]
    pub age_max: Option<u8>,
    #[serde(default)]
    pub seeking: Option<SeekingCode>,
    #[serde(rename = "collegeCountry", default)]
    pub college_country: Option<String>,
    #[serde(rename = "collegeState", default)]
    pub college_state: Option<String>,
    #[serde(rename = "collegeName", default)]
    pub college_name: Option<String>,
    #[serde(rename = "fieldOfStudy", default)]
    pub field_of_study: Option<String>,
}
