use crate::models::{FieldOfStudy, Profile, SearchCriteria, SeekingCode};
use chrono::{Datelike, NaiveDate};

/// One typed constraint over a candidate profile.
///
/// The normalizer accumulates these into a `SearchPredicate`; each clause is
/// independently evaluable so the normalization rules can be tested one at a
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Date of birth within the inclusive range derived from an age range.
    DobBetween { lower: NaiveDate, upper: NaiveDate },
    /// Candidate's own sought-type code (already inverted from the
    /// requester's stated code).
    Seeking(SeekingCode),
    CollegeCountry(String),
    CollegeState(String),
    CollegeName(String),
    FieldOfStudy(i64),
}

impl Clause {
    pub fn matches(&self, profile: &Profile) -> bool {
        match self {
            Clause::DobBetween { lower, upper } => {
                profile.date_of_birth >= *lower && profile.date_of_birth <= *upper
            }
            Clause::Seeking(code) => profile.seeking == *code,
            Clause::CollegeCountry(country) => profile.college.country == *country,
            Clause::CollegeState(state) => profile.college.state == *state,
            Clause::CollegeName(name) => profile.college.name == *name,
            Clause::FieldOfStudy(id) => profile.field_of_study_id == Some(*id),
        }
    }
}

/// Canonical search predicate: the conjunction of all active clauses, with
/// baseline validity always enforced on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPredicate {
    clauses: Vec<Clause>,
}

impl SearchPredicate {
    pub fn matches(&self, profile: &Profile) -> bool {
        profile.searchable() && self.clauses.iter().all(|clause| clause.matches(profile))
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }
}

/// Build the canonical predicate from raw criteria.
///
/// `fields` is the field-of-study reference set the free-text criterion
/// resolves against; `today` anchors the age-to-date-of-birth conversion.
pub fn normalize(
    criteria: &SearchCriteria,
    fields: &[FieldOfStudy],
    today: NaiveDate,
) -> SearchPredicate {
    let mut predicate = SearchPredicate::default();

    // Both bounds must be present for the age range to constrain anything.
    if let (Some(age_min), Some(age_max)) = (criteria.age_min, criteria.age_max) {
        let upper = years_before(today, u32::from(age_min));
        let lower = years_before(today, u32::from(age_max));
        predicate.push(Clause::DobBetween { lower, upper });
    }

    // Match candidates by the code their own profile carries, not the
    // requester's stated one.
    if let Some(seeking) = criteria.seeking {
        predicate.push(Clause::Seeking(seeking.sought_counterpart()));
    }

    if let Some(country) = &criteria.college_country {
        predicate.push(Clause::CollegeCountry(country.clone()));
    }
    if let Some(state) = &criteria.college_state {
        predicate.push(Clause::CollegeState(state.clone()));
    }
    if let Some(name) = &criteria.college_name {
        predicate.push(Clause::CollegeName(name.clone()));
    }

    if let Some(raw) = &criteria.field_of_study {
        if let Some(field) = resolve_field_of_study(raw, fields) {
            predicate.push(Clause::FieldOfStudy(field.id));
        }
        // Unresolved names impose no constraint.
    }

    predicate
}

/// Resolve a free-text field-of-study name against the reference set,
/// trimming the input and ignoring case. `None` means no constraint.
pub fn resolve_field_of_study<'a>(
    raw: &str,
    fields: &'a [FieldOfStudy],
) -> Option<&'a FieldOfStudy> {
    let wanted = raw.trim();
    if wanted.is_empty() {
        return None;
    }
    fields
        .iter()
        .find(|field| field.name.eq_ignore_ascii_case(wanted))
}

/// `date` minus a whole number of years; Feb 29 clamps to Feb 28 on
/// non-leap target years.
fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    let target_year = date.year() - years as i32;
    match date.with_year(target_year) {
        Some(shifted) => shifted,
        None => NaiveDate::from_ymd_opt(target_year, 2, 28).unwrap_or(date),
    }
}
