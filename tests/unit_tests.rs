// Unit tests for Campus Search

use campus_search::core::{is_hidden_from, normalize, resolve_field_of_study, Clause};
use campus_search::models::{
    College, FieldOfStudy, Profile, Requester, SearchCriteria, SeekingCode, VisibilityPreference,
};
use chrono::{NaiveDate, TimeZone, Utc};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
}

fn college(name: &str) -> College {
    College {
        country: "US".to_string(),
        state: "CA".to_string(),
        name: name.to_string(),
    }
}

fn create_profile(id: i64, dob: NaiveDate, seeking: SeekingCode) -> Profile {
    Profile {
        id,
        account_id: format!("acct-{}", id),
        date_of_birth: dob,
        seeking,
        college: college("State U"),
        field_of_study_id: None,
        field_of_study: None,
        published: true,
        deactivated: false,
        account_active: true,
        account_verified: true,
        visibility: VisibilityPreference::default(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn test_age_bounds_contain_returned_ages() {
    let criteria = SearchCriteria {
        age_min: Some(21),
        age_max: Some(30),
        ..Default::default()
    };
    let predicate = normalize(&criteria, &[], today());

    // Sweep dates of birth across the whole range; whenever the predicate
    // matches, the profile's age as of today must lie within [21, 30].
    let mut matched = 0;
    let mut dob = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
    while dob < end {
        let profile = create_profile(1, dob, SeekingCode::ManSeekingWoman);
        if predicate.matches(&profile) {
            let age = profile.age_on(today()).unwrap();
            assert!(
                (21..=30).contains(&age),
                "returned profile born {} has out-of-range age {}",
                dob,
                age
            );
            matched += 1;
        }
        dob = dob + chrono::Duration::days(30);
    }
    assert!(matched > 0);
}

#[test]
fn test_single_age_bound_applies_no_filter() {
    let criteria = SearchCriteria {
        age_min: Some(21),
        ..Default::default()
    };
    let predicate = normalize(&criteria, &[], today());

    // A 16-year-old date of birth still matches: no constraint is active.
    let profile = create_profile(
        1,
        NaiveDate::from_ymd_opt(2010, 3, 1).unwrap(),
        SeekingCode::ManSeekingWoman,
    );
    assert!(predicate.matches(&profile));
}

#[test]
fn test_seeking_inversion_against_candidates() {
    let criteria = SearchCriteria {
        seeking: Some(SeekingCode::ManSeekingWoman),
        ..Default::default()
    };
    let predicate = normalize(&criteria, &[], today());

    let dob = NaiveDate::from_ymd_opt(2003, 3, 1).unwrap();
    // "MW" searchers must be matched against "WM" candidates.
    assert!(predicate.matches(&create_profile(1, dob, SeekingCode::WomanSeekingMan)));
    assert!(!predicate.matches(&create_profile(2, dob, SeekingCode::ManSeekingWoman)));

    // Self-symmetric code passes through.
    let criteria = SearchCriteria {
        seeking: Some(SeekingCode::ManSeekingMan),
        ..Default::default()
    };
    let predicate = normalize(&criteria, &[], today());
    assert!(predicate.matches(&create_profile(3, dob, SeekingCode::ManSeekingMan)));
}

#[test]
fn test_field_of_study_resolution() {
    let fields = vec![
        FieldOfStudy { id: 1, name: "Computer Science".to_string() },
        FieldOfStudy { id: 2, name: "Biology".to_string() },
    ];

    let resolved = resolve_field_of_study("computer science", &fields);
    assert_eq!(resolved.map(|f| f.id), Some(1));

    let resolved = resolve_field_of_study("  BIOLOGY  ", &fields);
    assert_eq!(resolved.map(|f| f.id), Some(2));

    assert!(resolve_field_of_study("zzz-unknown", &fields).is_none());

    // Unmatched input yields the unconstrained predicate, not an error.
    let criteria = SearchCriteria {
        field_of_study: Some("zzz-unknown".to_string()),
        ..Default::default()
    };
    assert!(normalize(&criteria, &fields, today()).clauses().is_empty());
}

#[test]
fn test_clause_equality_for_builder_output() {
    let criteria = SearchCriteria {
        seeking: Some(SeekingCode::WomanSeekingMan),
        college_country: Some("US".to_string()),
        ..Default::default()
    };
    let predicate = normalize(&criteria, &[], today());

    assert_eq!(
        predicate.clauses(),
        &[
            Clause::Seeking(SeekingCode::ManSeekingWoman),
            Clause::CollegeCountry("US".to_string()),
        ]
    );
}

#[test]
fn test_unaffiliated_requester_policy() {
    // A requester with no college and no profile is outside every college:
    // restrict_other_colleges hides candidates from them, but the
    // same-college and same-major rules never trigger.
    let unaffiliated = Requester {
        account_id: "outsider".to_string(),
        college: None,
        field_of_study_id: None,
        elevated: false,
    };

    let mut outsiders_hidden = create_profile(
        1,
        NaiveDate::from_ymd_opt(2003, 3, 1).unwrap(),
        SeekingCode::WomanSeekingMan,
    );
    outsiders_hidden.visibility = VisibilityPreference {
        restrict_other_colleges: true,
        ..Default::default()
    };
    assert!(is_hidden_from(&outsiders_hidden, &unaffiliated));

    let mut college_hidden = outsiders_hidden.clone();
    college_hidden.visibility = VisibilityPreference {
        restrict_same_college: true,
        restrict_major: true,
        ..Default::default()
    };
    assert!(!is_hidden_from(&college_hidden, &unaffiliated));
}
