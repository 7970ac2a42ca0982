// Integration tests for Campus Search

use campus_search::core::{normalize, SearchEngine};
use campus_search::models::{
    College, FieldOfStudy, Profile, Requester, SearchCriteria, SeekingCode, VisibilityPreference,
};
use chrono::{Duration, NaiveDate, TimeZone, Utc};

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

fn create_profile(
    id: i64,
    college_name: &str,
    field: Option<i64>,
    visibility: VisibilityPreference,
) -> Profile {
    Profile {
        id,
        account_id: format!("acct-{}", id),
        date_of_birth: NaiveDate::from_ymd_opt(2003, 5, 1).unwrap(),
        seeking: SeekingCode::WomanSeekingMan,
        college: college(college_name),
        field_of_study_id: field,
        field_of_study: None,
        published: true,
        deactivated: false,
        account_active: true,
        account_verified: true,
        visibility,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::hours(id),
    }
}

fn create_requester(college_name: &str, field: Option<i64>) -> Requester {
    Requester {
        account_id: "searcher".to_string(),
        college: Some(college(college_name)),
        field_of_study_id: field,
        elevated: false,
    }
}

fn fields() -> Vec<FieldOfStudy> {
    vec![
        FieldOfStudy { id: 1, name: "Biology".to_string() },
        FieldOfStudy { id: 2, name: "Chemistry".to_string() },
    ]
}

#[test]
fn test_end_to_end_privacy_scenario() {
    // Requester: State U, Biology, not elevated; empty criteria.
    let requester = create_requester("State U", Some(1));

    let pool = vec![
        // A: State U, restrict_same_college -> excluded.
        create_profile(
            1,
            "State U",
            None,
            VisibilityPreference { restrict_same_college: true, ..Default::default() },
        ),
        // B: Tech Inst, restrict_other_colleges -> excluded.
        create_profile(
            2,
            "Tech Inst",
            None,
            VisibilityPreference { restrict_other_colleges: true, ..Default::default() },
        ),
        // C: State U, Chemistry, restrict_major -> included (field differs).
        create_profile(
            3,
            "State U",
            Some(2),
            VisibilityPreference { restrict_major: true, ..Default::default() },
        ),
        // D: Tech Inst, no restrictions -> included.
        create_profile(4, "Tech Inst", None, VisibilityPreference::default()),
    ];

    let predicate = normalize(&SearchCriteria::default(), &fields(), today());
    let outcome = SearchEngine::new().search(&predicate, &requester, pool);

    let ids: Vec<i64> = outcome.profiles.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![4, 3]);
}

#[test]
fn test_criteria_and_privacy_combined() {
    let requester = create_requester("State U", Some(1));

    let mut pool = Vec::new();
    // Two Biology majors at State U, one opted out of major visibility.
    pool.push(create_profile(
        1,
        "State U",
        Some(1),
        VisibilityPreference { restrict_major: true, ..Default::default() },
    ));
    pool.push(create_profile(2, "State U", Some(1), VisibilityPreference::default()));
    // A Chemistry major that the criteria will filter out.
    pool.push(create_profile(3, "State U", Some(2), VisibilityPreference::default()));

    let criteria = SearchCriteria {
        field_of_study: Some("biology".to_string()),
        ..Default::default()
    };
    let predicate = normalize(&criteria, &fields(), today());
    let outcome = SearchEngine::new().search(&predicate, &requester, pool);

    let ids: Vec<i64> = outcome.profiles.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
    assert_eq!(outcome.excluded, 1);
}

#[test]
fn test_elevated_requester_matches_raw_predicate() {
    let admin = Requester {
        account_id: "admin".to_string(),
        college: Some(college("State U")),
        field_of_study_id: Some(1),
        elevated: true,
    };
    let locked_down = VisibilityPreference {
        restrict_same_college: true,
        restrict_major: true,
        restrict_other_colleges: true,
    };

    let pool: Vec<Profile> = (1..=6)
        .map(|i| {
            let college_name = if i % 2 == 0 { "State U" } else { "Tech Inst" };
            create_profile(i, college_name, Some(1), locked_down)
        })
        .collect();

    let predicate = normalize(&SearchCriteria::default(), &fields(), today());

    let raw_matches: Vec<i64> = {
        let mut matched: Vec<&Profile> =
            pool.iter().filter(|p| predicate.matches(p)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        matched.iter().map(|p| p.id).collect()
    };

    let outcome = SearchEngine::new().search(&predicate, &admin, pool);
    let ids: Vec<i64> = outcome.profiles.iter().map(|p| p.id).collect();

    assert_eq!(ids, raw_matches);
    assert_eq!(outcome.excluded, 0);
}

#[test]
fn test_results_ordered_newest_first() {
    let requester = create_requester("State U", None);
    let pool: Vec<Profile> = (1..=10)
        .map(|i| create_profile(i, "Tech Inst", None, VisibilityPreference::default()))
        .collect();

    let predicate = normalize(&SearchCriteria::default(), &fields(), today());
    let outcome = SearchEngine::new().search(&predicate, &requester, pool);

    for window in outcome.profiles.windows(2) {
        assert!(window[0].created_at >= window[1].created_at);
    }
    assert_eq!(outcome.profiles[0].id, 10);
}

#[test]
fn test_idempotent_search() {
    let requester = create_requester("State U", Some(1));
    let pool: Vec<Profile> = (1..=20)
        .map(|i| {
            let visibility = VisibilityPreference {
                restrict_same_college: i % 3 == 0,
                restrict_other_colleges: i % 4 == 0,
                ..Default::default()
            };
            let college_name = if i % 2 == 0 { "State U" } else { "Tech Inst" };
            create_profile(i, college_name, Some(1), visibility)
        })
        .collect();

    let criteria = SearchCriteria {
        age_min: Some(18),
        age_max: Some(30),
        ..Default::default()
    };
    let predicate = normalize(&criteria, &fields(), today());
    let engine = SearchEngine::new();

    let first: Vec<i64> = engine
        .search(&predicate, &requester, pool.clone())
        .profiles
        .iter()
        .map(|p| p.id)
        .collect();
    let second: Vec<i64> = engine
        .search(&predicate, &requester, pool)
        .profiles
        .iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_empty_pool_yields_empty_results() {
    let requester = create_requester("State U", None);
    let predicate = normalize(&SearchCriteria::default(), &fields(), today());
    let outcome = SearchEngine::new().search(&predicate, &requester, vec![]);

    assert!(outcome.profiles.is_empty());
    assert_eq!(outcome.total_candidates, 0);
    assert_eq!(outcome.excluded, 0);
}
