use crate::core::criteria::SearchPredicate;
use crate::core::privacy::is_hidden_from;
use crate::models::{Profile, Requester};
use std::collections::HashSet;

/// Result of a privacy-aware search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Visible matches, most recently created profile first.
    pub profiles: Vec<Profile>,
    /// Size of the candidate pool the predicate ran against.
    pub total_candidates: usize,
    /// How many predicate matches the exclusion set removed.
    pub excluded: usize,
}

/// Privacy-aware filter engine.
///
/// Runs the normalized predicate over the candidate pool, then subtracts the
/// exclusion set derived from each candidate's own visibility preference.
/// Elevated requesters skip the exclusion step entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine;

impl SearchEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the visible result set for one request.
    ///
    /// `pool` is a snapshot of joined candidate rows from the record store;
    /// both the predicate matches and the exclusion set are derived from the
    /// same snapshot.
    pub fn search(
        &self,
        predicate: &SearchPredicate,
        requester: &Requester,
        pool: Vec<Profile>,
    ) -> SearchOutcome {
        let total_candidates = pool.len();

        // Exclusion set P over the full baseline-valid pool, by profile id.
        let excluded_ids: HashSet<i64> = if requester.elevated {
            HashSet::new()
        } else {
            pool.iter()
                .filter(|profile| is_hidden_from(profile, requester))
                .map(|profile| profile.id)
                .collect()
        };

        // Candidate set S, newest profile first (id breaks timestamp ties so
        // repeated identical searches return identical orderings).
        let mut matched: Vec<Profile> = pool
            .into_iter()
            .filter(|profile| predicate.matches(profile))
            .collect();
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        // S minus P, preserving S's ordering.
        let before = matched.len();
        matched.retain(|profile| !excluded_ids.contains(&profile.id));
        let excluded = before - matched.len();

        SearchOutcome {
            profiles: matched,
            total_candidates,
            excluded,
        }
    }
}
