use crate::models::{Profile, Requester};

/// Whether a candidate's own visibility preference hides it from this
/// requester.
///
/// The three rules OR-combine and are always evaluated from the candidate's
/// preference, never the requester's:
/// 1. same college and `restrict_same_college`;
/// 2. same college, same field of study and `restrict_major`;
/// 3. different college and `restrict_other_colleges`.
///
/// Absence is not equality: a requester with no college or no field of study
/// never satisfies a "same college"/"same field" conjunction. A requester
/// with no college counts as outside every college, so rule 3 still applies
/// to them.
///
/// Only baseline-valid profiles belong to the exclusion set; invalid ones
/// are already unsearchable.
pub fn is_hidden_from(candidate: &Profile, requester: &Requester) -> bool {
    if requester.elevated || !candidate.searchable() {
        return false;
    }

    let same_college = requester
        .college
        .as_ref()
        .map(|college| *college == candidate.college)
        .unwrap_or(false);

    if same_college && candidate.visibility.restrict_same_college {
        return true;
    }

    let same_field = requester.field_of_study_id.is_some()
        && requester.field_of_study_id == candidate.field_of_study_id;
    if same_college && same_field && candidate.visibility.restrict_major {
        return true;
    }

    if !same_college && candidate.visibility.restrict_other_colleges {
        return true;
    }

    false
}
