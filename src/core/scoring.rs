use std::cmp::Ordering;

use super::models::{CandidateProfile, FilterCriteria, SortKey};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

/// Fraction of active criteria the profile satisfies, unweighted.
///
/// The age range counts only when it is narrower than `[0, 100]`; string
/// filters count when non-empty and match as case-insensitive substrings.
/// Returns 0.0 when no criterion is active.
pub fn match_score(profile: &CandidateProfile, criteria: &FilterCriteria) -> f64 {
    let mut active = 0u32;
    let mut satisfied = 0u32;

    if criteria.has_age_constraint() {
        active += 1;
        if (criteria.min_age..=criteria.max_age).contains(&profile.age) {
            satisfied += 1;
        }
    }

    let string_filters = [
        (&criteria.location, &profile.current_residence),
        (&criteria.role, &profile.current_role),
        (&criteria.education, &profile.education),
        (&criteria.nationality, &profile.nationality),
    ];
    for (wanted, actual) in string_filters {
        if wanted.trim().is_empty() {
            continue;
        }
        active += 1;
        if contains_ignore_case(actual, wanted) {
            satisfied += 1;
        }
    }

    if active == 0 {
        return 0.0;
    }
    f64::from(satisfied) / f64::from(active)
}

pub fn rescore(profiles: &mut [CandidateProfile], criteria: &FilterCriteria) {
    for profile in profiles.iter_mut() {
        profile.match_score = match_score(profile, criteria);
    }
}

/// Stable sort; ties keep their batch order.
pub fn sort_profiles(profiles: &mut [CandidateProfile], key: SortKey) {
    match key {
        SortKey::MatchScore => {
            profiles.sort_by(|a, b| b.match_score.total_cmp(&a.match_score))
        }
        SortKey::Name => profiles.sort_by(|a, b| compare_ignore_case(&a.name, &b.name)),
        SortKey::Age => profiles.sort_by_key(|profile| profile.age),
        SortKey::Nationality => {
            profiles.sort_by(|a, b| compare_ignore_case(&a.nationality, &b.nationality))
        }
    }
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
