//! Deterministic multi-field predicate matching over the profile collection.

use crate::models::Profile;
use crate::recommend::criteria::{non_empty, value_active, value_text, Criteria};

/// Filters profiles against the active criteria.
///
/// `strict = true` keeps a profile only when every active criterion matches
/// (and at least one is active); `strict = false` keeps it when at least one
/// matches. Pure and deterministic; callers handle the no-criteria case
/// upstream, since strict mode with zero active criteria yields nothing.
pub fn filter_profiles(profiles: &[Profile], criteria: &Criteria, strict: bool) -> Vec<Profile> {
    profiles
        .iter()
        .filter(|p| matches(p, criteria, strict))
        .cloned()
        .collect()
}

fn matches(profile: &Profile, criteria: &Criteria, strict: bool) -> bool {
    let mut active = 0usize;
    let mut matched = 0usize;

    if let Some(location) = non_empty(&criteria.location) {
        active += 1;
        if eq_ci(&profile.location, location) {
            matched += 1;
        }
    }

    if let Some(hobby) = &criteria.hobby {
        let targets = hobby.targets();
        if !targets.is_empty() {
            active += 1;
            // Substring check against the joined hobby list. A target like
            // "art" also matches inside "Martial Arts"; that looseness is
            // intentional and relied on by multi-word hobby values.
            let joined = profile.hobbies.join(" ").to_lowercase();
            if targets.iter().any(|t| joined.contains(&t.to_lowercase())) {
                matched += 1;
            }
        }
    }

    if let Some(occupation) = non_empty(&criteria.occupation) {
        active += 1;
        // Symmetric: "Engineer" matches "Software Engineer" and vice versa.
        let theirs = profile.occupation.to_lowercase();
        let wanted = occupation.to_lowercase();
        if theirs.contains(&wanted) || wanted.contains(&theirs) {
            matched += 1;
        }
    }

    if let Some(age_min) = criteria.age_min {
        active += 1;
        if profile.age >= age_min {
            matched += 1;
        }
    }

    if let Some(age_max) = criteria.age_max {
        active += 1;
        if profile.age <= age_max {
            matched += 1;
        }
    }

    if let Some(gender) = non_empty(&criteria.gender) {
        active += 1;
        if eq_ci(&profile.gender, gender) {
            matched += 1;
        }
    }

    // Description has no profile attribute to match, so when structured
    // criteria are present it counts as active-but-unmatched, pushing mixed
    // searches toward the relaxed pass.
    if let Some(description) = criteria.description() {
        active += 1;
        if eq_ci(&profile.attr("description"), description) {
            matched += 1;
        }
    }

    for (key, value) in &criteria.extra {
        if value_active(value) {
            active += 1;
            if eq_ci(&profile.attr(key), &value_text(value)) {
                matched += 1;
            }
        }
    }

    if strict {
        active > 0 && matched == active
    } else {
        matched > 0
    }
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::criteria::HobbyFilter;

    fn profile(
        id: u32,
        age: u32,
        occupation: &str,
        location: &str,
        hobbies: &[&str],
        gender: &str,
    ) -> Profile {
        Profile {
            id,
            name: format!("User {id}"),
            age,
            occupation: occupation.to_string(),
            location: location.to_string(),
            hobbies: hobbies.iter().map(|h| h.to_string()).collect(),
            gender: gender.to_string(),
            image: format!("avatars/user_{id}.jpg"),
        }
    }

    fn sample() -> Vec<Profile> {
        vec![
            profile(1, 28, "Photographer", "Taipei", &["Photography"], "Female"),
            profile(2, 34, "Software Engineer", "Tokyo", &["Hiking"], "Male"),
            profile(3, 45, "Chef", "Taipei", &["Cooking", "Martial Arts"], "Male"),
        ]
    }

    #[test]
    fn test_strict_location_exact_case_insensitive() {
        let criteria: Criteria = serde_json::from_str(r#"{"location": "taipei"}"#).unwrap();
        let result = filter_profiles(&sample(), &criteria, true);
        assert_eq!(
            result.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_strict_requires_all_active_criteria() {
        let criteria: Criteria =
            serde_json::from_str(r#"{"location": "Taipei", "gender": "Female"}"#).unwrap();
        let result = filter_profiles(&sample(), &criteria, true);
        assert_eq!(result.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_relaxed_accepts_any_match_and_is_superset_of_strict() {
        let criteria: Criteria =
            serde_json::from_str(r#"{"location": "Taipei", "gender": "Female"}"#).unwrap();
        let strict = filter_profiles(&sample(), &criteria, true);
        let relaxed = filter_profiles(&sample(), &criteria, false);

        assert_eq!(
            relaxed.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        for p in &strict {
            assert!(relaxed.iter().any(|r| r.id == p.id));
        }
    }

    #[test]
    fn test_empty_criteria_strict_yields_nothing() {
        let criteria = Criteria::default();
        assert!(filter_profiles(&sample(), &criteria, true).is_empty());
        assert!(filter_profiles(&sample(), &criteria, false).is_empty());
    }

    #[test]
    fn test_hobby_substring_matches_inside_joined_list() {
        // Documented looseness: "art" hits "Martial Arts".
        let criteria = Criteria {
            hobby: Some(HobbyFilter::One("art".to_string())),
            ..Default::default()
        };
        let result = filter_profiles(&sample(), &criteria, true);
        assert_eq!(result.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_hobby_list_matches_any_target() {
        let criteria = Criteria {
            hobby: Some(HobbyFilter::Many(vec![
                "Skydiving".to_string(),
                "Hiking".to_string(),
            ])),
            ..Default::default()
        };
        let result = filter_profiles(&sample(), &criteria, true);
        assert_eq!(result.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_occupation_substring_is_symmetric() {
        let narrow: Criteria = serde_json::from_str(r#"{"occupation": "Engineer"}"#).unwrap();
        let result = filter_profiles(&sample(), &narrow, true);
        assert_eq!(result.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);

        let wide: Criteria =
            serde_json::from_str(r#"{"occupation": "Senior Software Engineer"}"#).unwrap();
        let result = filter_profiles(&sample(), &wide, true);
        assert_eq!(result.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_age_range_bounds_are_inclusive() {
        let criteria: Criteria =
            serde_json::from_str(r#"{"age_min": 28, "age_max": 34}"#).unwrap();
        let result = filter_profiles(&sample(), &criteria, true);
        assert_eq!(
            result.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_unrecognized_key_uses_generic_equality() {
        let criteria: Criteria = serde_json::from_str(r#"{"name": "user 2"}"#).unwrap();
        let result = filter_profiles(&sample(), &criteria, true);
        assert_eq!(result.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_unknown_attribute_reads_as_empty_and_never_matches() {
        let criteria: Criteria = serde_json::from_str(r#"{"zodiac": "Leo"}"#).unwrap();
        assert!(filter_profiles(&sample(), &criteria, true).is_empty());
    }

    #[test]
    fn test_description_counts_as_active_in_mixed_searches() {
        // Strict filtering cannot satisfy a free-text description, so a
        // location that matches everything still fails the strict pass.
        let criteria: Criteria = serde_json::from_str(
            r#"{"location": "Taipei", "description": "someone artistic"}"#,
        )
        .unwrap();
        assert!(filter_profiles(&sample(), &criteria, true).is_empty());

        let relaxed = filter_profiles(&sample(), &criteria, false);
        assert_eq!(
            relaxed.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }
}
