//! Parsing of the external ranker's free-text reply.
//!
//! The model is asked for a bare comma-separated id list but routinely adds
//! prose around it, so everything here treats the reply as untrusted text.

use std::collections::HashSet;

use tracing::warn;

use crate::models::Profile;

/// Reorders `candidates` according to the id list found in `raw`.
///
/// Only the last line of the reply is considered (models like to prefix an
/// explanation), every character that is not a digit or comma is stripped,
/// and hallucinated or repeated ids are discarded. Candidates the model left
/// out are appended in their original order, so the result is always a
/// permutation of `candidates`. When no id can be extracted at all, the
/// original order is returned unchanged; a bad reply degrades ranking to a
/// no-op instead of failing the request.
pub fn parse_ranking(raw: &str, candidates: &[Profile]) -> Vec<Profile> {
    let last_line = raw.trim().lines().last().unwrap_or("");
    let cleaned: String = last_line
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    let ids: Vec<u32> = cleaned
        .split(',')
        .filter_map(|token| token.parse().ok())
        .collect();

    if ids.is_empty() {
        warn!("No ids found in ranking reply; keeping candidate order. Reply: {raw:?}");
        return candidates.to_vec();
    }

    let mut seen = HashSet::new();
    let mut ranked = Vec::with_capacity(candidates.len());
    for id in ids {
        if !seen.insert(id) {
            continue;
        }
        if let Some(profile) = candidates.iter().find(|p| p.id == id) {
            ranked.push(profile.clone());
        }
    }

    // Never drop a valid candidate: append everything the model omitted.
    for profile in candidates {
        if !seen.contains(&profile.id) {
            ranked.push(profile.clone());
        }
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: u32) -> Profile {
        Profile {
            id,
            name: format!("User {id}"),
            age: 30,
            occupation: "Engineer".to_string(),
            location: "Tokyo".to_string(),
            hobbies: vec!["Hiking".to_string()],
            gender: "Female".to_string(),
            image: format!("avatars/user_{id}.jpg"),
        }
    }

    fn ids(profiles: &[Profile]) -> Vec<u32> {
        profiles.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_identity_ordering_is_preserved() {
        let candidates = vec![profile(1), profile(2), profile(3)];
        let result = parse_ranking("1, 2, 3", &candidates);
        assert_eq!(result, candidates);
    }

    #[test]
    fn test_prose_prefix_is_ignored_in_favor_of_last_line() {
        let candidates = vec![profile(1), profile(2), profile(3)];
        let result = parse_ranking("Here you go:\n3, 1, 2", &candidates);
        assert_eq!(ids(&result), vec![3, 1, 2]);
    }

    #[test]
    fn test_hallucinated_ids_are_dropped() {
        let candidates = vec![profile(1), profile(2), profile(3)];
        let result = parse_ranking("99, 2, 404, 1", &candidates);
        assert_eq!(ids(&result), vec![2, 1, 3]);
    }

    #[test]
    fn test_repeated_ids_appear_once() {
        let candidates = vec![profile(1), profile(2), profile(3)];
        let result = parse_ranking("2, 2, 1", &candidates);
        assert_eq!(ids(&result), vec![2, 1, 3]);
    }

    #[test]
    fn test_omitted_candidates_are_appended_in_original_order() {
        let candidates = vec![profile(5), profile(6), profile(7), profile(8)];
        let result = parse_ranking("7", &candidates);
        assert_eq!(ids(&result), vec![7, 5, 6, 8]);
    }

    #[test]
    fn test_no_digits_falls_back_to_candidate_order() {
        let candidates = vec![profile(1), profile(2)];
        let result = parse_ranking("I am sorry, I cannot rank these.", &candidates);
        assert_eq!(result, candidates);
    }

    #[test]
    fn test_empty_reply_falls_back_to_candidate_order() {
        let candidates = vec![profile(1), profile(2)];
        assert_eq!(parse_ranking("", &candidates), candidates);
    }

    #[test]
    fn test_surrounding_noise_on_the_id_line_is_stripped() {
        let candidates = vec![profile(1), profile(2), profile(3)];
        let result = parse_ranking("Ranked: **2**, then 3, then 1.", &candidates);
        assert_eq!(ids(&result), vec![2, 3, 1]);
    }

    #[test]
    fn test_only_hallucinated_ids_keeps_original_order() {
        let candidates = vec![profile(1), profile(2)];
        let result = parse_ranking("77, 88", &candidates);
        assert_eq!(ids(&result), vec![1, 2]);
    }
}
