//! Ranking prompt construction.
//!
//! The candidate line format is a contract with the parser: the model is
//! asked to echo back the `ID:` values, so the field order and the id marker
//! must stay stable.

use crate::models::Profile;
use crate::recommend::criteria::{non_empty, value_active, value_text, Criteria};

/// Builds the natural-language ranking instruction for the external ranker.
/// Pure function, no side effects.
pub fn build_ranking_prompt(candidates: &[Profile], criteria: &Criteria, top_k: usize) -> String {
    let candidates_text = candidates
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{}. ID:{}, {}, age {}, {}, {}, hobbies: {}, {}",
                i + 1,
                p.id,
                p.name,
                p.age,
                p.occupation,
                p.location,
                p.hobbies.join(", "),
                p.gender
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let criteria_text = describe_criteria(criteria);

    format!(
        "You are a professional matchmaking assistant. From the candidate profiles below, \
select the {top_k} best matches for the search criteria and order them from best to worst.

Search criteria:
{criteria_text}

Candidate profiles:
{candidates_text}

Weigh each candidate against the criteria carefully:
1. Gender: if the description asks for a specific gender (e.g. \"female\", \"male\", \"woman\", \"man\"), treat it as a hard filter and only return candidates of that gender
2. Location: exact match
3. Hobbies: degree of overlap with the requested hobbies
4. Age: closeness to the requested range
5. Occupation: relatedness of the profession
6. Any other preferences stated in the description

IMPORTANT: a gender requirement in the description is a hard rule, never a soft signal.

Output ONLY the ids, comma separated, on a single line with no other text:
ID1, ID2, ID3, ID4, ID5

For example: 42, 17, 89, 3, 56"
    )
}

/// Renders the criteria as natural-language clauses. A free-text description
/// is foregrounded as the primary instruction, with the structured clauses
/// appended as secondary context.
fn describe_criteria(criteria: &Criteria) -> String {
    let mut clauses = Vec::new();

    if let Some(location) = non_empty(&criteria.location) {
        clauses.push(format!("located in {location}"));
    }
    if let Some(hobby) = &criteria.hobby {
        let targets = hobby.targets();
        if !targets.is_empty() {
            clauses.push(format!("hobbies include {}", targets.join(", ")));
        }
    }
    if let Some(occupation) = non_empty(&criteria.occupation) {
        clauses.push(format!("works as {occupation}"));
    }
    if let Some(age_min) = criteria.age_min {
        clauses.push(format!("age at least {age_min}"));
    }
    if let Some(age_max) = criteria.age_max {
        clauses.push(format!("age at most {age_max}"));
    }
    if let Some(gender) = non_empty(&criteria.gender) {
        clauses.push(format!("gender is {gender}"));
    }
    for (key, value) in &criteria.extra {
        if value_active(value) {
            clauses.push(format!("{key} is {}", value_text(value)));
        }
    }

    match criteria.description() {
        Some(description) if clauses.is_empty() => format!("User description: {description}"),
        Some(description) => format!(
            "User description: {description}\nOther criteria: {}",
            clauses.join(", ")
        ),
        None if clauses.is_empty() => "no specific criteria".to_string(),
        None => clauses.join(", "),
    }
}
