use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One-or-many hobby filter; the API accepts both
/// `"hobby": "Hiking"` and `"hobby": ["Hiking", "Cooking"]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HobbyFilter {
    One(String),
    Many(Vec<String>),
}

impl HobbyFilter {
    /// Target hobby strings, with empty entries dropped.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            HobbyFilter::One(h) => {
                if h.is_empty() {
                    Vec::new()
                } else {
                    vec![h.as_str()]
                }
            }
            HobbyFilter::Many(hs) => hs
                .iter()
                .map(String::as_str)
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }
}

/// Request-scoped filter/ranking instructions.
///
/// Recognized keys get a typed slot; anything else lands in `extra` and is
/// matched by generic case-insensitive equality against the corresponding
/// profile attribute. Absent, empty, and null values are not active criteria.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hobby: Option<HobbyFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Free-text search instruction; orthogonal to the structured fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Criteria {
    /// The free-text description, if present and non-blank.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// Whether any structured criterion (everything except `description`)
    /// is active. When this is false the engine skips filtering entirely
    /// and works over the full profile collection.
    pub fn has_structured(&self) -> bool {
        non_empty(&self.location).is_some()
            || self.hobby.as_ref().is_some_and(|h| !h.targets().is_empty())
            || non_empty(&self.occupation).is_some()
            || self.age_min.is_some()
            || self.age_max.is_some()
            || non_empty(&self.gender).is_some()
            || self.extra.values().any(value_active)
    }
}

/// `Some` only when the optional string is present and non-empty.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Whether a generic criterion value counts as active.
pub fn value_active(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Stringifies a generic criterion value for equality comparison
/// (strings compare by content, not by their JSON quoting).
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hobby_accepts_string_and_list() {
        let one: Criteria = serde_json::from_str(r#"{"hobby": "Hiking"}"#).unwrap();
        assert_eq!(one.hobby.unwrap().targets(), vec!["Hiking"]);

        let many: Criteria = serde_json::from_str(r#"{"hobby": ["Hiking", "Cooking"]}"#).unwrap();
        assert_eq!(many.hobby.unwrap().targets(), vec!["Hiking", "Cooking"]);
    }

    #[test]
    fn test_empty_hobby_entries_are_inactive() {
        let criteria: Criteria = serde_json::from_str(r#"{"hobby": ""}"#).unwrap();
        assert!(!criteria.has_structured());

        let criteria: Criteria = serde_json::from_str(r#"{"hobby": ["", ""]}"#).unwrap();
        assert!(!criteria.has_structured());
    }

    #[test]
    fn test_unrecognized_keys_flatten_into_extra() {
        let criteria: Criteria =
            serde_json::from_str(r#"{"location": "Tokyo", "zodiac": "Leo"}"#).unwrap();
        assert_eq!(criteria.location.as_deref(), Some("Tokyo"));
        assert_eq!(criteria.extra.get("zodiac"), Some(&Value::from("Leo")));
    }

    #[test]
    fn test_description_only_is_not_structured() {
        let criteria: Criteria =
            serde_json::from_str(r#"{"description": "someone outdoorsy"}"#).unwrap();
        assert!(!criteria.has_structured());
        assert_eq!(criteria.description(), Some("someone outdoorsy"));
    }

    #[test]
    fn test_blank_description_reads_as_absent() {
        let criteria: Criteria = serde_json::from_str(r#"{"description": "   "}"#).unwrap();
        assert_eq!(criteria.description(), None);
    }

    #[test]
    fn test_null_and_empty_extras_are_inactive() {
        let criteria: Criteria =
            serde_json::from_str(r#"{"zodiac": null, "team": ""}"#).unwrap();
        assert!(!criteria.has_structured());
    }

    #[test]
    fn test_age_bounds_are_structured() {
        let criteria: Criteria = serde_json::from_str(r#"{"age_min": 25}"#).unwrap();
        assert!(criteria.has_structured());
    }

    #[test]
    fn test_value_text_strips_json_quoting() {
        assert_eq!(value_text(&Value::from("Leo")), "Leo");
        assert_eq!(value_text(&Value::from(42)), "42");
        assert_eq!(value_text(&Value::from(true)), "true");
    }
}
