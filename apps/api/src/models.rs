use serde::{Deserialize, Serialize};

/// One static user record from the profile collection.
/// Immutable after load; `id` is the stable identity key referenced by the
/// ranking prompt/parser round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub occupation: String,
    pub location: String,
    /// Wire name is `hobby` in the profile file and API responses.
    #[serde(rename = "hobby")]
    pub hobbies: Vec<String>,
    pub gender: String,
    /// Path or URL of a display asset; never used in matching.
    pub image: String,
}

impl Profile {
    /// Generic attribute lookup for the criteria fallback path.
    /// Unrecognized keys read as the empty string.
    pub fn attr(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "occupation" => self.occupation.clone(),
            "location" => self.location.clone(),
            "gender" => self.gender.clone(),
            "image" => self.image.clone(),
            "age" => self.age.to_string(),
            _ => String::new(),
        }
    }
}
