use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::models::Profile;

/// Read-only profile collection, loaded once at startup and shared by every
/// request. No request ever mutates it, so it needs no locking.
#[derive(Debug)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
}

impl ProfileStore {
    /// Loads the flat JSON profile file (an array of profile records).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;
        let profiles: Vec<Profile> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse profile file '{}'", path.display()))?;
        info!("Loaded {} profiles from {}", profiles.len(), path.display());
        Ok(Self { profiles })
    }

    /// Builds a store from in-memory records. Used by tests to avoid file I/O.
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn all(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Sorted, de-duplicated projections for the filter UI.
    pub fn filter_options(&self) -> FilterOptions {
        let locations: BTreeSet<&str> = self.profiles.iter().map(|p| p.location.as_str()).collect();
        let occupations: BTreeSet<&str> =
            self.profiles.iter().map(|p| p.occupation.as_str()).collect();
        let hobbies: BTreeSet<&str> = self
            .profiles
            .iter()
            .flat_map(|p| p.hobbies.iter().map(String::as_str))
            .collect();

        FilterOptions {
            locations: locations.into_iter().map(str::to_owned).collect(),
            occupations: occupations.into_iter().map(str::to_owned).collect(),
            hobbies: hobbies.into_iter().map(str::to_owned).collect(),
        }
    }
}

/// Response body for `GET /api/options`.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub occupations: Vec<String>,
    pub hobbies: Vec<String>,
}
