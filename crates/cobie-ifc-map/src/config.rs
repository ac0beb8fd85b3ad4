//! Property name map configuration.
//!
//! Each source attribute key maps to a candidate list of the form
//! `"Set1.Member1;Set2.Member2"`. Only the first candidate that splits
//! into exactly two non-empty parts is kept; keys with no well-formed
//! candidate are skipped and resolve to nothing at lookup time.
//!
//! The map is an explicitly constructed, immutable value passed to the
//! writer at construction time; there is no process-wide state.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Where a source value lands in the target schema: a container name
/// plus a member name. Both are non-empty once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetProperty {
    pub set_name: String,
    pub property_name: String,
}

/// Read-only mapping from source attribute key to target location.
///
/// Lookup is case sensitive. Registering the same key twice keeps the
/// later entry (unique-key map semantics).
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    entries: BTreeMap<String, TargetProperty>,
}

impl PropertyMap {
    /// Builds a map from `(key, candidate-list)` pairs, keeping only
    /// keys with a well-formed candidate.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = BTreeMap::new();
        for (key, candidates) in entries {
            if let Some(target) = first_candidate(candidates.as_ref()) {
                map.insert(key.into(), target);
            }
        }
        Self { entries: map }
    }

    /// Loads a map from a JSON object of `{ key: "Set.Member;..." }`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read property map from {}", path.display()))?;
        let raw: BTreeMap<String, String> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse property map from {}", path.display()))?;
        Ok(Self::from_entries(raw))
    }

    /// Resolves a source key to its target location.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&TargetProperty> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered source keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Picks the first well-formed `"Container.Member"` candidate from a
/// ';'-separated candidate list.
fn first_candidate(raw: &str) -> Option<TargetProperty> {
    for candidate in raw.split(';') {
        let parts: Vec<&str> = candidate
            .split('.')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if let [set_name, property_name] = parts.as_slice() {
            return Some(TargetProperty {
                set_name: (*set_name).to_string(),
                property_name: (*property_name).to_string(),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_candidate_takes_first_well_formed_pair() {
        let target = first_candidate("Pset_Asset.Manufacturer;Pset_Other.Maker").unwrap();
        assert_eq!(target.set_name, "Pset_Asset");
        assert_eq!(target.property_name, "Manufacturer");
    }

    #[test]
    fn malformed_candidates_are_skipped() {
        // First candidate has three parts, second is well-formed.
        let target = first_candidate("A.B.C;Pset_Asset.Manufacturer").unwrap();
        assert_eq!(target.set_name, "Pset_Asset");

        assert!(first_candidate("NoDotHere").is_none());
        assert!(first_candidate("").is_none());
        assert!(first_candidate(";;").is_none());
        assert!(first_candidate("OnlySet.").is_none());
    }

    #[test]
    fn empty_parts_are_dropped_before_counting() {
        // Doubled delimiter still leaves two non-empty parts.
        let target = first_candidate("Pset_Asset..Manufacturer").unwrap();
        assert_eq!(target.set_name, "Pset_Asset");
        assert_eq!(target.property_name, "Manufacturer");
    }
}
