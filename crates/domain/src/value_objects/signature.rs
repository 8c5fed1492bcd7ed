//! Trait signature - the identity of a character's trait combination.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from category to the name of the selected trait.
///
/// Two characters are duplicates when their signatures are equal: same set of
/// categories and the same (case-sensitive) trait name in each. Ordering of
/// categories plays no part in the comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitSignature(BTreeMap<String, String>);

impl TraitSignature {
    pub fn from_pairs<C, N, I>(pairs: I) -> Self
    where
        C: Into<String>,
        N: Into<String>,
        I: IntoIterator<Item = (C, N)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(category, name)| (category.into(), name.into()))
                .collect(),
        )
    }

    pub fn trait_name(&self, category: &str) -> Option<&str> {
        self.0.get(category).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    pub fn is_duplicate_of(&self, other: &TraitSignature) -> bool {
        self == other
    }

    /// True if any of `existing` is a duplicate of this signature.
    pub fn duplicates_any<'a>(&self, existing: impl IntoIterator<Item = &'a TraitSignature>) -> bool {
        existing.into_iter().any(|other| self.is_duplicate_of(other))
    }
}
