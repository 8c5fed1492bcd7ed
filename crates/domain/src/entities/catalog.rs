//! Trait catalog - categories, rarity tiers and the traits inside them.
//!
//! The catalog is read-only input to character composition. Augmenting it
//! (adding or replacing categories) produces a new catalog value and never
//! touches the original.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value_objects::RarityTier;
use crate::DomainError;

/// A single selectable trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub compatibility_notes: String,
}

impl TraitDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            compatibility_notes: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The traits of one category, grouped by rarity tier.
///
/// Tiers missing from the source data are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTiers {
    tiers: BTreeMap<RarityTier, Vec<TraitDescriptor>>,
}

impl CategoryTiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(mut self, tier: RarityTier, traits: Vec<TraitDescriptor>) -> Self {
        self.tiers.insert(tier, traits);
        self
    }

    /// Traits in `tier`, empty if the tier is absent.
    pub fn traits(&self, tier: RarityTier) -> &[TraitDescriptor] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First non-empty tier in fallback priority order.
    pub fn first_non_empty(&self) -> Option<RarityTier> {
        RarityTier::ALL
            .into_iter()
            .find(|tier| !self.traits(*tier).is_empty())
    }

    /// True when every tier is empty.
    pub fn is_empty(&self) -> bool {
        self.first_non_empty().is_none()
    }

    pub fn trait_count(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }
}

/// Category name, tier and trait of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatTrait<'a> {
    pub category: &'a str,
    pub tier: RarityTier,
    pub descriptor: &'a TraitDescriptor,
}

/// Per-tier trait counts of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub counts: BTreeMap<RarityTier, usize>,
}

/// Mapping from category name to its tiered traits, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitCatalog {
    categories: IndexMap<String, CategoryTiers>,
}

impl TraitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories<N, I>(categories: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, CategoryTiers)>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(name, tiers)| (name.into(), tiers))
                .collect(),
        }
    }

    /// Categories in catalog order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryTiers)> {
        self.categories.iter().map(|(name, tiers)| (name.as_str(), tiers))
    }

    pub fn category(&self, name: &str) -> Option<&CategoryTiers> {
        self.categories.get(name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Return a catalog with `category` added at the end, or replaced in place
    /// if it already exists.
    pub fn augment(mut self, category: impl Into<String>, tiers: CategoryTiers) -> Self {
        self.categories.insert(category.into(), tiers);
        self
    }

    /// Apply every category of `overlay` through [`TraitCatalog::augment`].
    pub fn merge(self, overlay: TraitCatalog) -> Self {
        overlay
            .categories
            .into_iter()
            .fold(self, |catalog, (name, tiers)| catalog.augment(name, tiers))
    }

    /// Every trait with its category and tier, in catalog then tier order.
    pub fn flatten(&self) -> Vec<FlatTrait<'_>> {
        self.categories
            .iter()
            .flat_map(|(category, tiers)| {
                RarityTier::ALL.into_iter().flat_map(move |tier| {
                    tiers.traits(tier).iter().map(move |descriptor| FlatTrait {
                        category: category.as_str(),
                        tier,
                        descriptor,
                    })
                })
            })
            .collect()
    }

    pub fn summary(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|(category, tiers)| CategorySummary {
                category: category.clone(),
                counts: RarityTier::ALL
                    .into_iter()
                    .map(|tier| (tier, tiers.traits(tier).len()))
                    .collect(),
            })
            .collect()
    }

    /// Categories with no trait in any tier. These are skipped during composition.
    pub fn degenerate_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|(_, tiers)| tiers.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Structural checks beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (category, tiers) in &self.categories {
            if category.trim().is_empty() {
                return Err(DomainError::validation("Category name cannot be empty"));
            }
            for tier in RarityTier::ALL {
                if tiers.traits(tier).iter().any(|t| t.name.trim().is_empty()) {
                    return Err(DomainError::validation(format!(
                        "Category '{}' has a {} trait with an empty name",
                        category, tier
                    )));
                }
            }
        }
        Ok(())
    }
}
