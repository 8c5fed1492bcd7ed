//! Composed characters and their minted metadata record.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entities::TraitDescriptor;
use crate::value_objects::{RarityReport, RaritySummary, RarityTier, TraitSignature};
use crate::CharacterId;

/// A trait chosen for one category, with the tier it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTrait {
    #[serde(rename = "rarity_tier")]
    pub tier: RarityTier,
    #[serde(flatten)]
    pub descriptor: TraitDescriptor,
}

impl SelectedTrait {
    pub fn new(tier: RarityTier, descriptor: TraitDescriptor) -> Self {
        Self { tier, descriptor }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// One selected trait per category, in catalog order.
///
/// Categories whose tiers were all empty have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterTraits {
    selections: IndexMap<String, SelectedTrait>,
}

impl CharacterTraits {
    pub fn from_selections<C, I>(selections: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = (C, SelectedTrait)>,
    {
        Self {
            selections: selections
                .into_iter()
                .map(|(category, selected)| (category.into(), selected))
                .collect(),
        }
    }

    pub fn get(&self, category: &str) -> Option<&SelectedTrait> {
        self.selections.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SelectedTrait)> {
        self.selections.iter().map(|(c, s)| (c.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn signature(&self) -> TraitSignature {
        TraitSignature::from_pairs(self.iter().map(|(category, selected)| (category, selected.name())))
    }

    pub fn rarity(&self) -> RarityReport {
        RarityReport::from_tiers(self.selections.values().map(|s| s.tier))
    }
}

/// Fields that may be patched onto an already-minted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPatch {
    pub asset_url: Option<String>,
}

impl CharacterPatch {
    pub fn asset_url(url: impl Into<String>) -> Self {
        Self {
            asset_url: Some(url.into()),
        }
    }
}

/// The persisted record of a minted character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterMetadata {
    id: CharacterId,
    traits: CharacterTraits,
    rarity_summary: RaritySummary,
    rarity_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generation_seed: Option<u64>,
    /// Stamped by the store on the first successful write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    asset_url: Option<String>,
}

impl CharacterMetadata {
    /// Assemble an unminted record, scoring the traits.
    pub fn new(id: CharacterId, traits: CharacterTraits, generation_seed: Option<u64>) -> Self {
        let RarityReport { summary, score } = traits.rarity();
        Self {
            id,
            traits,
            rarity_summary: summary,
            rarity_score: score,
            generation_seed,
            minted_at: None,
            asset_url: None,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn traits(&self) -> &CharacterTraits {
        &self.traits
    }

    pub fn rarity_summary(&self) -> &RaritySummary {
        &self.rarity_summary
    }

    pub fn rarity_score(&self) -> f64 {
        self.rarity_score
    }

    pub fn generation_seed(&self) -> Option<u64> {
        self.generation_seed
    }

    pub fn minted_at(&self) -> Option<DateTime<Utc>> {
        self.minted_at
    }

    pub fn asset_url(&self) -> Option<&str> {
        self.asset_url.as_deref()
    }

    pub fn is_minted(&self) -> bool {
        self.minted_at.is_some()
    }

    pub fn signature(&self) -> TraitSignature {
        self.traits.signature()
    }

    /// Copy of this record carrying the store's mint timestamp.
    pub fn stamped(mut self, minted_at: DateTime<Utc>) -> Self {
        self.minted_at = Some(minted_at);
        self
    }

    pub fn apply_patch(&mut self, patch: &CharacterPatch) {
        if let Some(url) = &patch.asset_url {
            self.asset_url = Some(url.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn selected(tier: RarityTier, name: &str) -> SelectedTrait {
        SelectedTrait::new(tier, TraitDescriptor::new(name))
    }

    fn traits() -> CharacterTraits {
        CharacterTraits::from_selections([
            ("HeadType", selected(RarityTier::Common, "RoundHead")),
            ("EyesFace", selected(RarityTier::Legendary, "Vertical Prime Glyphs")),
        ])
    }

    #[test]
    fn new_record_is_scored_and_unminted() {
        let record = CharacterMetadata::new(CharacterId::new(1), traits(), Some(42));

        assert_eq!(record.rarity_summary().count(RarityTier::Legendary), 1);
        assert_eq!(record.rarity_summary().total(), 2);
        assert!((record.rarity_score() - 0.375).abs() < 1e-12);
        assert_eq!(record.generation_seed(), Some(42));
        assert!(!record.is_minted());
    }

    #[test]
    fn signature_uses_trait_names() {
        let signature = traits().signature();
        assert_eq!(signature.trait_name("EyesFace"), Some("Vertical Prime Glyphs"));
        assert_eq!(signature.len(), 2);
    }

    #[test]
    fn stamping_and_patching() {
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 16, 40, 51).unwrap();
        let mut record = CharacterMetadata::new(CharacterId::new(3), traits(), None).stamped(at);
        record.apply_patch(&CharacterPatch::asset_url("ipfs://bafy"));
        record.apply_patch(&CharacterPatch::default());

        assert_eq!(record.minted_at(), Some(at));
        assert_eq!(record.asset_url(), Some("ipfs://bafy"));
    }

    #[test]
    fn serializes_traits_with_rarity_tier_inline() {
        let record = CharacterMetadata::new(CharacterId::new(9), traits(), None);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 9);
        assert_eq!(json["traits"]["HeadType"]["name"], "RoundHead");
        assert_eq!(json["traits"]["HeadType"]["rarity_tier"], "Common");
        assert!(json.get("generation_seed").is_none());
        assert!(json.get("minted_at").is_none());

        let back: CharacterMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
