//! Rarity scoring of a composed character.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::RarityTier;

/// Count of selected traits per tier. Every tier is present, zero counts included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaritySummary(BTreeMap<RarityTier, u32>);

impl RaritySummary {
    pub fn count(&self, tier: RarityTier) -> u32 {
        self.0.get(&tier).copied().unwrap_or(0)
    }

    /// Total number of counted traits.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Rarest tier with a non-zero count.
    pub fn highest(&self) -> Option<RarityTier> {
        RarityTier::ALL
            .into_iter()
            .rev()
            .find(|tier| self.count(*tier) > 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RarityTier, u32)> + '_ {
        self.0.iter().map(|(tier, count)| (*tier, *count))
    }
}

impl Default for RaritySummary {
    fn default() -> Self {
        Self(RarityTier::ALL.into_iter().map(|tier| (tier, 0)).collect())
    }
}

/// Rarity summary plus the mean tier score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityReport {
    pub summary: RaritySummary,
    /// Mean of [`RarityTier::score_weight`] over all traits, in `[0, 1]`;
    /// 0.0 when there are no traits.
    pub score: f64,
}

impl RarityReport {
    /// Score a set of selected tiers, one entry per selected trait.
    pub fn from_tiers(tiers: impl IntoIterator<Item = RarityTier>) -> Self {
        let mut summary = RaritySummary::default();
        let mut weight_sum = 0.0;

        for tier in tiers {
            *summary.0.entry(tier).or_insert(0) += 1;
            weight_sum += tier.score_weight();
        }

        let total = summary.total();
        let score = if total > 0 {
            weight_sum / f64::from(total)
        } else {
            0.0
        };

        Self { summary, score }
    }
}
