//! Weighted tier sampling with deterministic empty-tier fallback.

use crate::entities::CategoryTiers;
use crate::value_objects::{RarityTier, TierWeights};

/// Picks the tier a category's trait is drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierSampler {
    weights: TierWeights,
}

impl TierSampler {
    pub fn new(weights: TierWeights) -> Self {
        Self { weights }
    }

    /// Sample a tier for `tiers`.
    ///
    /// One weighted roll is always consumed. If the sampled tier is empty the
    /// first non-empty tier in priority order is used instead; `None` means the
    /// category has no traits at all and must be skipped.
    pub fn sample(
        &self,
        tiers: &CategoryTiers,
        roll: &mut impl FnMut(u64) -> u64,
    ) -> Option<RarityTier> {
        let sampled = self.weights.pick(roll);
        if !tiers.traits(sampled).is_empty() {
            return Some(sampled);
        }
        tiers.first_non_empty()
    }
}
