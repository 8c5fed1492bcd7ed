//! Relative sampling weights for rarity tiers.

use std::fmt;
use std::str::FromStr;

use crate::value_objects::RarityTier;
use crate::DomainError;

/// Relative weight of each rarity tier when sampling one tier per category.
///
/// Weights are relative and need not sum to 100. A tier with weight 0 is never
/// sampled directly, though it can still be reached through the empty-tier
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierWeights {
    weights: [u32; 5],
}

impl TierWeights {
    /// Build a weight table indexed in [`RarityTier::ALL`] order.
    pub fn new(weights: [u32; 5]) -> Result<Self, DomainError> {
        if weights.iter().all(|w| *w == 0) {
            return Err(DomainError::validation(
                "Tier weights must contain at least one positive weight",
            ));
        }
        Ok(Self { weights })
    }

    /// Build a weight table from `(tier, weight)` pairs; unspecified tiers weigh 0.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (RarityTier, u32)>,
    ) -> Result<Self, DomainError> {
        let mut weights = [0u32; 5];
        for (tier, weight) in pairs {
            weights[tier.index()] = weight;
        }
        Self::new(weights)
    }

    pub fn weight(&self, tier: RarityTier) -> u32 {
        self.weights[tier.index()]
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().map(|w| u64::from(*w)).sum()
    }

    /// Probability of sampling `tier` directly.
    pub fn probability(&self, tier: RarityTier) -> f64 {
        f64::from(self.weight(tier)) / self.total() as f64
    }

    /// Pick one tier with probability proportional to its weight.
    ///
    /// `roll(bound)` must return a uniformly distributed value in `[0, bound)`;
    /// exactly one roll is consumed per call.
    pub fn pick(&self, roll: &mut impl FnMut(u64) -> u64) -> RarityTier {
        let mut remaining = roll(self.total());
        for tier in RarityTier::ALL {
            let weight = u64::from(self.weight(tier));
            if remaining < weight {
                return tier;
            }
            remaining -= weight;
        }
        // Only reachable when the roll is out of range.
        RarityTier::ALL
            .into_iter()
            .rev()
            .find(|tier| self.weight(*tier) > 0)
            .unwrap_or(RarityTier::Common)
    }
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            weights: [70, 20, 6, 3, 1],
        }
    }
}

impl fmt::Display for TierWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.weights.iter().map(|w| w.to_string()).collect();
        f.write_str(&parts.join(","))
    }
}

impl FromStr for TierWeights {
    type Err = DomainError;

    /// Accepts either five positional weights (`70,20,6,3,1`) or named pairs
    /// (`Common=1,Rare=0`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();

        if parts.iter().any(|p| p.contains('=')) {
            let mut pairs = Vec::with_capacity(parts.len());
            for part in parts {
                let (tier, weight) = part
                    .split_once('=')
                    .ok_or_else(|| DomainError::parse(format!("Expected tier=weight, got '{}'", part)))?;
                let tier: RarityTier = tier.parse()?;
                let weight = parse_weight(weight)?;
                pairs.push((tier, weight));
            }
            return Self::from_pairs(pairs);
        }

        if parts.len() != RarityTier::ALL.len() {
            return Err(DomainError::parse(format!(
                "Expected {} tier weights, got {}",
                RarityTier::ALL.len(),
                parts.len()
            )));
        }

        let mut weights = [0u32; 5];
        for (slot, part) in weights.iter_mut().zip(parts) {
            *slot = parse_weight(part)?;
        }
        Self::new(weights)
    }
}

fn parse_weight(raw: &str) -> Result<u32, DomainError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| DomainError::parse(format!("Invalid tier weight '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_collection_odds() {
        let weights = TierWeights::default();
        assert_eq!(weights.weight(RarityTier::Common), 70);
        assert_eq!(weights.weight(RarityTier::Mythical), 1);
        assert_eq!(weights.total(), 100);
        assert!((weights.probability(RarityTier::Rare) - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_all_zero_table() {
        assert!(TierWeights::new([0; 5]).is_err());
    }

    #[test]
    fn pick_maps_rolls_onto_cumulative_ranges() {
        let weights = TierWeights::default();
        let cases = [
            (0, RarityTier::Common),
            (69, RarityTier::Common),
            (70, RarityTier::Rare),
            (89, RarityTier::Rare),
            (90, RarityTier::Epic),
            (96, RarityTier::Legendary),
            (99, RarityTier::Mythical),
        ];
        for (value, expected) in cases {
            let mut roll = |bound: u64| {
                assert_eq!(bound, 100);
                value
            };
            assert_eq!(weights.pick(&mut roll), expected, "roll {}", value);
        }
    }

    #[test]
    fn zero_weight_tiers_are_never_picked() {
        let weights = TierWeights::from_pairs([(RarityTier::Common, 1), (RarityTier::Rare, 0)]).unwrap();
        assert_eq!(weights.total(), 1);
        let mut roll = |_bound: u64| 0;
        assert_eq!(weights.pick(&mut roll), RarityTier::Common);
    }

    #[test]
    fn out_of_range_roll_falls_to_rarest_weighted_tier() {
        let weights = TierWeights::from_pairs([(RarityTier::Common, 3), (RarityTier::Epic, 1)]).unwrap();
        let mut roll = |_bound: u64| 1_000;
        assert_eq!(weights.pick(&mut roll), RarityTier::Epic);
    }

    #[test]
    fn parses_positional_and_named_forms() {
        let positional: TierWeights = "70, 20, 6, 3, 1".parse().unwrap();
        assert_eq!(positional, TierWeights::default());
        assert_eq!(positional.to_string(), "70,20,6,3,1");

        let named: TierWeights = "Common=1,Rare=0".parse().unwrap();
        assert_eq!(named.weight(RarityTier::Common), 1);
        assert_eq!(named.weight(RarityTier::Legendary), 0);

        assert!("1,2,3".parse::<TierWeights>().is_err());
        assert!("Common=x".parse::<TierWeights>().is_err());
    }
}
