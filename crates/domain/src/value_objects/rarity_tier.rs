//! Rarity tiers that group traits inside a catalog category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Rarity bucket of a trait.
///
/// Declaration order is the fallback priority order used when a sampled tier
/// has no traits for a category, and also the ordering used by summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityTier {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythical,
}

impl RarityTier {
    /// All tiers in fallback priority order.
    pub const ALL: [RarityTier; 5] = [
        RarityTier::Common,
        RarityTier::Rare,
        RarityTier::Epic,
        RarityTier::Legendary,
        RarityTier::Mythical,
    ];

    /// Contribution of a trait of this tier to the rarity score, in `[0, 1]`.
    pub fn score_weight(self) -> f64 {
        match self {
            RarityTier::Common => 0.0,
            RarityTier::Rare => 0.25,
            RarityTier::Epic => 0.5,
            RarityTier::Legendary => 0.75,
            RarityTier::Mythical => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
            RarityTier::Mythical => "Mythical",
        }
    }

    /// Position in [`RarityTier::ALL`].
    pub fn index(self) -> usize {
        match self {
            RarityTier::Common => 0,
            RarityTier::Rare => 1,
            RarityTier::Epic => 2,
            RarityTier::Legendary => 3,
            RarityTier::Mythical => 4,
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RarityTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(RarityTier::Common),
            "rare" => Ok(RarityTier::Rare),
            "epic" => Ok(RarityTier::Epic),
            "legendary" => Ok(RarityTier::Legendary),
            "mythical" | "mythic" => Ok(RarityTier::Mythical),
            _ => Err(DomainError::parse(format!("Unknown rarity tier: {}", s))),
        }
    }
}
