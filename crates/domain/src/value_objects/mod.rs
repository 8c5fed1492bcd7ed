//! Value objects - immutable types compared by value.

mod rarity;
mod rarity_tier;
mod signature;
mod tier_weights;
mod token_metadata;

pub use rarity::{RarityReport, RaritySummary};
pub use rarity_tier::RarityTier;
pub use signature::TraitSignature;
pub use tier_weights::TierWeights;
pub use token_metadata::{AttributeValue, TokenAttribute, TokenMetadata};
