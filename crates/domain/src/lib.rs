//! traitmint Domain - trait catalogs, rarity tiers, character composition and
//! duplicate rules.
//!
//! This crate is pure: no I/O and no random number generator. Composition takes
//! an injected `roll(bound)` closure so callers own the random source.

pub mod entities;
pub mod error;
pub mod generation;
pub mod ids;
pub mod value_objects;

pub use entities::{
    CategorySummary, CategoryTiers, CharacterMetadata, CharacterPatch, CharacterTraits, FlatTrait,
    SelectedTrait, TraitCatalog, TraitDescriptor,
};

pub use error::DomainError;

pub use generation::{CharacterComposer, TierSampler};

pub use ids::CharacterId;

pub use value_objects::{
    AttributeValue, RarityReport, RaritySummary, RarityTier, TierWeights, TokenAttribute,
    TokenMetadata, TraitSignature,
};
