//! Domain entities.

mod catalog;
mod character;

pub use catalog::{CategorySummary, CategoryTiers, FlatTrait, TraitCatalog, TraitDescriptor};
pub use character::{CharacterMetadata, CharacterPatch, CharacterTraits, SelectedTrait};
