//! Storage port traits for the trait catalog and minted characters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use traitmint_domain::{CharacterId, CharacterMetadata, CharacterPatch, TraitCatalog, TraitSignature};

use super::error::{CatalogError, StoreError};

// =============================================================================
// Trait Catalog
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn load(&self) -> Result<TraitCatalog, CatalogError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogWriter: Send + Sync {
    async fn save(&self, catalog: &TraitCatalog) -> Result<(), CatalogError>;
}

// =============================================================================
// Character Store
// =============================================================================

/// Result of an atomic create-if-absent.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The record was written; `minted_at` is the store-assigned timestamp.
    Created { minted_at: DateTime<Utc> },
    /// A record with the same id already exists. Nothing was written.
    IdTaken,
    /// The store enforces unique signatures and one already matches. Nothing was written.
    SignatureTaken,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn exists(&self, id: CharacterId) -> Result<bool, StoreError>;

    /// Write `record` only if no record with its id exists.
    ///
    /// Two concurrent creates for one id must yield exactly one `Created`.
    async fn create(&self, record: &CharacterMetadata) -> Result<CreateOutcome, StoreError>;

    /// Merge `patch` into an existing record. `StoreError::NotFound` if absent.
    async fn patch(&self, id: CharacterId, patch: &CharacterPatch) -> Result<(), StoreError>;

    async fn get(&self, id: CharacterId) -> Result<Option<CharacterMetadata>, StoreError>;

    /// Signatures of every stored record.
    async fn list_signatures(&self) -> Result<Vec<TraitSignature>, StoreError>;
}
