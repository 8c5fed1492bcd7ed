//! In-memory character store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use traitmint_domain::{CharacterId, CharacterMetadata, CharacterPatch, TraitSignature};

use crate::infrastructure::ports::{CharacterStore, ClockPort, CreateOutcome, StoreError};

/// Character store backed by a `HashMap` behind a single `RwLock`.
///
/// `create` checks and inserts under one write guard, so concurrent creates for
/// the same id are serialized and only the first succeeds.
pub struct InMemoryCharacterStore {
    records: RwLock<HashMap<CharacterId, CharacterMetadata>>,
    clock: Arc<dyn ClockPort>,
    unique_signatures: bool,
}

impl InMemoryCharacterStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            clock,
            unique_signatures: false,
        }
    }

    /// Reject creates whose signature matches a stored record.
    pub fn with_unique_signatures(mut self, enabled: bool) -> Self {
        self.unique_signatures = enabled;
        self
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CharacterStore for InMemoryCharacterStore {
    async fn exists(&self, id: CharacterId) -> Result<bool, StoreError> {
        Ok(self.records.read().await.contains_key(&id))
    }

    async fn create(&self, record: &CharacterMetadata) -> Result<CreateOutcome, StoreError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.id()) {
            return Ok(CreateOutcome::IdTaken);
        }
        if self.unique_signatures {
            let signature = record.signature();
            if records.values().any(|stored| stored.signature() == signature) {
                return Ok(CreateOutcome::SignatureTaken);
            }
        }

        let minted_at = self.clock.now();
        records.insert(record.id(), record.clone().stamped(minted_at));
        Ok(CreateOutcome::Created { minted_at })
    }

    async fn patch(&self, id: CharacterId, patch: &CharacterPatch) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| StoreError::not_found(id))?;
        record.apply_patch(patch);
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<CharacterMetadata>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_signatures(&self) -> Result<Vec<TraitSignature>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .map(CharacterMetadata::signature)
            .collect())
    }
}
