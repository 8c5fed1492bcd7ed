//! Show character use case - a stored record with its token metadata.

use std::sync::Arc;

use serde::Serialize;
use traitmint_domain::{CharacterId, CharacterMetadata, TokenMetadata};

use crate::infrastructure::ports::{CharacterStore, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterView {
    pub record: CharacterMetadata,
    pub token: TokenMetadata,
}

pub struct ShowCharacter {
    store: Arc<dyn CharacterStore>,
    collection_name: String,
}

impl ShowCharacter {
    pub fn new(store: Arc<dyn CharacterStore>, collection_name: impl Into<String>) -> Self {
        Self {
            store,
            collection_name: collection_name.into(),
        }
    }

    pub async fn execute(&self, id: CharacterId) -> Result<Option<CharacterView>, StoreError> {
        let Some(record) = self.store.get(id).await? else {
            return Ok(None);
        };
        let token = TokenMetadata::from_character(&record, &self.collection_name);
        Ok(Some(CharacterView { record, token }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCharacterStore;
    use mockall::predicate::*;
    use traitmint_domain::{CharacterPatch, CharacterTraits, RarityTier, SelectedTrait, TraitDescriptor};

    #[tokio::test]
    async fn builds_token_metadata_for_stored_record() {
        let traits = CharacterTraits::from_selections([(
            "HeadType",
            SelectedTrait::new(RarityTier::Legendary, TraitDescriptor::new("Vertical Crown")),
        )]);
        let mut record = CharacterMetadata::new(CharacterId::new(42), traits, None);
        record.apply_patch(&CharacterPatch::asset_url("ipfs://bafy/42.png"));

        let mut store = MockCharacterStore::new();
        let stored = record.clone();
        store
            .expect_get()
            .with(eq(CharacterId::new(42)))
            .returning(move |_| Ok(Some(stored.clone())));

        let view = ShowCharacter::new(Arc::new(store), "Vertical")
            .execute(CharacterId::new(42))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(view.record, record);
        assert_eq!(view.token.name, "Vertical #42");
        assert_eq!(view.token.image.as_deref(), Some("ipfs://bafy/42.png"));
    }

    #[tokio::test]
    async fn missing_record_is_none() {
        let mut store = MockCharacterStore::new();
        store.expect_get().returning(|_| Ok(None));

        let view = ShowCharacter::new(Arc::new(store), "Vertical")
            .execute(CharacterId::new(1))
            .await
            .unwrap();

        assert!(view.is_none());
    }
}
