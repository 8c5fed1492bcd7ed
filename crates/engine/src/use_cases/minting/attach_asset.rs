//! Attach asset use case - record the artwork URL of a minted character.

use std::sync::Arc;

use traitmint_domain::{CharacterId, CharacterPatch};

use crate::infrastructure::ports::{CharacterStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum AttachAssetError {
    #[error("Asset URL cannot be empty")]
    EmptyUrl,
    #[error("Character not found: {id}")]
    NotFound { id: CharacterId },
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

/// Patch an already-minted record with its asset URL.
pub struct AttachAssetUrl {
    store: Arc<dyn CharacterStore>,
}

impl AttachAssetUrl {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, id: CharacterId, url: &str) -> Result<(), AttachAssetError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AttachAssetError::EmptyUrl);
        }

        self.store
            .patch(id, &CharacterPatch::asset_url(url))
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => AttachAssetError::NotFound { id },
                other => AttachAssetError::StoreUnavailable(other),
            })?;

        tracing::info!(character_id = %id, asset_url = %url, "Asset URL attached");
        Ok(())
    }
}
