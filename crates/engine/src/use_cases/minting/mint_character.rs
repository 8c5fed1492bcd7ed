//! Mint character use case - compose, score, check and persist one character.

use std::sync::Arc;

use serde::Serialize;
use traitmint_domain::{CharacterComposer, CharacterId, CharacterMetadata, CharacterPatch, TraitCatalog};

use super::random_source::RandomSource;
use crate::infrastructure::mint_config::DuplicatePolicy;
use crate::infrastructure::ports::{
    AssetPipelinePort, CharacterStore, CreateOutcome, RandomPort, StoreError,
};

/// Where a mint attempt was when the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MintStage {
    /// Checking id and trait uniqueness against stored records.
    Checking,
    /// Writing the record.
    Persisting,
}

impl std::fmt::Display for MintStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MintStage::Checking => write!(f, "checking"),
            MintStage::Persisting => write!(f, "persisting"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MintFailureKind {
    DuplicateId,
    DuplicateTraits,
    StoreUnavailable,
}

impl std::fmt::Display for MintFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MintFailureKind::DuplicateId => write!(f, "DUPLICATE_ID"),
            MintFailureKind::DuplicateTraits => write!(f, "DUPLICATE_TRAITS"),
            MintFailureKind::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
        }
    }
}

/// A mint that wrote nothing.
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    #[error("Character {id} already exists")]
    DuplicateId { id: CharacterId },

    #[error("Character {id} repeats the traits of a stored character")]
    DuplicateTraits { id: CharacterId },

    #[error("Store unavailable while {stage} character {id}: {source}")]
    StoreUnavailable {
        id: CharacterId,
        stage: MintStage,
        #[source]
        source: StoreError,
    },
}

impl MintError {
    pub fn kind(&self) -> MintFailureKind {
        match self {
            MintError::DuplicateId { .. } => MintFailureKind::DuplicateId,
            MintError::DuplicateTraits { .. } => MintFailureKind::DuplicateTraits,
            MintError::StoreUnavailable { .. } => MintFailureKind::StoreUnavailable,
        }
    }

    pub fn id(&self) -> CharacterId {
        match self {
            MintError::DuplicateId { id }
            | MintError::DuplicateTraits { id }
            | MintError::StoreUnavailable { id, .. } => *id,
        }
    }

    /// Duplicates are resolved by the caller (new id or new seed); store
    /// outages are surfaced as-is.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MintError::StoreUnavailable { .. })
    }

    fn store(id: CharacterId, stage: MintStage, source: StoreError) -> Self {
        MintError::StoreUnavailable { id, stage, source }
    }
}

/// Mints one character under a caller-chosen id.
///
/// Attempt states: composed, scored, persisting, then minted or rejected.
/// The store's atomic create is the authority on id uniqueness; trait
/// uniqueness is checked against stored signatures before the write and is
/// only race-free when the store also enforces unique signatures.
pub struct MintCharacter {
    catalog: Arc<TraitCatalog>,
    composer: CharacterComposer,
    store: Arc<dyn CharacterStore>,
    random: Arc<dyn RandomPort>,
    policy: DuplicatePolicy,
    asset_pipeline: Option<Arc<dyn AssetPipelinePort>>,
}

impl MintCharacter {
    pub fn new(
        catalog: Arc<TraitCatalog>,
        composer: CharacterComposer,
        store: Arc<dyn CharacterStore>,
        random: Arc<dyn RandomPort>,
        policy: DuplicatePolicy,
    ) -> Self {
        Self {
            catalog,
            composer,
            store,
            random,
            policy,
            asset_pipeline: None,
        }
    }

    /// Hand every minted record to `pipeline` and attach the URL it returns.
    pub fn with_asset_pipeline(mut self, pipeline: Arc<dyn AssetPipelinePort>) -> Self {
        self.asset_pipeline = Some(pipeline);
        self
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Mint character `id`. With `seed` the composed traits are reproducible;
    /// without one a fresh seed is drawn and not recorded.
    pub async fn execute(
        &self,
        id: CharacterId,
        seed: Option<u64>,
    ) -> Result<CharacterMetadata, MintError> {
        let mut source = RandomSource::seeded(seed.unwrap_or_else(|| self.random.next_seed()));

        let traits = self
            .composer
            .compose(&self.catalog, &mut |bound| source.below(bound));
        tracing::debug!(
            character_id = %id,
            seed = ?seed,
            categories = traits.len(),
            "Character composed"
        );
        if traits.len() < self.catalog.len() {
            tracing::debug!(
                character_id = %id,
                selected = traits.len(),
                categories = self.catalog.len(),
                "Degenerate character: some categories had no traits"
            );
        }

        let record = CharacterMetadata::new(id, traits, seed);
        tracing::debug!(
            character_id = %id,
            rarity_score = record.rarity_score(),
            "Character scored"
        );

        if self
            .store
            .exists(id)
            .await
            .map_err(|e| MintError::store(id, MintStage::Checking, e))?
        {
            tracing::warn!(character_id = %id, "Mint rejected: id already minted");
            return Err(MintError::DuplicateId { id });
        }

        if self.policy == DuplicatePolicy::Reject {
            let stored = self
                .store
                .list_signatures()
                .await
                .map_err(|e| MintError::store(id, MintStage::Checking, e))?;
            if record.signature().duplicates_any(&stored) {
                tracing::warn!(character_id = %id, seed = ?seed, "Mint rejected: duplicate traits");
                return Err(MintError::DuplicateTraits { id });
            }
        }

        tracing::debug!(character_id = %id, "Persisting character");
        let minted_at = match self
            .store
            .create(&record)
            .await
            .map_err(|e| MintError::store(id, MintStage::Persisting, e))?
        {
            CreateOutcome::Created { minted_at } => minted_at,
            CreateOutcome::IdTaken => {
                tracing::warn!(character_id = %id, "Mint rejected: id taken during write");
                return Err(MintError::DuplicateId { id });
            }
            CreateOutcome::SignatureTaken => {
                tracing::warn!(character_id = %id, "Mint rejected: store refused duplicate traits");
                return Err(MintError::DuplicateTraits { id });
            }
        };

        let mut minted = record.stamped(minted_at);
        tracing::info!(
            character_id = %id,
            rarity_score = minted.rarity_score(),
            minted_at = %minted_at,
            "Character minted"
        );

        if let Some(pipeline) = &self.asset_pipeline {
            self.hand_off(pipeline.as_ref(), &mut minted).await;
        }

        Ok(minted)
    }

    /// Render and attach artwork. Failures are logged; the mint stands.
    async fn hand_off(&self, pipeline: &dyn AssetPipelinePort, minted: &mut CharacterMetadata) {
        let id = minted.id();
        let url = match pipeline.render(minted).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(character_id = %id, error = %e, "Asset pipeline failed; character left without asset");
                return;
            }
        };

        let patch = CharacterPatch::asset_url(url);
        match self.store.patch(id, &patch).await {
            Ok(()) => {
                minted.apply_patch(&patch);
                tracing::info!(character_id = %id, "Asset attached");
            }
            Err(e) => {
                tracing::warn!(character_id = %id, error = %e, "Failed to attach rendered asset");
            }
        }
    }
}
