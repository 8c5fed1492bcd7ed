//! Application state and composition.

use std::sync::Arc;

use traitmint_domain::{CharacterComposer, TierSampler, TraitCatalog};

use crate::infrastructure::{
    catalog_file::JsonFileCatalogProvider,
    clock::{SystemClock, SystemRandom},
    mint_config::{MintConfig, StoreBackend},
    persistence::{InMemoryCharacterStore, SqliteCharacterStore},
    ports::{CatalogError, CatalogProvider, CharacterStore, ClockPort, RandomPort, StoreError},
};
use crate::use_cases::{
    catalog::{AugmentCatalog, CatalogUseCases},
    minting::{
        AttachAssetUrl, MintBatch, MintCharacter, MintingUseCases, PreviewCharacter, ShowCharacter,
    },
};

/// Startup failures. Any of these aborts before a single character is composed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Main application state.
///
/// Holds the loaded catalog, the character store and all use cases.
pub struct App {
    pub catalog: Arc<TraitCatalog>,
    pub store: Arc<dyn CharacterStore>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub minting: MintingUseCases,
    pub catalog: CatalogUseCases,
}

impl App {
    /// Wire use cases around an already-loaded catalog and store.
    pub fn new(
        catalog: TraitCatalog,
        store: Arc<dyn CharacterStore>,
        random: Arc<dyn RandomPort>,
        config: &MintConfig,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let composer = CharacterComposer::new(TierSampler::new(config.tier_weights));

        let mint = Arc::new(MintCharacter::new(
            catalog.clone(),
            composer,
            store.clone(),
            random.clone(),
            config.duplicate_policy,
        ));

        let minting = MintingUseCases::new(
            mint.clone(),
            Arc::new(MintBatch::new(mint)),
            Arc::new(PreviewCharacter::new(catalog.clone(), composer, random)),
            Arc::new(AttachAssetUrl::new(store.clone())),
            Arc::new(ShowCharacter::new(store.clone(), config.collection_name.clone())),
        );

        Self {
            catalog,
            store,
            use_cases: UseCases {
                minting,
                catalog: CatalogUseCases::new(Arc::new(AugmentCatalog::new())),
            },
        }
    }

    /// Load the catalog and open the configured store.
    pub async fn from_config(config: &MintConfig) -> Result<Self, AppError> {
        let catalog = JsonFileCatalogProvider::new(&config.catalog_path).load().await?;
        tracing::info!(
            path = %config.catalog_path.display(),
            categories = catalog.len(),
            weights = %config.tier_weights,
            "Trait catalog loaded"
        );

        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let store: Arc<dyn CharacterStore> = match config.store {
            StoreBackend::Memory => Arc::new(
                InMemoryCharacterStore::new(clock).with_unique_signatures(config.unique_signatures),
            ),
            StoreBackend::Sqlite => {
                tracing::info!(db = %config.db_path, "Opening SQLite character store");
                Arc::new(
                    SqliteCharacterStore::new(&config.db_path, clock, config.unique_signatures)
                        .await?,
                )
            }
        };

        Ok(Self::new(catalog, store, Arc::new(SystemRandom::new()), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mint_config::DuplicatePolicy;
    use traitmint_domain::CharacterId;

    const CATALOG: &str = r#"{
        "HeadType": {"Common": [{"name": "RoundHead"}]},
        "EyesFace": {"Common": [{"name": "Ghosted"}]}
    }"#;

    #[tokio::test]
    async fn composes_from_config_with_sqlite_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog_path = dir.path().join("catalog.json");
        tokio::fs::write(&catalog_path, CATALOG).await.unwrap();
        let config = MintConfig {
            catalog_path,
            db_path: dir.path().join("mint.db").to_string_lossy().into_owned(),
            ..MintConfig::default()
        };

        let app = App::from_config(&config).await.unwrap();
        let record = app
            .use_cases
            .minting
            .mint
            .execute(CharacterId::new(1), Some(3))
            .await
            .unwrap();

        assert_eq!(record.traits().len(), 2);
        assert_eq!(app.use_cases.minting.mint.policy(), DuplicatePolicy::Reject);
        let view = app.use_cases.minting.show.execute(CharacterId::new(1)).await.unwrap().unwrap();
        assert_eq!(view.token.name, "Vertical #1");
    }

    #[tokio::test]
    async fn missing_catalog_aborts_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = MintConfig {
            catalog_path: dir.path().join("nope.json"),
            store: StoreBackend::Memory,
            ..MintConfig::default()
        };

        let err = App::from_config(&config).await.err().unwrap();

        assert!(matches!(err, AppError::Catalog(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn memory_store_enforces_unique_signatures_when_configured() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog_path = dir.path().join("catalog.json");
        tokio::fs::write(&catalog_path, CATALOG).await.unwrap();
        let config = MintConfig {
            catalog_path,
            store: StoreBackend::Memory,
            duplicate_policy: DuplicatePolicy::Allow,
            unique_signatures: true,
            ..MintConfig::default()
        };

        let app = App::from_config(&config).await.unwrap();
        let mint = &app.use_cases.minting.mint;
        mint.execute(CharacterId::new(1), None).await.unwrap();
        let err = mint.execute(CharacterId::new(2), None).await.unwrap_err();

        assert_eq!(err.kind(), crate::use_cases::minting::MintFailureKind::DuplicateTraits);
    }
}
