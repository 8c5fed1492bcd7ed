//! Catalog use cases.

use std::sync::Arc;

use traitmint_domain::TraitCatalog;

use crate::infrastructure::ports::{CatalogError, CatalogProvider, CatalogWriter};

/// Container for catalog use cases.
pub struct CatalogUseCases {
    pub augment: Arc<AugmentCatalog>,
}

impl CatalogUseCases {
    pub fn new(augment: Arc<AugmentCatalog>) -> Self {
        Self { augment }
    }
}

/// Merge an overlay catalog into a base catalog and write the result.
///
/// Overlay categories replace same-named base categories in place; new ones are
/// appended. Neither source is modified.
pub struct AugmentCatalog;

impl AugmentCatalog {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        base: &dyn CatalogProvider,
        overlay: &dyn CatalogProvider,
        output: &dyn CatalogWriter,
    ) -> Result<TraitCatalog, CatalogError> {
        let base = base.load().await?;
        let overlay = overlay.load().await?;
        let added: Vec<String> = overlay
            .categories()
            .filter(|(name, _)| base.category(name).is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        let merged = base.merge(overlay);
        output.save(&merged).await?;

        tracing::info!(
            categories = merged.len(),
            added = ?added,
            "Catalog augmented"
        );
        Ok(merged)
    }
}

impl Default for AugmentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::catalog_file::JsonFileCatalogProvider;
    use crate::infrastructure::ports::{MockCatalogProvider, MockCatalogWriter};
    use traitmint_domain::{CategoryTiers, RarityTier, TraitDescriptor};

    fn tiers(name: &str) -> CategoryTiers {
        CategoryTiers::new().with_tier(RarityTier::Common, vec![TraitDescriptor::new(name)])
    }

    fn provider(catalog: TraitCatalog) -> MockCatalogProvider {
        let mut provider = MockCatalogProvider::new();
        provider.expect_load().returning(move || Ok(catalog.clone()));
        provider
    }

    #[tokio::test]
    async fn overlay_categories_are_appended_or_replaced() {
        let base = provider(TraitCatalog::from_categories([
            ("HeadType", tiers("RoundHead")),
            ("EyesFace", tiers("Ghosted")),
        ]));
        let overlay = provider(TraitCatalog::from_categories([
            ("EyesFace", tiers("Laser")),
            ("CharacterColor", tiers("Black")),
        ]));
        let mut writer = MockCatalogWriter::new();
        writer.expect_save().times(1).returning(|_| Ok(()));

        let merged = AugmentCatalog::new()
            .execute(&base, &overlay, &writer)
            .await
            .unwrap();

        let names: Vec<&str> = merged.categories().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["HeadType", "EyesFace", "CharacterColor"]);
        let eyes = merged.category("EyesFace").unwrap();
        assert_eq!(eyes.traits(RarityTier::Common)[0].name, "Laser");
    }

    #[tokio::test]
    async fn missing_overlay_writes_nothing() {
        let base = provider(TraitCatalog::from_categories([("HeadType", tiers("RoundHead"))]));
        let mut overlay = MockCatalogProvider::new();
        overlay
            .expect_load()
            .returning(|| Err(CatalogError::not_found("overlay.json")));
        let mut writer = MockCatalogWriter::new();
        writer.expect_save().never();

        let err = AugmentCatalog::new()
            .execute(&base, &overlay, &writer)
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[tokio::test]
    async fn augmented_file_is_loadable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base_path = dir.path().join("base.json");
        let overlay_path = dir.path().join("overlay.json");
        let out_path = dir.path().join("augmented.json");
        tokio::fs::write(&base_path, r#"{"HeadType": {"Common": [{"name": "RoundHead"}]}}"#)
            .await
            .unwrap();
        tokio::fs::write(
            &overlay_path,
            r#"{"CharacterColor": {"Common": [{"name": "Black"}], "Mythical": [{"name": "Rainbow Pulse"}]}}"#,
        )
        .await
        .unwrap();

        let output = JsonFileCatalogProvider::new(&out_path);
        AugmentCatalog::new()
            .execute(
                &JsonFileCatalogProvider::new(&base_path),
                &JsonFileCatalogProvider::new(&overlay_path),
                &output,
            )
            .await
            .unwrap();

        let reloaded = output.load().await.unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.category("CharacterColor").unwrap().traits(RarityTier::Mythical)[0].name,
            "Rainbow Pulse"
        );
        let base_after = tokio::fs::read_to_string(&base_path).await.unwrap();
        assert!(!base_after.contains("CharacterColor"));
    }
}
