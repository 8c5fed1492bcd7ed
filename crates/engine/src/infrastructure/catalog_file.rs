//! JSON file trait catalog.
//!
//! The file is one object keyed by category, each category an object keyed by
//! tier name holding a list of traits:
//!
//! ```json
//! { "HeadType": { "Common": [{ "name": "RoundHead", "description": "..." }], "Rare": [] } }
//! ```
//!
//! Category order in the file is the composition order.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use traitmint_domain::TraitCatalog;

use crate::infrastructure::ports::{CatalogError, CatalogProvider, CatalogWriter};

/// Trait catalog stored as a JSON file.
pub struct JsonFileCatalogProvider {
    path: PathBuf,
}

impl JsonFileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalogProvider {
    async fn load(&self) -> Result<TraitCatalog, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => CatalogError::not_found(self.display_path()),
                ErrorKind::InvalidData => CatalogError::malformed(self.display_path(), e),
                _ => CatalogError::io(self.display_path(), e),
            })?;

        let catalog: TraitCatalog = serde_json::from_str(&raw)
            .map_err(|e| CatalogError::malformed(self.display_path(), e))?;
        catalog
            .validate()
            .map_err(|e| CatalogError::malformed(self.display_path(), e))?;

        for category in catalog.degenerate_categories() {
            tracing::warn!(
                path = %self.path.display(),
                category = %category,
                "Catalog category has no traits in any tier; it will be skipped"
            );
        }

        tracing::debug!(
            path = %self.path.display(),
            categories = catalog.len(),
            "Loaded trait catalog"
        );

        Ok(catalog)
    }
}

#[async_trait]
impl CatalogWriter for JsonFileCatalogProvider {
    async fn save(&self, catalog: &TraitCatalog) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(catalog)
            .map_err(|e| CatalogError::malformed(self.display_path(), e))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| CatalogError::io(self.display_path(), e))?;

        tracing::info!(
            path = %self.path.display(),
            categories = catalog.len(),
            "Wrote trait catalog"
        );
        Ok(())
    }
}
