//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Trait catalog source (could swap JSON file -> remote registry)
//! - Character store (in-memory, SQLite, or a document database)
//! - Asset pipeline (artwork rendering and upload)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::{AssetPipelineError, CatalogError, StoreError};
pub use external::AssetPipelinePort;
pub use repos::{CatalogProvider, CatalogWriter, CharacterStore, CreateOutcome};
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use external::MockAssetPipelinePort;
#[cfg(test)]
pub use repos::{MockCatalogProvider, MockCatalogWriter, MockCharacterStore};
#[cfg(test)]
pub use testing::MockRandomPort;
