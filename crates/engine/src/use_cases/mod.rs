//! Use cases - one struct per operation, grouped by area.

pub mod catalog;
pub mod minting;

pub use catalog::{AugmentCatalog, CatalogUseCases};
pub use minting::MintingUseCases;
