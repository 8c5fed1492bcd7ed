//! Infrastructure layer - ports and their adapters.

pub mod catalog_file;
pub mod clock;
pub mod mint_config;
pub mod persistence;
pub mod ports;
