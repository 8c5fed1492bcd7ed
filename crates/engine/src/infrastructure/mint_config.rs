//! Minting configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `TRAITMINT_CATALOG` | `traits/catalog.json` |
//! | `TRAITMINT_STORE` | `sqlite` (`memory` for a throwaway store) |
//! | `TRAITMINT_DB` | `traitmint.db` |
//! | `TRAITMINT_DUPLICATE_POLICY` | `reject` |
//! | `TRAITMINT_UNIQUE_SIGNATURES` | `true` |
//! | `TRAITMINT_TIER_WEIGHTS` | `70,20,6,3,1` |
//! | `TRAITMINT_COLLECTION` | `Vertical` |

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use traitmint_domain::TierWeights;

// ============================================================================
// Duplicate Policy
// ============================================================================

/// What to do when a freshly composed character repeats stored traits.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Refuse the mint with `DuplicateTraits`.
    #[default]
    Reject,
    /// Mint anyway; only ids must be unique.
    Allow,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::Reject => write!(f, "reject"),
            DuplicatePolicy::Allow => write!(f, "allow"),
        }
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" | "reject_duplicates" | "unique" | "on" => Ok(DuplicatePolicy::Reject),
            "allow" | "allow_duplicates" | "off" => Ok(DuplicatePolicy::Allow),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Store Backend
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process-local store; nothing survives the run.
    Memory,
    #[default]
    Sqlite,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in_memory" | "inmemory" | "mem" => Ok(StoreBackend::Memory),
            "sqlite" | "sqlite3" | "db" => Ok(StoreBackend::Sqlite),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Mint Config
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid value for {key}: {message}")]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl ToString) -> Self {
        Self {
            key,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintConfig {
    pub catalog_path: PathBuf,
    pub store: StoreBackend,
    pub db_path: String,
    pub duplicate_policy: DuplicatePolicy,
    /// Enforce signature uniqueness in the store as well as in the use case.
    pub unique_signatures: bool,
    pub tier_weights: TierWeights,
    pub collection_name: String,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("traits/catalog.json"),
            store: StoreBackend::default(),
            db_path: "traitmint.db".to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            unique_signatures: true,
            tier_weights: TierWeights::default(),
            collection_name: "Vertical".to_string(),
        }
    }
}

impl MintConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store = match var("TRAITMINT_STORE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid("TRAITMINT_STORE", format!("unknown backend '{}'", raw)))?,
            None => defaults.store,
        };

        let duplicate_policy = match var("TRAITMINT_DUPLICATE_POLICY") {
            Some(raw) => raw.parse().map_err(|_| {
                ConfigError::invalid("TRAITMINT_DUPLICATE_POLICY", format!("unknown policy '{}'", raw))
            })?,
            None => defaults.duplicate_policy,
        };

        let unique_signatures = match var("TRAITMINT_UNIQUE_SIGNATURES") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ConfigError::invalid("TRAITMINT_UNIQUE_SIGNATURES", format!("expected true/false, got '{}'", raw))
            })?,
            None => defaults.unique_signatures,
        };

        let tier_weights = match var("TRAITMINT_TIER_WEIGHTS") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid("TRAITMINT_TIER_WEIGHTS", e))?,
            None => defaults.tier_weights,
        };

        Ok(Self {
            catalog_path: var("TRAITMINT_CATALOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            store,
            db_path: var("TRAITMINT_DB").unwrap_or(defaults.db_path),
            duplicate_policy,
            unique_signatures,
            tier_weights,
            collection_name: var("TRAITMINT_COLLECTION").unwrap_or(defaults.collection_name),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use traitmint_domain::RarityTier;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn unset_environment_yields_defaults() {
        let config = MintConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, MintConfig::default());
        assert_eq!(config.tier_weights.to_string(), "70,20,6,3,1");
    }

    #[test]
    fn reads_every_variable() {
        let config = MintConfig::from_lookup(lookup(&[
            ("TRAITMINT_CATALOG", "data/verticals.json"),
            ("TRAITMINT_STORE", "memory"),
            ("TRAITMINT_DB", "/tmp/mint.db"),
            ("TRAITMINT_DUPLICATE_POLICY", "allow"),
            ("TRAITMINT_UNIQUE_SIGNATURES", "no"),
            ("TRAITMINT_TIER_WEIGHTS", "1,0,0,0,0"),
            ("TRAITMINT_COLLECTION", "Test Set"),
        ]))
        .unwrap();

        assert_eq!(config.catalog_path, PathBuf::from("data/verticals.json"));
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.db_path, "/tmp/mint.db");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Allow);
        assert!(!config.unique_signatures);
        assert_eq!(config.tier_weights.weight(RarityTier::Common), 1);
        assert_eq!(config.tier_weights.weight(RarityTier::Rare), 0);
        assert_eq!(config.collection_name, "Test Set");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = MintConfig::from_lookup(lookup(&[("TRAITMINT_DB", "  ")])).unwrap();
        assert_eq!(config.db_path, "traitmint.db");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = MintConfig::from_lookup(lookup(&[("TRAITMINT_STORE", "redis")])).unwrap_err();
        assert_eq!(err.key, "TRAITMINT_STORE");

        let err = MintConfig::from_lookup(lookup(&[("TRAITMINT_TIER_WEIGHTS", "0,0,0,0,0")])).unwrap_err();
        assert_eq!(err.key, "TRAITMINT_TIER_WEIGHTS");

        let err = MintConfig::from_lookup(lookup(&[("TRAITMINT_UNIQUE_SIGNATURES", "maybe")])).unwrap_err();
        assert_eq!(err.key, "TRAITMINT_UNIQUE_SIGNATURES");
    }

    #[test]
    fn policies_parse_several_spellings_and_display_snake_case() {
        assert_eq!("REJECT".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::Reject));
        assert_eq!("allow_duplicates".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::Allow));
        assert!("sometimes".parse::<DuplicatePolicy>().is_err());
        assert_eq!(DuplicatePolicy::Allow.to_string(), "allow");

        assert_eq!(" InMemory ".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!(StoreBackend::Sqlite.to_string(), "sqlite");
    }
}
