//! Error types for port operations.

/// Trait catalog loading and saving errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog source does not exist.
    #[error("Trait catalog not found: {path}")]
    NotFound { path: String },

    /// The catalog exists but is not a valid trait catalog.
    #[error("Trait catalog {path} is malformed: {message}")]
    Malformed { path: String, message: String },

    /// Reading or writing the catalog failed for another reason.
    #[error("Trait catalog I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

impl CatalogError {
    pub fn not_found(path: impl ToString) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }

    pub fn malformed(path: impl ToString, message: impl ToString) -> Self {
        Self::Malformed {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl ToString, message: impl ToString) -> Self {
        Self::Io {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

/// Character store errors with context for debugging.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// No record exists for the id.
    #[error("Character not found: {id}")]
    NotFound { id: String },

    /// The backing store could not be reached or the operation failed.
    #[error("Store unavailable in {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    /// A stored record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Create a NotFound error for a character id.
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Create an Unavailable error with operation context.
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::Unavailable {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AssetPipelineError {
    #[error("Asset pipeline unavailable")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_helpers_carry_context() {
        let err = StoreError::unavailable("create", "disk I/O error");
        assert_eq!(err.to_string(), "Store unavailable in create: disk I/O error");
        assert!(!err.is_not_found());
        assert!(StoreError::not_found(7).is_not_found());
    }

    #[test]
    fn catalog_error_messages_name_the_path() {
        let err = CatalogError::malformed("traits/catalog.json", "expected an object");
        assert_eq!(
            err.to_string(),
            "Trait catalog traits/catalog.json is malformed: expected an object"
        );
    }
}
