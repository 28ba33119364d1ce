//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::record::Collection;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A record was not found.
    #[error("{collection} record not found: {id}")]
    NotFound {
        /// The collection that was searched.
        collection: Collection,
        /// The missing record identifier.
        id: Uuid,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a `NotFound` error.
    #[must_use]
    pub fn not_found(collection: Collection, id: Uuid) -> Self {
        Self::NotFound { collection, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_collection() {
        let id = Uuid::nil();
        let err = DomainError::not_found(Collection::Sessions, id);
        assert_eq!(
            err.to_string(),
            "sessions record not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_validation_message() {
        let err = DomainError::Validation("name must not be empty".into());
        assert_eq!(err.to_string(), "validation error: name must not be empty");
    }
}
