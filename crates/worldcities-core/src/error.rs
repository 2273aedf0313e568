// crates/worldcities-core/src/error.rs
use crate::model::EntityKind;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Every failure the store can report.
///
/// The first three variants are the domain errors callers are expected to
/// branch on. The rest come from snapshot and seed I/O.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or malformed.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// No record of the given kind has this id.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u32 },

    /// A referential-integrity or uniqueness rule would be broken.
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// The snapshot or seed file is structurally unusable.
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl StoreError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: EntityKind, id: u32) -> Self {
        StoreError::NotFound { kind, id }
    }

    /// True for [`StoreError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }

    /// True for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// True for [`StoreError::Constraint`].
    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint(_))
    }
}
