//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier.
    ///
    /// Identifiers are opaque server-assigned tokens, so `Clone + Eq + Hash`
    /// rather than `Copy`.
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Display + Send + Sync;

    /// Returns a reference to the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Structural errors (`DuplicateId`, `IndexOutOfRange`) are rejected at the
/// call site before any state changes. `Persistence` failures are recovered
/// by rollback; nothing here is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    /// Insertion of an id already present in the collection
    DuplicateId(String),
    /// Positional operation outside `[0, len)`
    IndexOutOfRange { index: usize, len: usize },
    NotFound(String),
    InvalidInput(String),
    /// Remote call failed or was rejected
    Persistence(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::DuplicateId(id) => write!(f, "Duplicate id: {}", id),
            DomainError::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for length {}", index, len)
            }
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Persistence(msg) => write!(f, "Persistence failed: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
