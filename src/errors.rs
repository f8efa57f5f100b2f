//! Error types for allocation planning

use thiserror::Error;

use crate::domain::{CatalogError, NetworkError, ValidationError};

/// Errors that can occur while planning or executing an allocation
#[derive(Debug, Error)]
pub enum AllocationError {
    /// A network token or block size was rejected
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The VLAN catalog is inconsistent
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A request or plan broke an allocation invariant
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The inventory store refused or failed a create
    #[error("Inventory error: {0}")]
    Inventory(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for allocation operations
pub type AllocationResult<T> = Result<T, AllocationError>;

impl From<serde_json::Error> for AllocationError {
    fn from(err: serde_json::Error) -> Self {
        AllocationError::Serialization(err.to_string())
    }
}
