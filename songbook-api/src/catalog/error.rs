//! Catalog error taxonomy

use thiserror::Error;

use crate::enrichment::EnrichmentError;

/// Outcome of a failed catalog operation
///
/// Caller errors are raised before storage or the metadata source is touched.
/// Not-found is an outcome in its own right, not a fault.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or malformed caller-supplied value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Empty listing or zero rows affected
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write would violate a uniqueness constraint
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Query, exec or scan failure
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// External metadata source failure during create
    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),
}

impl CatalogError {
    /// Classify a write failure, turning unique violations into `Conflict`
    pub(crate) fn from_write(err: sqlx::Error, conflict: impl FnOnce() -> String) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                CatalogError::Conflict(conflict())
            }
            _ => CatalogError::Storage(err),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
