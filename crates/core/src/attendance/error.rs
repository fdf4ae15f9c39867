//! Attendance ledger error types.

use thiserror::Error;

/// Failures of the ledger store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The store could not be reached or the statement failed.
    #[error("ledger store unavailable: {0}")]
    Unavailable(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Outcomes of a create that did not record an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateError {
    /// The request is malformed or references an unknown employee.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Recording the entry would drive the balance below zero.
    ///
    /// This is an expected business outcome, not a fault.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The store failed.
    #[error("store failure: {0}")]
    StoreFailure(String),
}

impl From<LedgerError> for CreateError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(what) => Self::ValidationFailed(format!("unknown {what}")),
            LedgerError::Unavailable(detail) => Self::StoreFailure(detail),
        }
    }
}
