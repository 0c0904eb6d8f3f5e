use thiserror::Error;

use crate::query::TxHash;

/// A failure reported by a chain query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Network hiccups and the like; the poll loops retry these.
    #[error("Transient query failure: {0}")]
    Transient(String),
    /// Propagated out of any wait immediately.
    #[error("Fatal query failure: {0}")]
    Fatal(String),
}

impl QueryError {
    pub fn transient(message: impl ToString) -> Self {
        QueryError::Transient(message.to_string())
    }

    pub fn fatal(message: impl ToString) -> Self {
        QueryError::Fatal(message.to_string())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, QueryError::Fatal(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Timed out after {attempts} attempts waiting for {what}")]
    Timeout { what: String, attempts: u32 },

    #[error("Transaction {0} was mined in a block that is no longer canonical")]
    UncleBlock(TxHash),

    #[error(transparent)]
    Query(#[from] QueryError),
}
