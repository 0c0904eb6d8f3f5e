use plasma_amount::AmountError;
use plasma_tracker::{QueryError, TrackerError};
use plasma_transactions::TxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountError),

    #[error("Transaction error: {0}")]
    Tx(#[from] TxError),

    #[error("Chain query error: {0}")]
    Query(#[from] QueryError),

    #[error("Wait failed: {0}")]
    Tracker(#[from] TrackerError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
