use plasma_amount::{Amount, AmountError};
use thiserror::Error;

use crate::utxo::Currency;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("No spendable input in {0}")]
    NoSpendableInput(Currency),

    #[error("Insufficient {currency} funds: required {required}, available {available}")]
    InsufficientFunds {
        currency: Currency,
        required: Amount,
        available: Amount,
    },

    #[error("The fee must be paid from a {0} input")]
    UnfundedFee(Currency),

    #[error("No fee for transaction type {tx_type} in {currency}")]
    FeeNotFound { tx_type: String, currency: Currency },

    #[error("All payments must share currency {expected}, found {found}")]
    UnsupportedPaymentCurrency { expected: Currency, found: Currency },

    #[error("The transaction has {0} outputs, more than allowed")]
    TooManyOutputs(usize),

    #[error("The transaction has {0} inputs, more than allowed")]
    TooManyInputs(usize),

    #[error("Cannot split into {0} outputs")]
    InvalidSplitCount(usize),

    #[error("Inputs and outputs do not balance in {0}")]
    Unbalanced(Currency),
}
