use std::collections::BTreeSet;

use plasma_amount::Amount;
use serde::{Deserialize, Serialize};

use crate::error::TxError;
use crate::utxo::{Address, Currency, Utxo};

/// Maximum number of inputs a payment transaction can carry.
pub const MAX_INPUTS: usize = 4;
/// Maximum number of outputs a payment transaction can carry.
pub const MAX_OUTPUTS: usize = 4;

/// A desired transfer, the unit of intent handed to the builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub recipient: Address,
    pub currency: Currency,
    #[serde(
        serialize_with = "crate::serde::serialize_amount",
        deserialize_with = "crate::serde::deserialize_amount"
    )]
    pub amount: Amount,
}

impl Payment {
    pub fn new(recipient: Address, currency: Currency, amount: Amount) -> Self {
        Self {
            recipient,
            currency,
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub recipient: Address,
    pub currency: Currency,
    #[serde(
        serialize_with = "crate::serde::serialize_amount",
        deserialize_with = "crate::serde::deserialize_amount"
    )]
    pub amount: Amount,
}

impl From<Payment> for Output {
    fn from(payment: Payment) -> Self {
        Self {
            recipient: payment.recipient,
            currency: payment.currency,
            amount: payment.amount,
        }
    }
}

/// An unsigned transaction. The fee is implicit: whatever the inputs of the fee currency
/// carry beyond its outputs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    pub inputs: Vec<Utxo>,
    pub outputs: Vec<Output>,
}

impl TransactionBody {
    pub fn input_total(&self, currency: &Currency) -> Amount {
        self.inputs
            .iter()
            .filter(|utxo| &utxo.currency == currency)
            .map(|utxo| &utxo.amount)
            .sum()
    }

    pub fn output_total(&self, currency: &Currency) -> Amount {
        self.outputs
            .iter()
            .filter(|output| &output.currency == currency)
            .map(|output| &output.amount)
            .sum()
    }

    /// Every currency that appears on either side, in sorted order.
    pub fn currencies(&self) -> BTreeSet<&Currency> {
        self.inputs
            .iter()
            .map(|utxo| &utxo.currency)
            .chain(self.outputs.iter().map(|output| &output.currency))
            .collect()
    }

    /// Checks the shape limits and that, per currency, inputs equal outputs plus the fee.
    pub fn check_balanced(&self, fee_currency: &Currency, fee: &Amount) -> Result<(), TxError> {
        if self.inputs.len() > MAX_INPUTS {
            return Err(TxError::TooManyInputs(self.inputs.len()));
        }
        if self.outputs.len() > MAX_OUTPUTS {
            return Err(TxError::TooManyOutputs(self.outputs.len()));
        }

        for currency in self.currencies() {
            let mut spent = self.output_total(currency);
            if currency == fee_currency {
                spent = &spent + fee;
            }
            if self.input_total(currency) != spent {
                return Err(TxError::Unbalanced(currency.clone()));
            }
        }

        Ok(())
    }
}
