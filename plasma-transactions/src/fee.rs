use std::collections::BTreeMap;

use plasma_amount::Amount;
use serde::{Deserialize, Serialize};

use crate::error::TxError;
use crate::utxo::Currency;

/// Fee-schedule identifier of plain payment transactions.
pub const PAYMENT_TX_TYPE: &str = "1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEntry {
    pub currency: Currency,
    #[serde(
        serialize_with = "crate::serde::serialize_amount",
        deserialize_with = "crate::serde::deserialize_amount"
    )]
    pub amount: Amount,
}

/// The fee schedule published by the child chain, keyed by transaction type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeSchedule(BTreeMap<String, Vec<FeeEntry>>);

impl FeeSchedule {
    pub fn new(entries: BTreeMap<String, Vec<FeeEntry>>) -> Self {
        Self(entries)
    }

    pub fn fee_for(&self, tx_type: &str, currency: &Currency) -> Option<&Amount> {
        self.0
            .get(tx_type)?
            .iter()
            .find(|entry| &entry.currency == currency)
            .map(|entry| &entry.amount)
    }

    pub fn payment_fee(&self, currency: &Currency) -> Result<Amount, TxError> {
        self.fee_for(PAYMENT_TX_TYPE, currency)
            .cloned()
            .ok_or_else(|| TxError::FeeNotFound {
                tx_type: PAYMENT_TX_TYPE.to_string(),
                currency: currency.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_fee_schedule() {
        let json = r#"{
            "1": [
                {"currency": "0x0000000000000000000000000000000000000000", "amount": 30000000000000, "subunit_to_unit": 1000000000000000000},
                {"currency": "0xDEAD000000000000000000000000000000000000", "amount": "7"}
            ]
        }"#;
        let fees: FeeSchedule = serde_json::from_str(json).unwrap();

        assert_eq!(
            fees.payment_fee(&Currency::eth()).unwrap(),
            Amount::from(30_000_000_000_000u64)
        );
        assert_eq!(
            fees.fee_for("1", &Currency::from("0xdead000000000000000000000000000000000000")),
            Some(&Amount::from(7u64))
        );
        assert_eq!(fees.fee_for("3", &Currency::eth()), None);
    }

    #[test]
    fn test_missing_payment_fee_is_an_error() {
        let fees = FeeSchedule::default();
        assert_eq!(
            fees.payment_fee(&Currency::eth()),
            Err(TxError::FeeNotFound {
                tx_type: "1".to_string(),
                currency: Currency::eth(),
            })
        );
    }
}
