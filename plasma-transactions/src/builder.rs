use plasma_amount::Amount;

use crate::error::TxError;
use crate::selection::select_utxos;
use crate::transaction::{Output, Payment, TransactionBody, MAX_OUTPUTS};
use crate::utxo::{Address, Currency, Utxo};

/// Assembles balanced payment transactions from one sender's UTXO snapshot.
///
/// The builder never mutates the snapshot. Two bodies built from the same snapshot spend the
/// same inputs, so a snapshot must not back two concurrent submissions.
#[derive(Clone, Debug)]
pub struct TransactionBuilder<'a> {
    sender: Address,
    utxos: &'a [Utxo],
    fee_currency: Currency,
    fee: Amount,
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(sender: Address, utxos: &'a [Utxo], fee_currency: Currency, fee: Amount) -> Self {
        Self {
            sender,
            utxos,
            fee_currency,
            fee,
        }
    }

    /// Builds a transaction paying every entry of `payments`.
    ///
    /// All payments must share one currency. Outputs come in a fixed order: the payments as
    /// given, then change in the payment currency, then change in the fee currency.
    ///
    /// Zero-amount payments produce no output. Returns `Ok(None)` when there is nothing to pay
    /// (no payments, or a zero total).
    ///
    /// # Errors
    /// * [`TxError::NoSpendableInput`] – the sender holds nothing in the payment currency.
    /// * [`TxError::InsufficientFunds`] – the selected inputs do not cover payments plus fee.
    /// * [`TxError::UnsupportedPaymentCurrency`] – payments mix currencies.
    /// * [`TxError::TooManyOutputs`] – payments plus change exceed [`MAX_OUTPUTS`].
    pub fn build(&self, payments: &[Payment]) -> Result<Option<TransactionBody>, TxError> {
        let Some(first) = payments.first() else {
            return Ok(None);
        };
        let currency = &first.currency;

        if let Some(other) = payments.iter().find(|p| &p.currency != currency) {
            return Err(TxError::UnsupportedPaymentCurrency {
                expected: currency.clone(),
                found: other.currency.clone(),
            });
        }

        let total: Amount = payments.iter().map(|p| &p.amount).sum();
        if total.is_zero() {
            return Ok(None);
        }

        let inputs = select_utxos(self.utxos, currency, &total, &self.fee, &self.fee_currency)
            .ok_or_else(|| TxError::NoSpendableInput(currency.clone()))?;

        let mut body = TransactionBody {
            inputs,
            outputs: payments
                .iter()
                .filter(|p| !p.amount.is_zero())
                .cloned()
                .map(Output::from)
                .collect(),
        };

        let pays_fee = currency == &self.fee_currency;
        let required = if pays_fee {
            &total + &self.fee
        } else {
            total
        };
        let change = self.leftover(&body, currency, &required)?;
        self.push_change(&mut body, currency, change);

        if !pays_fee {
            let fee_change = self.leftover(&body, &self.fee_currency, &self.fee)?;
            self.push_change(&mut body, &self.fee_currency, fee_change);
        }

        if body.outputs.len() > MAX_OUTPUTS {
            return Err(TxError::TooManyOutputs(body.outputs.len()));
        }

        body.check_balanced(&self.fee_currency, &self.fee)?;
        Ok(Some(body))
    }

    fn leftover(
        &self,
        body: &TransactionBody,
        currency: &Currency,
        required: &Amount,
    ) -> Result<Amount, TxError> {
        let available = body.input_total(currency);
        available
            .checked_sub(required)
            .ok_or_else(|| TxError::InsufficientFunds {
                currency: currency.clone(),
                required: required.clone(),
                available,
            })
    }

    fn push_change(&self, body: &mut TransactionBody, currency: &Currency, change: Amount) {
        if change.is_zero() {
            return;
        }
        body.outputs.push(Output {
            recipient: self.sender.clone(),
            currency: currency.clone(),
            amount: change,
        });
    }
}

/// Fans `utxo` out into `count` equal outputs back to its owner, paying `fee` out of the first.
///
/// Each output carries `floor(amount / count)`; the first is reduced by the fee. Whatever the
/// division leaves over is not assigned to any output and goes to the fee as well.
pub fn split(
    utxo: &Utxo,
    count: usize,
    fee_currency: &Currency,
    fee: &Amount,
) -> Result<TransactionBody, TxError> {
    if count == 0 || count > MAX_OUTPUTS {
        return Err(TxError::InvalidSplitCount(count));
    }
    if &utxo.currency != fee_currency {
        return Err(TxError::UnfundedFee(fee_currency.clone()));
    }

    // count <= MAX_OUTPUTS
    let share = utxo.amount.div_floor(count as u32)?;
    let first = share
        .checked_sub(fee)
        .ok_or_else(|| TxError::InsufficientFunds {
            currency: utxo.currency.clone(),
            required: fee.clone(),
            available: share.clone(),
        })?;

    let output = |amount: Amount| Output {
        recipient: utxo.owner.clone(),
        currency: utxo.currency.clone(),
        amount,
    };

    let mut outputs = Vec::with_capacity(count);
    outputs.push(output(first));
    outputs.extend((1..count).map(|_| output(share.clone())));

    Ok(TransactionBody {
        inputs: vec![utxo.clone()],
        outputs,
    })
}
