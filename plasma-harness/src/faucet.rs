use std::collections::BTreeSet;

use plasma_amount::{parse_positive_amount, Amount, AmountInput};
use plasma_tracker::AwaitTxOptions;
use plasma_transactions::{balance_of, Address, Currency, Utxo, MAX_INPUTS};
use tracing::{info, warn};

use crate::client::{Account, ChildChainClient, RootChainClient, SubmitResult};
use crate::error::HarnessError;
use crate::harness::Harness;

/// A well-funded child-chain account that hands out funds to test accounts and takes them back.
pub struct Faucet<'a, C: ?Sized, R: ?Sized> {
    harness: &'a Harness<C, R>,
    account: Account,
}

impl<'a, C, R> Faucet<'a, C, R>
where
    C: ChildChainClient + ?Sized,
    R: RootChainClient + ?Sized,
{
    pub fn new(harness: &'a Harness<C, R>, account: Account) -> Self {
        Self { harness, account }
    }

    /// Uses the faucet account from the harness configuration.
    pub fn from_config(harness: &'a Harness<C, R>) -> Result<Self, HarnessError> {
        let faucet = &harness.config().faucet;
        let address = faucet
            .address
            .clone()
            .ok_or_else(|| HarnessError::Config("faucet address is not set".to_string()))?;
        let key = faucet
            .private_key
            .clone()
            .ok_or_else(|| HarnessError::Config("faucet private key is not set".to_string()))?;

        Ok(Self::new(harness, Account::new(address, key)))
    }

    pub fn address(&self) -> &Address {
        &self.account.address
    }

    /// Makes sure the faucet holds at least the configured minimum of the fee currency on the
    /// child chain, depositing a top-up from the root chain if it does not.
    ///
    /// Returns the faucet's fee-currency balance afterwards.
    pub async fn init(&self) -> Result<Amount, HarnessError> {
        let config = self.harness.config();
        let fee_currency = &config.fee_currency;
        let current = self.balance(self.address(), fee_currency).await?;

        if current >= config.faucet.min_balance {
            info!(faucet = %self.address(), balance = %current, "Faucet is funded");
            return Ok(current);
        }

        let top_up = &config.faucet.top_up;
        info!(
            faucet = %self.address(),
            balance = %current,
            top_up = %top_up,
            "Topping up faucet from the root chain"
        );

        let tracker = self.harness.tracker();
        let deposit = self
            .harness
            .root()
            .deposit(&self.account, fee_currency, top_up)
            .await?;
        tracker.await_tx(&deposit, &AwaitTxOptions::default()).await?;

        let expected = &current + top_up;
        let balance = tracker
            .wait_for_balance(self.address(), fee_currency, |b| b.amount >= expected)
            .await?;
        Ok(balance.amount)
    }

    /// Sends `amount` of `currency` to `to` and waits until the recipient's balance reflects it.
    ///
    /// Zero and negative amounts are a no-op and return `Ok(None)`.
    pub async fn fund_account(
        &self,
        to: &Address,
        currency: &Currency,
        amount: impl Into<AmountInput>,
    ) -> Result<Option<SubmitResult>, HarnessError> {
        let Some(amount) = parse_positive_amount(amount)? else {
            return Ok(None);
        };
        let before = self.balance(to, currency).await?;

        let Some(result) = self
            .harness
            .send(&self.account, to, &amount, currency)
            .await?
        else {
            return Ok(None);
        };

        let expected = &before + &amount;
        self.harness
            .tracker()
            .wait_for_balance(to, currency, |b| b.amount >= expected)
            .await?;

        info!(to = %to, currency = %currency, amount = %amount, "Funded account");
        Ok(Some(result))
    }

    /// Sends everything `from` holds back to the faucet, one transaction per currency.
    ///
    /// Each transaction spends at most [`MAX_INPUTS`] UTXOs, so accounts holding more are only
    /// partially drained. The fee currency goes last, minus the fee, since every other
    /// currency's transfer pays its fee from it.
    pub async fn return_funds(&self, from: &Account) -> Result<Vec<SubmitResult>, HarnessError> {
        let fee_currency = &self.harness.config().fee_currency;
        let fee = self.harness.payment_fee().await?;
        let utxos = self.harness.child().get_utxos(&from.address).await?;

        let currencies: BTreeSet<&Currency> = utxos
            .iter()
            .map(|utxo| &utxo.currency)
            .filter(|currency| *currency != fee_currency)
            .collect();

        let mut results = Vec::new();
        for currency in currencies {
            let amount = largest_total(&utxos, currency, MAX_INPUTS - 1);
            if let Some(result) = self.give_back(from, currency, amount).await? {
                results.push(result);
            }
        }

        let utxos = self.harness.child().get_utxos(&from.address).await?;
        let total = largest_total(&utxos, fee_currency, MAX_INPUTS);
        match total.checked_sub(&fee) {
            Some(amount) => {
                if let Some(result) = self.give_back(from, fee_currency, amount).await? {
                    results.push(result);
                }
            }
            None => {
                warn!(account = %from.address, balance = %total, fee = %fee, "Not enough left to pay the fee");
            }
        }

        Ok(results)
    }

    async fn give_back(
        &self,
        from: &Account,
        currency: &Currency,
        amount: Amount,
    ) -> Result<Option<SubmitResult>, HarnessError> {
        let before = self.balance(self.address(), currency).await?;
        let Some(result) = self
            .harness
            .send(from, self.address(), &amount, currency)
            .await?
        else {
            return Ok(None);
        };

        let expected = &before + &amount;
        self.harness
            .tracker()
            .wait_for_balance(self.address(), currency, |b| b.amount >= expected)
            .await?;

        info!(from = %from.address, currency = %currency, amount = %amount, "Returned funds to faucet");
        Ok(Some(result))
    }

    async fn balance(&self, address: &Address, currency: &Currency) -> Result<Amount, HarnessError> {
        let balances = self.harness.child().get_balance(address).await?;
        Ok(balance_of(&balances, currency)
            .map(|balance| balance.amount.clone())
            .unwrap_or_default())
    }
}

/// Sum of the `limit` largest UTXOs of `currency`.
fn largest_total(utxos: &[Utxo], currency: &Currency, limit: usize) -> Amount {
    let mut amounts: Vec<&Amount> = utxos
        .iter()
        .filter(|utxo| &utxo.currency == currency)
        .map(|utxo| &utxo.amount)
        .collect();
    amounts.sort_by(|a, b| b.cmp(a));
    amounts.into_iter().take(limit).sum()
}
