use std::sync::Arc;

use plasma_amount::{parse_positive_amount, Amount, AmountInput};
use plasma_tracker::ChainStateTracker;
use plasma_transactions::{
    split, Address, Currency, Payment, TransactionBody, TransactionBuilder, Utxo,
};
use tracing::info;

use crate::client::{Account, ChildChainClient, RootChainClient, SignedTransaction, SubmitResult};
use crate::config::HarnessConfig;
use crate::error::HarnessError;

/// Composes selection, building, external signing and submission against one child chain and
/// its root chain.
pub struct Harness<C: ?Sized, R: ?Sized> {
    config: HarnessConfig,
    child: Arc<C>,
    root: Arc<R>,
    tracker: ChainStateTracker<C, R>,
}

impl<C, R> Harness<C, R>
where
    C: ChildChainClient + ?Sized,
    R: RootChainClient + ?Sized,
{
    pub fn new(config: HarnessConfig, child: Arc<C>, root: Arc<R>) -> Self {
        let tracker = ChainStateTracker::new(Arc::clone(&child), Arc::clone(&root), config.tracker);
        Self {
            config,
            child,
            root,
            tracker,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn child(&self) -> &C {
        &self.child
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    pub fn tracker(&self) -> &ChainStateTracker<C, R> {
        &self.tracker
    }

    /// The current fee of a payment, in the configured fee currency.
    pub async fn payment_fee(&self) -> Result<Amount, HarnessError> {
        let fees = self.child.get_fees().await?;
        Ok(fees.payment_fee(&self.config.fee_currency)?)
    }

    /// Builds and signs a payment of `amount` from `from` to `to`.
    ///
    /// Returns `Ok(None)` for a zero or negative amount.
    pub async fn create_tx(
        &self,
        from: &Account,
        to: &Address,
        amount: impl Into<AmountInput>,
        currency: &Currency,
    ) -> Result<Option<SignedTransaction>, HarnessError> {
        let Some(amount) = parse_positive_amount(amount)? else {
            return Ok(None);
        };

        let fee = self.payment_fee().await?;
        let utxos = self.child.get_utxos(&from.address).await?;
        let builder = TransactionBuilder::new(
            from.address.clone(),
            &utxos,
            self.config.fee_currency.clone(),
            fee,
        );

        let payment = Payment::new(to.clone(), currency.clone(), amount);
        let Some(body) = builder.build(&[payment])? else {
            return Ok(None);
        };

        self.sign(&body, from).await.map(Some)
    }

    /// [`create_tx`](Self::create_tx) followed by submission.
    pub async fn send(
        &self,
        from: &Account,
        to: &Address,
        amount: impl Into<AmountInput>,
        currency: &Currency,
    ) -> Result<Option<SubmitResult>, HarnessError> {
        let Some(signed) = self.create_tx(from, to, amount, currency).await? else {
            return Ok(None);
        };

        let result = self.child.submit(&signed).await?;
        info!(
            from = %from.address,
            to = %to,
            currency = %currency,
            tx = %result.tx_hash,
            blknum = result.blknum,
            "Submitted payment"
        );
        Ok(Some(result))
    }

    /// Splits `utxo` into `count` equal outputs owned by `account`.
    pub async fn split_utxo(
        &self,
        account: &Account,
        utxo: &Utxo,
        count: usize,
    ) -> Result<SubmitResult, HarnessError> {
        let fee = self.payment_fee().await?;
        let body = split(utxo, count, &self.config.fee_currency, &fee)?;
        let signed = self.sign(&body, account).await?;

        let result = self.child.submit(&signed).await?;
        info!(
            owner = %account.address,
            utxo = %utxo.position,
            count,
            tx = %result.tx_hash,
            "Submitted split"
        );
        Ok(result)
    }

    async fn sign(
        &self,
        body: &TransactionBody,
        signer: &Account,
    ) -> Result<SignedTransaction, HarnessError> {
        // every input belongs to the signer
        let keys = vec![signer.key.clone(); body.inputs.len()];
        Ok(self.child.sign_and_encode(body, &keys).await?)
    }
}
