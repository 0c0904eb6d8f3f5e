use std::future::Future;
use std::sync::Arc;

use futures::future::try_join_all;
use plasma_transactions::{balance_of, Address, Amount, Balance, Currency, Utxo};
use serde_json::Value;

use crate::await_tx::await_tx;
use crate::config::{AwaitTxOptions, TrackerConfig};
use crate::error::TrackerError;
use crate::poll::PendingWait;
use crate::query::{ChildChainQuery, RootChainQuery, TransactionReceipt, TxHash};

/// Waits for the effects of submitted transactions to show up on either chain.
///
/// Every wait is an independent loop over the injected query surfaces; the tracker itself holds
/// no mutable state and can be cloned into concurrent tasks.
pub struct ChainStateTracker<C: ?Sized, R: ?Sized> {
    child: Arc<C>,
    root: Arc<R>,
    config: TrackerConfig,
}

impl<C: ?Sized, R: ?Sized> Clone for ChainStateTracker<C, R> {
    fn clone(&self) -> Self {
        Self {
            child: Arc::clone(&self.child),
            root: Arc::clone(&self.root),
            config: self.config,
        }
    }
}

impl<C, R> ChainStateTracker<C, R>
where
    C: ChildChainQuery + ?Sized,
    R: RootChainQuery + ?Sized,
{
    pub fn new(child: Arc<C>, root: Arc<R>, config: TrackerConfig) -> Self {
        Self {
            child,
            root,
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Polls the child-chain balance of `address` until its `currency` entry satisfies
    /// `predicate`, returning that entry.
    pub async fn wait_for_balance<P>(
        &self,
        address: &Address,
        currency: &Currency,
        predicate: P,
    ) -> Result<Balance, TrackerError>
    where
        P: Fn(&Balance) -> bool,
    {
        let child = &*self.child;
        let predicate = &predicate;

        PendingWait::new(
            format!("child-chain balance of {address} in {currency}"),
            &self.config.child_chain,
        )
        .run(move || async move {
            child
                .get_balance(address)
                .await
                .map(|balances| satisfying(&balances, currency, predicate))
        })
        .await
    }

    pub async fn wait_for_balance_eq(
        &self,
        address: &Address,
        currency: &Currency,
        expected: &Amount,
    ) -> Result<Balance, TrackerError> {
        self.wait_for_balance(address, currency, |balance| &balance.amount == expected)
            .await
    }

    /// Waits until `address` holds nothing in `currency` on the child chain.
    pub async fn wait_for_balance_absent(
        &self,
        address: &Address,
        currency: &Currency,
    ) -> Result<(), TrackerError> {
        let child = &*self.child;

        PendingWait::new(
            format!("child-chain balance of {address} in {currency} to clear"),
            &self.config.child_chain,
        )
        .run(move || async move {
            child.get_balance(address).await.map(|balances| {
                balance_of(&balances, currency)
                    .map_or(true, |balance| balance.amount.is_zero())
                    .then_some(())
            })
        })
        .await
    }

    pub async fn wait_num_utxos(
        &self,
        address: &Address,
        count: usize,
    ) -> Result<Vec<Utxo>, TrackerError> {
        let child = &*self.child;

        PendingWait::new(
            format!("{count} utxos owned by {address}"),
            &self.config.child_chain,
        )
        .run(move || async move {
            child
                .get_utxos(address)
                .await
                .map(|utxos| (utxos.len() == count).then_some(utxos))
        })
        .await
    }

    /// Polls the watcher's event feed for the first `event_type` event satisfying `predicate`.
    pub async fn wait_for_event<P>(&self, event_type: &str, predicate: P) -> Result<Value, TrackerError>
    where
        P: Fn(&Value) -> bool,
    {
        let child = &*self.child;
        let predicate = &predicate;

        PendingWait::new(format!("{event_type} event"), &self.config.child_chain)
            .run(move || async move {
                child.get_events().await.map(|feed| {
                    feed.events(event_type)
                        .iter()
                        .find(|event| predicate(*event))
                        .cloned()
                })
            })
            .await
    }

    pub async fn wait_for_root_balance<P>(
        &self,
        address: &Address,
        currency: &Currency,
        predicate: P,
    ) -> Result<Balance, TrackerError>
    where
        P: Fn(&Balance) -> bool,
    {
        let root = &*self.root;
        let predicate = &predicate;

        PendingWait::new(
            format!("root-chain balance of {address} in {currency}"),
            &self.config.root_chain,
        )
        .run(move || async move {
            root.get_balance(address)
                .await
                .map(|balances| satisfying(&balances, currency, predicate))
        })
        .await
    }

    pub async fn await_tx(
        &self,
        hash: &TxHash,
        options: &AwaitTxOptions,
    ) -> Result<TransactionReceipt, TrackerError> {
        await_tx(&*self.root, hash, options).await
    }

    /// Awaits every hash concurrently; the first failure wins.
    pub async fn await_txs(
        &self,
        hashes: &[TxHash],
        options: &AwaitTxOptions,
    ) -> Result<Vec<TransactionReceipt>, TrackerError> {
        wait_all(hashes.iter().map(|hash| self.await_tx(hash, options))).await
    }
}

/// Drives independent waits concurrently and collects their results in order.
pub async fn wait_all<I, F, T>(waits: I) -> Result<Vec<T>, TrackerError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, TrackerError>>,
{
    try_join_all(waits).await
}

fn satisfying<P>(balances: &[Balance], currency: &Currency, predicate: &P) -> Option<Balance>
where
    P: Fn(&Balance) -> bool,
{
    balance_of(balances, currency)
        .filter(|balance| predicate(*balance))
        .cloned()
}
