use async_trait::async_trait;
use plasma_amount::Amount;
use plasma_tracker::{ChildChainQuery, QueryError, RootChainQuery, TxHash};
use plasma_transactions::{Address, Currency, FeeSchedule, TransactionBody};
use serde::{Deserialize, Serialize};

use crate::config::SigningKey;

#[derive(Clone, Debug)]
pub struct Account {
    pub address: Address,
    pub key: SigningKey,
}

impl Account {
    pub fn new(address: Address, key: SigningKey) -> Self {
        Self { address, key }
    }
}

/// Encoded, signed transaction bytes ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction(Vec<u8>);

impl SignedTransaction {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    #[serde(rename = "txhash")]
    pub tx_hash: TxHash,
    pub blknum: u64,
    pub txindex: u32,
}

/// The child chain's full client surface: the watcher queries plus fees, signing and submission.
#[async_trait]
pub trait ChildChainClient: ChildChainQuery {
    async fn get_fees(&self) -> Result<FeeSchedule, QueryError>;

    /// Signs `body` with one key per input, in input order, and encodes it for submission.
    async fn sign_and_encode(
        &self,
        body: &TransactionBody,
        keys: &[SigningKey],
    ) -> Result<SignedTransaction, QueryError>;

    async fn submit(&self, transaction: &SignedTransaction) -> Result<SubmitResult, QueryError>;
}

#[async_trait]
pub trait RootChainClient: RootChainQuery {
    /// Deposits `amount` of `currency` from `owner` into the plasma framework.
    async fn deposit(
        &self,
        owner: &Account,
        currency: &Currency,
        amount: &Amount,
    ) -> Result<TxHash, QueryError>;
}
