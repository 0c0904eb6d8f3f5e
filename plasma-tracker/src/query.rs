use std::collections::BTreeMap;

use async_trait::async_trait;
use plasma_transactions::{declare_hex_identifier, Address, Balance, Utxo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QueryError;

declare_hex_identifier!(
    /// Hash of a child-chain or root-chain transaction.
    TxHash
);

declare_hex_identifier!(BlockHash);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    /// Absent while the receipt's block is still being assembled.
    pub block_number: Option<u64>,
    #[serde(default)]
    pub status: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootTransaction {
    pub hash: TxHash,
    /// `None` once the block that mined the transaction has been orphaned.
    pub block_number: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub number: u64,
    pub hash: Option<BlockHash>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockId {
    Latest,
    Number(u64),
}

/// Watcher events grouped by event type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventFeed(BTreeMap<String, Vec<Value>>);

impl EventFeed {
    pub fn events(&self, event_type: &str) -> &[Value] {
        self.0.get(event_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, event_type: impl Into<String>, event: Value) {
        self.0.entry(event_type.into()).or_default().push(event);
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for EventFeed {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut feed = EventFeed::default();
        for (event_type, event) in iter {
            feed.push(event_type, event);
        }
        feed
    }
}

#[async_trait]
pub trait BalanceQuery: Send + Sync {
    async fn get_balance(&self, address: &Address) -> Result<Vec<Balance>, QueryError>;
}

/// Read side of the child-chain watcher.
#[async_trait]
pub trait ChildChainQuery: BalanceQuery {
    async fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, QueryError>;

    async fn get_events(&self) -> Result<EventFeed, QueryError>;
}

/// Read side of the root-chain node.
#[async_trait]
pub trait RootChainQuery: BalanceQuery {
    async fn get_transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, QueryError>;

    async fn get_transaction(&self, hash: &TxHash) -> Result<Option<RootTransaction>, QueryError>;

    async fn get_block(&self, id: BlockId) -> Result<Option<Block>, QueryError>;
}
