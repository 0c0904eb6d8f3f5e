//! Polling primitives that wait for chain state to converge.
//!
//! The child-chain watcher and the root-chain node are both eventually consistent, so every
//! "wait for effect" is a poll loop: bounded ([`PendingWait`]) for balances, UTXO counts and
//! events, unbounded for transaction confirmations ([`await_tx`]).

pub mod await_tx;
pub mod config;
pub mod error;
pub mod poll;
pub mod query;
pub mod tracker;

pub use await_tx::await_tx;
pub use config::{AwaitTxOptions, PollConfig, TrackerConfig};
pub use error::{QueryError, TrackerError};
pub use poll::PendingWait;
pub use query::{
    BalanceQuery, Block, BlockHash, BlockId, ChildChainQuery, EventFeed, RootChainQuery,
    RootTransaction, TransactionReceipt, TxHash,
};
pub use tracker::{wait_all, ChainStateTracker};
