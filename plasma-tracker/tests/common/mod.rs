#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use plasma_tracker::{
    BalanceQuery, Block, BlockId, ChildChainQuery, EventFeed, QueryError, RootChainQuery,
    RootTransaction, TransactionReceipt, TxHash,
};
use plasma_transactions::{Address, Amount, Balance, Currency, Utxo};

/// Replays scripted responses in order, repeating the last one forever.
pub struct Script<T> {
    steps: Mutex<VecDeque<T>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    pub fn new(steps: impl IntoIterator<Item = T>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn next(&self) -> T {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut steps = self.steps.lock().unwrap();
        if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps.front().cloned().expect("script is empty")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub type Response<T> = Result<T, QueryError>;

pub struct MockChildChain {
    pub balances: Script<Response<Vec<Balance>>>,
    pub utxos: Script<Response<Vec<Utxo>>>,
    pub events: Script<Response<EventFeed>>,
}

impl Default for MockChildChain {
    fn default() -> Self {
        Self {
            balances: Script::new([Ok(vec![])]),
            utxos: Script::new([Ok(vec![])]),
            events: Script::new([Ok(EventFeed::default())]),
        }
    }
}

#[async_trait]
impl BalanceQuery for MockChildChain {
    async fn get_balance(&self, _address: &Address) -> Result<Vec<Balance>, QueryError> {
        self.balances.next()
    }
}

#[async_trait]
impl ChildChainQuery for MockChildChain {
    async fn get_utxos(&self, _address: &Address) -> Result<Vec<Utxo>, QueryError> {
        self.utxos.next()
    }

    async fn get_events(&self) -> Result<EventFeed, QueryError> {
        self.events.next()
    }
}

pub struct MockRootChain {
    pub balances: Script<Response<Vec<Balance>>>,
    pub receipts: Script<Response<Option<TransactionReceipt>>>,
    pub transactions: Script<Response<Option<RootTransaction>>>,
    pub heads: Script<Response<Option<Block>>>,
}

impl Default for MockRootChain {
    fn default() -> Self {
        Self {
            balances: Script::new([Ok(vec![])]),
            receipts: Script::new([Ok(None)]),
            transactions: Script::new([Ok(None)]),
            heads: Script::new([Ok(None)]),
        }
    }
}

#[async_trait]
impl BalanceQuery for MockRootChain {
    async fn get_balance(&self, _address: &Address) -> Result<Vec<Balance>, QueryError> {
        self.balances.next()
    }
}

#[async_trait]
impl RootChainQuery for MockRootChain {
    async fn get_transaction_receipt(
        &self,
        _hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, QueryError> {
        self.receipts.next()
    }

    async fn get_transaction(&self, _hash: &TxHash) -> Result<Option<RootTransaction>, QueryError> {
        self.transactions.next()
    }

    async fn get_block(&self, id: BlockId) -> Result<Option<Block>, QueryError> {
        assert_eq!(id, BlockId::Latest);
        self.heads.next()
    }
}

pub fn balance(currency: &Currency, amount: u64) -> Balance {
    Balance {
        currency: currency.clone(),
        amount: Amount::from(amount),
    }
}

pub fn receipt(hash: &TxHash, block_number: Option<u64>) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: hash.clone(),
        block_number,
        status: Some(1),
    }
}

pub fn transaction(hash: &TxHash, block_number: Option<u64>) -> RootTransaction {
    RootTransaction {
        hash: hash.clone(),
        block_number,
    }
}

pub fn head(number: u64) -> Block {
    Block { number, hash: None }
}
