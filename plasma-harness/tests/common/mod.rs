#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use plasma_harness::{
    Account, ChildChainClient, Harness, HarnessConfig, RootChainClient, SignedTransaction,
    SigningKey, SubmitResult,
};
use plasma_tracker::{
    BalanceQuery, Block, BlockId, ChildChainQuery, EventFeed, PollConfig, QueryError,
    RootChainQuery, RootTransaction, TrackerConfig, TransactionReceipt, TxHash,
};
use plasma_transactions::{
    Address, Amount, Balance, Currency, FeeEntry, FeeSchedule, TransactionBody, Utxo,
    UtxoPosition, PAYMENT_TX_TYPE,
};

pub const FEE: u64 = 5;

#[derive(Default)]
pub struct LedgerState {
    pub utxos: Vec<Utxo>,
    pub next_blknum: u64,
    pub next_deposit: u64,
    pub head: u64,
    pub deposits: BTreeMap<TxHash, u64>,
    pub signatures: Vec<usize>,
}

/// An in-memory child chain that settles every submission immediately.
#[derive(Clone)]
pub struct Ledger(Arc<Mutex<LedgerState>>);

impl Ledger {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(LedgerState {
            next_blknum: 1000,
            next_deposit: 1,
            ..Default::default()
        })))
    }

    pub fn credit(&self, owner: &Address, currency: &Currency, amount: u64) {
        let mut state = self.0.lock().unwrap();
        let blknum = state.next_deposit;
        state.next_deposit += 1;
        state.utxos.push(Utxo {
            position: UtxoPosition::new(blknum, 0, 0),
            owner: owner.clone(),
            currency: currency.clone(),
            amount: Amount::from(amount),
        });
    }

    pub fn utxos_of(&self, owner: &Address) -> Vec<Utxo> {
        let state = self.0.lock().unwrap();
        state
            .utxos
            .iter()
            .filter(|utxo| &utxo.owner == owner)
            .cloned()
            .collect()
    }

    pub fn amounts_of(&self, owner: &Address, currency: &Currency) -> Vec<u64> {
        let mut amounts: Vec<u64> = self
            .utxos_of(owner)
            .iter()
            .filter(|utxo| &utxo.currency == currency)
            .map(|utxo| utxo.amount.to_u64().unwrap())
            .collect();
        amounts.sort();
        amounts
    }

    pub fn total_of(&self, owner: &Address, currency: &Currency) -> u64 {
        self.amounts_of(owner, currency).iter().sum()
    }

    pub fn signatures(&self) -> Vec<usize> {
        self.0.lock().unwrap().signatures.clone()
    }

    pub fn deposits(&self) -> usize {
        self.0.lock().unwrap().deposits.len()
    }
}

pub struct MockChildChain {
    pub ledger: Ledger,
    pub fees: FeeSchedule,
}

#[async_trait]
impl BalanceQuery for MockChildChain {
    async fn get_balance(&self, address: &Address) -> Result<Vec<Balance>, QueryError> {
        let mut totals: BTreeMap<Currency, Amount> = BTreeMap::new();
        for utxo in self.ledger.utxos_of(address) {
            let total = totals.entry(utxo.currency.clone()).or_default();
            *total = &*total + &utxo.amount;
        }
        Ok(totals
            .into_iter()
            .map(|(currency, amount)| Balance { currency, amount })
            .collect())
    }
}

#[async_trait]
impl ChildChainQuery for MockChildChain {
    async fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, QueryError> {
        Ok(self.ledger.utxos_of(address))
    }

    async fn get_events(&self) -> Result<EventFeed, QueryError> {
        Ok(EventFeed::default())
    }
}

#[async_trait]
impl ChildChainClient for MockChildChain {
    async fn get_fees(&self) -> Result<FeeSchedule, QueryError> {
        Ok(self.fees.clone())
    }

    async fn sign_and_encode(
        &self,
        body: &TransactionBody,
        keys: &[SigningKey],
    ) -> Result<SignedTransaction, QueryError> {
        if keys.len() != body.inputs.len() {
            return Err(QueryError::fatal("one key per input is required"));
        }
        self.ledger.0.lock().unwrap().signatures.push(keys.len());
        serde_json::to_vec(body)
            .map(SignedTransaction::new)
            .map_err(QueryError::fatal)
    }

    async fn submit(&self, transaction: &SignedTransaction) -> Result<SubmitResult, QueryError> {
        let body: TransactionBody =
            serde_json::from_slice(transaction.as_bytes()).map_err(QueryError::fatal)?;

        let mut state = self.ledger.0.lock().unwrap();
        for input in &body.inputs {
            let index = state
                .utxos
                .iter()
                .position(|utxo| utxo.position == input.position)
                .ok_or_else(|| QueryError::fatal(format!("utxo {} is spent", input.position)))?;
            state.utxos.remove(index);
        }

        let blknum = state.next_blknum;
        state.next_blknum += 1000;
        for (oindex, output) in body.outputs.into_iter().enumerate() {
            state.utxos.push(Utxo {
                position: UtxoPosition::new(blknum, 0, oindex as u8),
                owner: output.recipient,
                currency: output.currency,
                amount: output.amount,
            });
        }

        Ok(SubmitResult {
            tx_hash: TxHash::new(format!("0x{blknum:x}")),
            blknum,
            txindex: 0,
        })
    }
}

pub struct MockRootChain {
    pub ledger: Ledger,
}

#[async_trait]
impl BalanceQuery for MockRootChain {
    async fn get_balance(&self, _address: &Address) -> Result<Vec<Balance>, QueryError> {
        Ok(vec![])
    }
}

#[async_trait]
impl RootChainQuery for MockRootChain {
    async fn get_transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, QueryError> {
        let state = self.ledger.0.lock().unwrap();
        Ok(state.deposits.get(hash).map(|&block| TransactionReceipt {
            transaction_hash: hash.clone(),
            block_number: Some(block),
            status: Some(1),
        }))
    }

    async fn get_transaction(&self, hash: &TxHash) -> Result<Option<RootTransaction>, QueryError> {
        let state = self.ledger.0.lock().unwrap();
        Ok(state.deposits.get(hash).map(|&block| RootTransaction {
            hash: hash.clone(),
            block_number: Some(block),
        }))
    }

    async fn get_block(&self, _id: BlockId) -> Result<Option<Block>, QueryError> {
        let state = self.ledger.0.lock().unwrap();
        Ok(Some(Block {
            number: state.head,
            hash: None,
        }))
    }
}

#[async_trait]
impl RootChainClient for MockRootChain {
    async fn deposit(
        &self,
        owner: &Account,
        currency: &Currency,
        amount: &Amount,
    ) -> Result<TxHash, QueryError> {
        let amount = amount
            .to_u64()
            .ok_or_else(|| QueryError::fatal("deposit too large"))?;
        self.ledger.credit(&owner.address, currency, amount);

        let mut state = self.ledger.0.lock().unwrap();
        state.head += 1;
        let hash = TxHash::new(format!("0xdeposit{}", state.head));
        let block = state.head;
        state.deposits.insert(hash.clone(), block);
        Ok(hash)
    }
}

pub fn eth() -> Currency {
    Currency::eth()
}

pub fn token() -> Currency {
    Currency::from("0x70ken")
}

pub fn account(name: &str) -> Account {
    Account::new(Address::from(name), SigningKey::new(format!("{name}-key")))
}

pub fn config() -> HarnessConfig {
    let mut config = HarnessConfig::default();
    config.tracker = TrackerConfig {
        child_chain: PollConfig::new(10, 5),
        root_chain: PollConfig::new(10, 5),
    };
    config
}

pub fn fees() -> FeeSchedule {
    FeeSchedule::new(BTreeMap::from([(
        PAYMENT_TX_TYPE.to_string(),
        vec![FeeEntry {
            currency: eth(),
            amount: Amount::from(FEE),
        }],
    )]))
}

pub fn harness(ledger: &Ledger, config: HarnessConfig) -> Harness<MockChildChain, MockRootChain> {
    Harness::new(
        config,
        Arc::new(MockChildChain {
            ledger: ledger.clone(),
            fees: fees(),
        }),
        Arc::new(MockRootChain {
            ledger: ledger.clone(),
        }),
    )
}
