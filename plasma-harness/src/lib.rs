//! Drives a child chain and its root chain from integration tests.
//!
//! [`Harness`] composes UTXO selection and transaction building with the external signer and
//! submitter; [`Faucet`] keeps test accounts funded. Chain access goes through the
//! [`ChildChainClient`] and [`RootChainClient`] traits, whose implementations live elsewhere.

pub mod client;
pub mod config;
pub mod error;
pub mod faucet;
pub mod harness;
pub mod logging;

pub use client::{Account, ChildChainClient, RootChainClient, SignedTransaction, SubmitResult};
pub use config::{FaucetConfig, HarnessConfig, SigningKey};
pub use error::HarnessError;
pub use faucet::Faucet;
pub use harness::Harness;
