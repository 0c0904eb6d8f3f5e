use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use clap::{Args, Parser};
use plasma_amount::Amount;
use plasma_tracker::TrackerConfig;
use plasma_transactions::{Address, Currency};
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

pub const DEFAULT_WATCHER_URL: &str = "http://localhost:7534";
pub const DEFAULT_CHILD_CHAIN_URL: &str = "http://localhost:9656";
pub const DEFAULT_ETH_NODE_URL: &str = "http://localhost:8545";
pub const DEFAULT_FAUCET_MIN_BALANCE: &str = "1000000000000000000";
pub const DEFAULT_FAUCET_TOP_UP: &str = "2000000000000000000";

/// A private key handed to the external signer. Never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SigningKey(String);

impl SigningKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

impl FromStr for SigningKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Endpoints, contract address and funding policy shared by every component of a test run.
#[derive(Clone, Debug, Parser, Serialize, Deserialize)]
#[clap(name = "plasma-harness", about = "Child-chain integration harness")]
#[serde(default)]
pub struct HarnessConfig {
    #[clap(long, env = "WATCHER_URL", default_value = DEFAULT_WATCHER_URL)]
    pub watcher_url: String,

    #[clap(long, env = "CHILDCHAIN_URL", default_value = DEFAULT_CHILD_CHAIN_URL)]
    pub child_chain_url: String,

    #[clap(long, env = "ETH_NODE", default_value = DEFAULT_ETH_NODE_URL)]
    pub eth_node_url: String,

    /// Address of the root-chain plasma framework contract
    #[clap(long, env = "PLASMA_FRAMEWORK")]
    pub plasma_framework: Option<Address>,

    /// Currency every transaction fee is paid in
    #[clap(long, env = "FEE_CURRENCY", default_value = Currency::ETH_ADDRESS)]
    pub fee_currency: Currency,

    #[clap(flatten)]
    pub faucet: FaucetConfig,

    #[clap(skip)]
    pub tracker: TrackerConfig,
}

#[derive(Clone, Debug, Args, Serialize, Deserialize)]
#[serde(default)]
pub struct FaucetConfig {
    #[clap(long = "faucet-address", env = "FAUCET_ADDRESS")]
    pub address: Option<Address>,

    #[clap(long = "faucet-private-key", env = "FAUCET_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<SigningKey>,

    /// Fee-currency balance below which the faucet tops itself up from the root chain
    #[clap(long = "faucet-min-balance", env = "FAUCET_MIN_BALANCE", default_value = DEFAULT_FAUCET_MIN_BALANCE)]
    #[serde(
        serialize_with = "plasma_transactions::serde::serialize_amount",
        deserialize_with = "plasma_transactions::serde::deserialize_amount"
    )]
    pub min_balance: Amount,

    /// Amount deposited per top-up
    #[clap(long = "faucet-top-up", env = "FAUCET_TOP_UP", default_value = DEFAULT_FAUCET_TOP_UP)]
    #[serde(
        serialize_with = "plasma_transactions::serde::serialize_amount",
        deserialize_with = "plasma_transactions::serde::deserialize_amount"
    )]
    pub top_up: Amount,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            address: None,
            private_key: None,
            min_balance: default_amount(DEFAULT_FAUCET_MIN_BALANCE),
            top_up: default_amount(DEFAULT_FAUCET_TOP_UP),
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            watcher_url: DEFAULT_WATCHER_URL.to_string(),
            child_chain_url: DEFAULT_CHILD_CHAIN_URL.to_string(),
            eth_node_url: DEFAULT_ETH_NODE_URL.to_string(),
            plasma_framework: None,
            fee_currency: Currency::eth(),
            faucet: FaucetConfig::default(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl HarnessConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, HarnessError> {
        toml::from_str(content)
            .map_err(|err| HarnessError::Config(format!("unable to parse config: {err}")))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, HarnessError> {
        toml::to_string_pretty(self)
            .map_err(|err| HarnessError::Config(format!("unable to encode config: {err}")))
    }
}

fn default_amount(digits: &str) -> Amount {
    digits.parse().unwrap_or_default()
}
