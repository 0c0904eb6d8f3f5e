use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed-interval retry budget of a bounded wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub attempts: u32,
}

impl PollConfig {
    pub const fn new(interval_ms: u64, attempts: u32) -> Self {
        Self {
            interval_ms,
            attempts,
        }
    }

    /// Child-chain watchers settle slowly: 6 s between 50 attempts.
    pub const fn child_chain() -> Self {
        Self::new(6_000, 50)
    }

    pub const fn root_chain() -> Self {
        Self::new(2_000, 30)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwaitTxOptions {
    pub interval_ms: u64,
    /// Confirmations required on top of the mining block. Zero accepts any receipt.
    pub blocks_to_wait: u64,
}

impl AwaitTxOptions {
    pub const DEFAULT_INTERVAL_MS: u64 = 1_000;

    pub fn confirmations(blocks_to_wait: u64) -> Self {
        Self {
            blocks_to_wait,
            ..Self::default()
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for AwaitTxOptions {
    fn default() -> Self {
        Self {
            interval_ms: Self::DEFAULT_INTERVAL_MS,
            blocks_to_wait: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub child_chain: PollConfig,
    pub root_chain: PollConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            child_chain: PollConfig::child_chain(),
            root_chain: PollConfig::root_chain(),
        }
    }
}
