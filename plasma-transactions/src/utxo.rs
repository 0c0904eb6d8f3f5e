use std::fmt;

use plasma_amount::Amount;
use serde::{Deserialize, Serialize};

/// Declares a lowercase-normalised hex identifier newtype (addresses, currencies, hashes).
///
/// Values are lowercased on construction, so equality and ordering are case-insensitive with
/// respect to the original input. The type (de)serializes as a plain string.
#[macro_export]
macro_rules! declare_hex_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl AsRef<str>) -> Self {
                Self(value.as_ref().to_ascii_lowercase())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

declare_hex_identifier!(
    /// A token contract address identifying the currency of an output.
    Currency
);

declare_hex_identifier!(
    /// A child-chain or root-chain account address.
    Address
);

impl Currency {
    pub const ETH_ADDRESS: &'static str = "0x0000000000000000000000000000000000000000";

    /// The native root-chain currency, encoded as the zero address.
    pub fn eth() -> Self {
        Self::new(Self::ETH_ADDRESS)
    }

    pub fn is_eth(&self) -> bool {
        self.0 == Self::ETH_ADDRESS
    }
}

const BLOCK_OFFSET: u128 = 1_000_000_000;
const TX_OFFSET: u128 = 10_000;

/// Where an output lives on the child chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtxoPosition {
    pub blknum: u64,
    pub txindex: u32,
    pub oindex: u8,
}

impl UtxoPosition {
    pub fn new(blknum: u64, txindex: u32, oindex: u8) -> Self {
        Self {
            blknum,
            txindex,
            oindex,
        }
    }

    /// Packs the position into the single integer the root-chain contracts use.
    pub fn encode(&self) -> u128 {
        self.blknum as u128 * BLOCK_OFFSET + self.txindex as u128 * TX_OFFSET + self.oindex as u128
    }

    pub fn decode(encoded: u128) -> Option<Self> {
        let blknum = u64::try_from(encoded / BLOCK_OFFSET).ok()?;
        let txindex = u32::try_from((encoded % BLOCK_OFFSET) / TX_OFFSET).ok()?;
        let oindex = u8::try_from(encoded % TX_OFFSET).ok()?;
        Some(Self::new(blknum, txindex, oindex))
    }
}

impl fmt::Display for UtxoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.blknum, self.txindex, self.oindex)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Utxo {
    #[serde(flatten)]
    pub position: UtxoPosition,
    pub owner: Address,
    pub currency: Currency,
    #[serde(
        serialize_with = "crate::serde::serialize_amount",
        deserialize_with = "crate::serde::deserialize_amount"
    )]
    pub amount: Amount,
}

/// One entry of an account balance listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub currency: Currency,
    #[serde(
        serialize_with = "crate::serde::serialize_amount",
        deserialize_with = "crate::serde::deserialize_amount"
    )]
    pub amount: Amount,
}

/// Finds the entry for `currency` in a balance listing.
pub fn balance_of<'a>(balances: &'a [Balance], currency: &Currency) -> Option<&'a Balance> {
    balances.iter().find(|balance| &balance.currency == currency)
}
