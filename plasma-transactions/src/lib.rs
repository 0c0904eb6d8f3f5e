//! Client-side construction of child-chain payment transactions.
//!
//! [`select_utxos`] picks inputs out of a wallet snapshot, [`TransactionBuilder`] turns them and a
//! set of [`Payment`]s into a balanced [`TransactionBody`] with change and an implicit fee, and
//! [`split`] fans a single UTXO out into equal parts. Nothing here performs I/O or signs.

pub mod builder;
pub mod error;
pub mod fee;
pub mod selection;
pub mod serde;
pub mod transaction;
pub mod utxo;

pub use builder::{split, TransactionBuilder};
pub use error::TxError;
pub use fee::{FeeEntry, FeeSchedule, PAYMENT_TX_TYPE};
pub use selection::select_utxos;
pub use transaction::{Output, Payment, TransactionBody, MAX_INPUTS, MAX_OUTPUTS};
pub use utxo::{balance_of, Address, Balance, Currency, Utxo, UtxoPosition};

pub use plasma_amount::{parse_amount, Amount};
