use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::AwaitTxOptions;
use crate::error::{QueryError, TrackerError};
use crate::query::{BlockId, RootChainQuery, TransactionReceipt, TxHash};

enum AwaitState {
    AwaitingReceipt,
    AwaitingDepth(TransactionReceipt),
}

/// Polls until `hash` is mined and, when `blocks_to_wait > 0`, buried that deep.
///
/// There is no attempt cap: a submitted transaction is assumed to be mined eventually. Once the
/// depth is reached the transaction is looked up again; if it no longer reports a block the
/// block was orphaned and the wait fails with [`TrackerError::UncleBlock`]. If it reports a
/// different block it was re-mined and the depth count starts over from that block.
pub async fn await_tx<R>(
    root: &R,
    hash: &TxHash,
    options: &AwaitTxOptions,
) -> Result<TransactionReceipt, TrackerError>
where
    R: RootChainQuery + ?Sized,
{
    let mut state = AwaitState::AwaitingReceipt;

    loop {
        state = match state {
            AwaitState::AwaitingReceipt => match root.get_transaction_receipt(hash).await {
                Ok(Some(receipt)) if options.blocks_to_wait == 0 => {
                    info!(tx = %hash, block = ?receipt.block_number, "Transaction mined");
                    return Ok(receipt);
                }
                Ok(Some(receipt)) => AwaitState::AwaitingDepth(receipt),
                Ok(None) => {
                    debug!(tx = %hash, "Waiting for receipt");
                    AwaitState::AwaitingReceipt
                }
                Err(err) => {
                    retry_on(err, hash)?;
                    AwaitState::AwaitingReceipt
                }
            },
            AwaitState::AwaitingDepth(receipt) => {
                match check_depth(root, hash, receipt, options.blocks_to_wait).await? {
                    Depth::Confirmed(receipt) => {
                        info!(
                            tx = %hash,
                            block = ?receipt.block_number,
                            confirmations = options.blocks_to_wait,
                            "Transaction confirmed"
                        );
                        return Ok(receipt);
                    }
                    Depth::Pending(receipt) => AwaitState::AwaitingDepth(receipt),
                    Depth::Lost => AwaitState::AwaitingReceipt,
                }
            }
        };

        sleep(options.interval()).await;
    }
}

enum Depth {
    Confirmed(TransactionReceipt),
    Pending(TransactionReceipt),
    /// The receipt disappeared; start over.
    Lost,
}

async fn check_depth<R>(
    root: &R,
    hash: &TxHash,
    receipt: TransactionReceipt,
    blocks_to_wait: u64,
) -> Result<Depth, TrackerError>
where
    R: RootChainQuery + ?Sized,
{
    let Some(mined_in) = receipt.block_number else {
        return match root.get_transaction_receipt(hash).await {
            Ok(Some(fresh)) => Ok(Depth::Pending(fresh)),
            Ok(None) => Ok(Depth::Lost),
            Err(err) => retry_on(err, hash).map(|_| Depth::Pending(receipt)),
        };
    };

    let head = match root.get_block(BlockId::Latest).await {
        Ok(Some(block)) => block.number,
        Ok(None) => return Ok(Depth::Pending(receipt)),
        Err(err) => return retry_on(err, hash).map(|_| Depth::Pending(receipt)),
    };

    let depth = head.saturating_sub(mined_in);
    if depth < blocks_to_wait {
        debug!(tx = %hash, depth, blocks_to_wait, "Waiting for confirmations");
        return Ok(Depth::Pending(receipt));
    }

    let transaction = match root.get_transaction(hash).await {
        Ok(transaction) => transaction,
        Err(err) => return retry_on(err, hash).map(|_| Depth::Pending(receipt)),
    };

    match transaction.and_then(|tx| tx.block_number) {
        Some(block) if block == mined_in => Ok(Depth::Confirmed(receipt)),
        Some(block) => {
            warn!(tx = %hash, from = mined_in, to = block, "Transaction re-mined, restarting confirmation count");
            Ok(Depth::Pending(TransactionReceipt {
                block_number: Some(block),
                ..receipt
            }))
        }
        None => Err(TrackerError::UncleBlock(hash.clone())),
    }
}

fn retry_on(err: QueryError, hash: &TxHash) -> Result<(), TrackerError> {
    if err.is_fatal() {
        return Err(err.into());
    }
    warn!(tx = %hash, error = %err, "Query failed, retrying");
    Ok(())
}
