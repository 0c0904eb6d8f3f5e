use plasma_amount::Amount;

use crate::transaction::MAX_INPUTS;
use crate::utxo::{Currency, Utxo};

/// Greedily selects inputs of `currency` covering `amount` (plus `fee` when `currency` is the
/// fee currency), largest first.
///
/// When the fee is paid in another currency, the first `fee_currency` UTXO in `utxos` is appended
/// as the fee leg and the primary selection is capped one short of [`MAX_INPUTS`] to leave room
/// for it.
///
/// Selection is best effort: if the capped inputs do not cover the target they are returned
/// anyway and the builder reports the shortfall. Returns `None` when no input of `currency`
/// could be selected at all.
pub fn select_utxos(
    utxos: &[Utxo],
    currency: &Currency,
    amount: &Amount,
    fee: &Amount,
    fee_currency: &Currency,
) -> Option<Vec<Utxo>> {
    let pays_fee = currency == fee_currency;
    let needs_fee_leg = !pays_fee && !fee.is_zero();

    let target = if pays_fee { amount + fee } else { amount.clone() };
    let max_primary = if needs_fee_leg {
        MAX_INPUTS - 1
    } else {
        MAX_INPUTS
    };

    let mut indices: Vec<usize> = (0..utxos.len())
        .filter(|&i| &utxos[i].currency == currency)
        .collect();

    // Stable, so equal amounts keep their listing order.
    indices.sort_by(|&a, &b| utxos[b].amount.cmp(&utxos[a].amount));

    let mut selected = Vec::with_capacity(MAX_INPUTS);
    let mut covered = Amount::zero();
    for i in indices.into_iter().take(max_primary) {
        if covered >= target {
            break;
        }
        covered = &covered + &utxos[i].amount;
        selected.push(utxos[i].clone());
    }

    if selected.is_empty() {
        return None;
    }

    if needs_fee_leg {
        if let Some(fee_utxo) = utxos.iter().find(|utxo| &utxo.currency == fee_currency) {
            selected.push(fee_utxo.clone());
        }
    }

    Some(selected)
}
