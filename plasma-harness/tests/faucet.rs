mod common;

use anyhow::Result;
use common::{account, config, eth, harness, token, Ledger, FEE};
use plasma_amount::Amount;
use plasma_harness::{Faucet, HarnessError};
use plasma_transactions::Address;

fn funded_config(min_balance: u64, top_up: u64) -> plasma_harness::HarnessConfig {
    let mut config = config();
    config.faucet.address = Some(Address::from("0xfa0ce7"));
    config.faucet.private_key = Some(plasma_harness::SigningKey::new("faucet-key"));
    config.faucet.min_balance = Amount::from(min_balance);
    config.faucet.top_up = Amount::from(top_up);
    config
}

#[tokio::test(start_paused = true)]
async fn init_tops_up_an_underfunded_faucet() -> Result<()> {
    let ledger = Ledger::new();
    let harness = harness(&ledger, funded_config(1_000, 5_000));
    let faucet = Faucet::from_config(&harness)?;
    ledger.credit(faucet.address(), &eth(), 10);

    let balance = faucet.init().await?;

    assert_eq!(balance, Amount::from(5_010u64));
    assert_eq!(ledger.deposits(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn init_leaves_a_funded_faucet_alone() -> Result<()> {
    let ledger = Ledger::new();
    let harness = harness(&ledger, funded_config(1_000, 5_000));
    let faucet = Faucet::from_config(&harness)?;
    ledger.credit(faucet.address(), &eth(), 1_000);

    assert_eq!(faucet.init().await?, Amount::from(1_000u64));
    assert_eq!(ledger.deposits(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn from_config_requires_faucet_account() {
    let ledger = Ledger::new();
    let harness = harness(&ledger, config());

    assert!(matches!(
        Faucet::from_config(&harness),
        Err(HarnessError::Config(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn funds_and_recovers_test_accounts() -> Result<()> {
    let ledger = Ledger::new();
    let harness = harness(&ledger, funded_config(1_000, 5_000));
    let faucet = Faucet::from_config(&harness)?;
    ledger.credit(faucet.address(), &eth(), 10_000);
    ledger.credit(faucet.address(), &token(), 800);
    let alice = account("0xa11ce");

    assert!(faucet.fund_account(&alice.address, &eth(), 300).await?.is_some());
    assert!(faucet.fund_account(&alice.address, &token(), "500").await?.is_some());
    assert!(faucet.fund_account(&alice.address, &token(), 0).await?.is_none());
    assert!(faucet.fund_account(&alice.address, &eth(), "-5").await?.is_none());

    assert_eq!(ledger.total_of(&alice.address, &eth()), 300);
    assert_eq!(ledger.total_of(&alice.address, &token()), 500);
    assert_eq!(ledger.total_of(faucet.address(), &eth()), 10_000 - 300 - 2 * FEE);

    let returned = faucet.return_funds(&alice).await?;

    assert_eq!(returned.len(), 2);
    assert!(ledger.utxos_of(&alice.address).is_empty());
    assert_eq!(ledger.total_of(faucet.address(), &token()), 800);
    assert_eq!(ledger.total_of(faucet.address(), &eth()), 10_000 - 4 * FEE);
    Ok(())
}
