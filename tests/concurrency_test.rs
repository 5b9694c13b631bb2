//! Concurrency Integration Tests
//!
//! Overlapping calls that target the same state slot, resolved under both
//! response orderings, plus the concurrent post-payment refresh.
//!
//! Run with: cargo test --test concurrency_test -- --nocapture

mod common;

use ark_wallet_orchestrator::{Network, ResponseOrdering, Utxo};
use common::{utxo, TestEnvironment};
use std::time::{Duration, Instant};
use wallet_mock::{routes, Vtxo};

/// Two overlapping UTXO refreshes where the first-issued one resolves last
///
/// The first request sees `[1000]` and is held; the ledger then changes to
/// `[5]` and a second refresh completes immediately.
async fn overlapping_refreshes(env: &TestEnvironment) -> anyhow::Result<Vec<Utxo>> {
    env.backend.ledger().set_vtxos(vec![Vtxo::spendable(1000)]);
    env.backend.delay_next(routes::UTXOS, Duration::from_millis(400));

    let slow = env.wallet.refresh_utxos();
    let fast = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        env.backend.ledger().set_vtxos(vec![Vtxo::spendable(5)]);
        env.wallet.refresh_utxos().await
    };

    let (slow, fast) = tokio::join!(slow, fast);
    assert_eq!(slow?, vec![utxo(1000, false, true)]);
    assert_eq!(fast?, vec![utxo(5, false, true)]);

    Ok(env.wallet.state().utxos())
}

#[tokio::test]
async fn test_last_write_wins_keeps_late_response() -> anyhow::Result<()> {
    let env = TestEnvironment::with_ordering(ResponseOrdering::LastWriteWins).await?;

    let stored = overlapping_refreshes(&env).await?;

    assert_eq!(stored, vec![utxo(1000, false, true)]);
    Ok(())
}

#[tokio::test]
async fn test_discard_stale_keeps_newest_request() -> anyhow::Result<()> {
    let env = TestEnvironment::with_ordering(ResponseOrdering::DiscardStale).await?;

    let stored = overlapping_refreshes(&env).await?;

    assert_eq!(stored, vec![utxo(5, false, true)]);
    Ok(())
}

#[tokio::test]
async fn test_discard_stale_is_per_slot() -> anyhow::Result<()> {
    let env = TestEnvironment::with_ordering(ResponseOrdering::DiscardStale).await?;
    env.backend.ledger().set_vtxos(vec![Vtxo::spendable(800)]);
    env.backend.delay_next(routes::UTXOS, Duration::from_millis(300));

    // A balance refresh issued later does not invalidate the UTXO response
    let (utxos, balances) = tokio::join!(env.wallet.refresh_utxos(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        env.wallet.refresh_balances().await
    });
    utxos?;
    balances?;

    assert_eq!(env.wallet.state().utxos(), vec![utxo(800, false, true)]);
    assert_eq!(env.wallet.state().balances().offchain, 800);
    Ok(())
}

#[tokio::test]
async fn test_post_payment_refreshes_run_concurrently() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    env.backend.ledger().set_vtxos(vec![Vtxo::spendable(10_000)]);
    env.backend.delay_next(routes::BALANCE, Duration::from_millis(300));
    env.backend.delay_next(routes::UTXOS, Duration::from_millis(300));

    let started = Instant::now();
    env.wallet
        .send_payment(Network::Offchain, "tark1qrecipient", "2500")
        .await?;
    let elapsed = started.elapsed();

    assert!(
        elapsed < Duration::from_millis(550),
        "refreshes ran sequentially: {:?}",
        elapsed
    );
    assert_eq!(env.wallet.state().balances().offchain, 7500);
    assert_eq!(env.backend.hits(routes::UTXOS), 1);
    Ok(())
}

#[tokio::test]
async fn test_independent_operations_in_flight() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    env.backend.ledger().set_boarding(2000);
    env.backend.delay_next(routes::CREATE_WALLET, Duration::from_millis(200));

    let (addresses, quote, sync) = tokio::join!(
        env.wallet.create_wallet(),
        env.wallet.estimate_fees("700", Network::Onchain),
        env.wallet.sync(),
    );

    assert!(addresses.is_ok());
    assert!(quote?.is_some());
    sync?;

    let snapshot = env.wallet.state().snapshot();
    assert!(snapshot.addresses.is_some());
    assert_eq!(snapshot.balances.onchain, 2000);
    assert_eq!(snapshot.fee_quote.total, 200);
    Ok(())
}
