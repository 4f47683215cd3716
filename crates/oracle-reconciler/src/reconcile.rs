//! Runs the four reconciliation sub-steps in order, after all collectors
//! have run for the cycle (`spec.md` §4.6/§4.7).

use oracle_store::Store;
use oracle_types::{Address, RaffleParams};
use oracle_wallet::WalletSigner;

use crate::{candidate, condition, counter, error::ReconcileError, participant};

pub async fn run_reconcile(
    store: &dyn Store,
    wallet: &dyn WalletSigner,
    raffle_address: Address,
    params: &RaffleParams
) -> Result<(), ReconcileError> {
    candidate::sync_candidates(store).await?;
    participant::sync_participants(store).await?;

    let pending_white = store.get_pending_white_mints().await?;
    let white_updated = counter::sync_counter(store, pending_white, |status, count, max_tx_lt| {
        status.add_white_minted(count);
        status.white_processed_lt = status.white_processed_lt.max(max_tx_lt);
    })
    .await?;
    for status in &white_updated {
        condition::check_and_send(store, wallet, raffle_address, params, status).await?;
    }

    let pending_black = store.get_pending_black_purchases().await?;
    let black_updated = counter::sync_counter(store, pending_black, |status, count, max_tx_lt| {
        status.add_black_purchased(count);
        status.black_processed_lt = status.black_processed_lt.max(max_tx_lt);
    })
    .await?;
    for status in &black_updated {
        condition::check_and_send(store, wallet, raffle_address, params, status).await?;
    }

    Ok(())
}
