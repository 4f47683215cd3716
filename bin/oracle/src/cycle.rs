//! One pipeline cycle: the four collectors in fixed order, then the
//! reconciler (`spec.md` §4.7). Errors from any phase abort the cycle;
//! the orchestrator's outer loop simply starts the next cycle, and every
//! phase re-derives its own floor from stored touches, so nothing is lost.

use oracle_chain::ChainGateway;
use oracle_store::Store;
use oracle_types::{Address, Lt, RaffleParams};
use oracle_wallet::WalletSigner;

pub struct CycleConfig {
    pub raffle_address:                  Address,
    pub white_ticket_collection_address:  Address,
    pub black_ticket_collection_address:  Address,
    pub lt_floor_deploy:                  Lt
}

pub async fn run_cycle(
    gateway: &dyn ChainGateway,
    store: &dyn Store,
    wallet: &dyn WalletSigner,
    config: &CycleConfig,
    params: &RaffleParams
) -> eyre::Result<()> {
    oracle_collectors::collect_candidate_registrations(gateway, store, config.raffle_address, config.lt_floor_deploy).await?;
    oracle_collectors::collect_white_mints(gateway, store, config.white_ticket_collection_address, config.lt_floor_deploy)
        .await?;
    oracle_collectors::collect_black_purchases(gateway, store, config.black_ticket_collection_address, config.lt_floor_deploy)
        .await?;
    oracle_collectors::collect_participant_registrations(gateway, store, config.raffle_address, config.lt_floor_deploy)
        .await?;
    oracle_reconciler::run_reconcile(store, wallet, config.raffle_address, params).await?;
    Ok(())
}
