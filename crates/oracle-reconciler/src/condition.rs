//! Condition check and debounce (`spec.md` §4.6): once a user's counters
//! both saturate, send a `SetConditionMessage` via the wallet, debounced
//! by [`GLOBAL_DEPLOYED_TIMEOUT_SECONDS`] to avoid duplicate on-chain
//! writes while reconciliation outruns chain finalization.

use std::time::{SystemTime, UNIX_EPOCH};

use oracle_store::Store;
use oracle_types::{Address, RaffleParams, UserStatus};
use oracle_wallet::WalletSigner;

use crate::{constants::GLOBAL_DEPLOYED_TIMEOUT_SECONDS, error::ReconcileError};

fn now_unix_time() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).expect("system clock is after the unix epoch").as_secs() as i64
}

pub async fn check_and_send(
    store: &dyn Store,
    wallet: &dyn WalletSigner,
    raffle_address: Address,
    params: &RaffleParams,
    status: &UserStatus
) -> Result<(), ReconcileError> {
    if !params.conditions_reached(status.white_minted, status.black_purchased) {
        return Ok(());
    }

    let now = now_unix_time();
    if now - status.last_deployed_unix_time < GLOBAL_DEPLOYED_TIMEOUT_SECONDS {
        tracing::debug!(user = %status.user_address, "condition reached but debounce window still open");
        return Ok(());
    }

    wallet.send_set_condition(raffle_address, status.user_address, status.white_minted, status.black_purchased).await?;

    let mut deployed = status.clone();
    deployed.last_deployed_unix_time = now;
    store.upsert_status(&deployed).await?;
    Ok(())
}
