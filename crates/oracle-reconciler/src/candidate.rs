//! Candidate sync: every pending candidate-registration action seeds a
//! fresh `UserStatus` row (`spec.md` §4.6 step 1).

use oracle_store::Store;
use oracle_types::UserStatus;

use crate::error::ReconcileError;

pub async fn sync_candidates(store: &dyn Store) -> Result<(), ReconcileError> {
    let pending = store.get_pending_candidate_regs().await?;
    if pending.is_empty() {
        return Ok(());
    }

    let statuses: Vec<UserStatus> =
        pending.into_iter().map(|action| UserStatus::new_candidate(action.user_address, action.tx_lt)).collect();

    store.upsert_statuses(&statuses).await?;
    Ok(())
}
