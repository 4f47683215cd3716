//! Participant sync: refreshes `participant_reg_lt` on each affected
//! user's status (`spec.md` §4.6 step 2). Replays are tolerated — a
//! pending action for a user without a status row yet is skipped, since
//! statuses are only created by candidate sync.

use std::collections::HashMap;

use oracle_store::Store;
use oracle_types::{Address, Lt};

use crate::error::ReconcileError;

pub async fn sync_participants(store: &dyn Store) -> Result<(), ReconcileError> {
    let pending = store.get_pending_participant_regs().await?;
    if pending.is_empty() {
        return Ok(());
    }

    let mut max_lt_by_user: HashMap<Address, Lt> = HashMap::new();
    for action in &pending {
        let entry = max_lt_by_user.entry(action.user_address).or_insert(0);
        *entry = (*entry).max(action.tx_lt);
    }

    let addresses: Vec<Address> = max_lt_by_user.keys().copied().collect();
    let mut statuses = store.get_statuses(&addresses).await?;

    let mut updated = Vec::with_capacity(statuses.len());
    for status in &mut statuses {
        if let Some(&tx_lt) = max_lt_by_user.get(&status.user_address) {
            status.participant_reg_lt = status.participant_reg_lt.max(tx_lt);
            updated.push(status.clone());
        }
    }

    if !updated.is_empty() {
        store.upsert_statuses(&updated).await?;
    }
    Ok(())
}
