//! Shared white-mint / black-purchase counter sync (`spec.md` §4.6 steps
//! 3-4): group pending actions by user, fold into a saturating counter
//! bump plus a high-water `*_processed_lt`, and persist. The two steps
//! differ only in which fields of `UserStatus` they touch, supplied by
//! the caller as `apply`.

use std::collections::HashMap;

use oracle_store::Store;
use oracle_types::{Address, Lt, UserAction, UserStatus};

use crate::error::ReconcileError;

pub async fn sync_counter(
    store: &dyn Store,
    pending: Vec<UserAction>,
    apply: impl Fn(&mut UserStatus, u8, Lt)
) -> Result<Vec<UserStatus>, ReconcileError> {
    if pending.is_empty() {
        return Ok(Vec::new());
    }

    let mut grouped: HashMap<Address, (u8, Lt)> = HashMap::new();
    for action in &pending {
        let entry = grouped.entry(action.user_address).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(1);
        entry.1 = entry.1.max(action.tx_lt);
    }

    let addresses: Vec<Address> = grouped.keys().copied().collect();
    let mut statuses = store.get_statuses(&addresses).await?;

    let mut updated = Vec::with_capacity(statuses.len());
    for status in &mut statuses {
        if let Some(&(count, max_tx_lt)) = grouped.get(&status.user_address) {
            apply(status, count, max_tx_lt);
            updated.push(status.clone());
        }
    }

    if updated.is_empty() {
        return Ok(Vec::new());
    }

    store.upsert_statuses(&updated).await?;
    Ok(updated)
}
