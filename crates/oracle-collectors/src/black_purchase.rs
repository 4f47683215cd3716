//! Black-ticket purchase collector: one crawl per known candidate user,
//! rooted at the user's own account, skipping users whose conditions are
//! already reached (`spec.md` §4.5). Per-node classification needs the
//! chain gateway (marketplace/collection lookups), so each root trace is
//! first walked synchronously to collect candidate transactions, then
//! classified asynchronously.

use oracle_chain::{ChainGateway, Trace};
use oracle_decoder::black_purchase;
use oracle_store::Store;
use oracle_types::{Address, ActionKind, Lt, TouchScope, UserAction, UserActionTouch, COUNTER_CEILING};
use oracle_walker::walk;

use crate::{crawl::run_paged_crawl, error::CollectError};

pub async fn collect_black_purchases(
    gateway: &dyn ChainGateway,
    store: &dyn Store,
    black_ticket_collection: Address,
    lt_floor_deploy: Lt
) -> Result<(), CollectError> {
    let candidate_actions = store.get_actions(ActionKind::CandidateReg).await?;

    for candidate in candidate_actions {
        let user = candidate.user_address;

        if let Some(status) = store.get_status(&user).await? {
            if status.white_minted == COUNTER_CEILING && status.black_purchased == COUNTER_CEILING {
                tracing::debug!(user = %user, "black purchase: conditions already reached, skipping user");
                continue;
            }
        }

        collect_black_purchases_for_user(gateway, store, user, black_ticket_collection, lt_floor_deploy).await?;
    }

    Ok(())
}

async fn collect_black_purchases_for_user(
    gateway: &dyn ChainGateway,
    store: &dyn Store,
    user: Address,
    black_ticket_collection: Address,
    lt_floor_deploy: Lt
) -> Result<(), CollectError> {
    let lt_floor_touch = store.get_touch(ActionKind::BlackPurchase, TouchScope::User(user)).await?;

    let (max_lt_seen, actions) = run_paged_crawl(gateway, &user, lt_floor_deploy, lt_floor_touch, |trace: &Trace| {
        Box::pin(async move {
            let mut candidates = Vec::new();
            let min_lt = walk(
                Some(trace),
                &mut |node: &Trace| {
                    if node.transaction.lt > lt_floor_touch {
                        candidates.push(node.transaction.clone());
                    }
                },
                lt_floor_deploy,
                lt_floor_touch
            );

            let mut found = Vec::new();
            for tx in &candidates {
                if let Some(purchase) = black_purchase::classify(gateway, tx, &black_ticket_collection).await? {
                    found.push(UserAction {
                        kind:            ActionKind::BlackPurchase,
                        user_address:    purchase.user_address,
                        related_address: purchase.item_address,
                        tx_hash:         tx.hash,
                        tx_lt:           tx.lt,
                        tx_unix_time:    tx.unix_time
                    });
                }
            }
            Ok((min_lt, found))
        })
    })
    .await?;

    if max_lt_seen > lt_floor_touch {
        store
            .put_touch(UserActionTouch { kind: ActionKind::BlackPurchase, scope: TouchScope::User(user), tx_lt: max_lt_seen })
            .await?;
    }
    if !actions.is_empty() {
        store.append_actions(&actions).await?;
    }
    Ok(())
}
