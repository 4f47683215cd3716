//! Candidate and participant registration collectors. Both crawl the
//! raffle account with a single global touch and differ only in op-code
//! and body layout (`spec.md` §4.4), so they share one driver.

use oracle_chain::{ChainGateway, Trace};
use oracle_store::Store;
use oracle_types::{Address, ActionKind, Lt, TouchScope, UserAction, UserActionTouch};
use oracle_walker::walk;

use crate::{crawl::run_paged_crawl, error::CollectError};

async fn collect_registration(
    gateway: &dyn ChainGateway,
    store: &dyn Store,
    raffle_address: Address,
    lt_floor_deploy: Lt,
    kind: ActionKind,
    classify: fn(&oracle_chain::Transaction) -> Option<Address>
) -> Result<(), CollectError> {
    let lt_floor_touch = store.get_touch(kind, TouchScope::Global).await?;

    let (max_lt_seen, actions) = run_paged_crawl(gateway, &raffle_address, lt_floor_deploy, lt_floor_touch, |trace: &Trace| {
        Box::pin(async move {
            let mut found = Vec::new();
            let min_lt = walk(
                Some(trace),
                &mut |node: &Trace| {
                    if node.transaction.lt > lt_floor_touch {
                        if let Some(user_address) = classify(&node.transaction) {
                            found.push(UserAction {
                                kind,
                                user_address,
                                related_address: node.transaction.account,
                                tx_hash: node.transaction.hash,
                                tx_lt: node.transaction.lt,
                                tx_unix_time: node.transaction.unix_time
                            });
                        }
                    }
                },
                lt_floor_deploy,
                lt_floor_touch
            );
            Ok((min_lt, found))
        })
    })
    .await?;

    if max_lt_seen > lt_floor_touch {
        store.put_touch(UserActionTouch { kind, scope: TouchScope::Global, tx_lt: max_lt_seen }).await?;
    }
    if !actions.is_empty() {
        store.append_actions(&actions).await?;
    }
    Ok(())
}

pub async fn collect_candidate_registrations(
    gateway: &dyn ChainGateway,
    store: &dyn Store,
    raffle_address: Address,
    lt_floor_deploy: Lt
) -> Result<(), CollectError> {
    collect_registration(gateway, store, raffle_address, lt_floor_deploy, ActionKind::CandidateReg, |tx| {
        oracle_decoder::candidate::classify(tx).map(|reg| reg.user_address)
    })
    .await
}

pub async fn collect_participant_registrations(
    gateway: &dyn ChainGateway,
    store: &dyn Store,
    raffle_address: Address,
    lt_floor_deploy: Lt
) -> Result<(), CollectError> {
    collect_registration(gateway, store, raffle_address, lt_floor_deploy, ActionKind::ParticipantReg, |tx| {
        oracle_decoder::participant::classify(tx).map(|reg| reg.user_address)
    })
    .await
}
