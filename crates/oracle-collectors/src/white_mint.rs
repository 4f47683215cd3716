//! White-ticket mint collector: crawls the white-ticket NFT collection
//! account, threading the collection-side mint-opcode marker down each
//! root-to-node path (`spec.md` §4.4).

use oracle_chain::{ChainGateway, Trace};
use oracle_decoder::white_mint;
use oracle_store::Store;
use oracle_types::{Address, ActionKind, Lt, TouchScope, UserAction, UserActionTouch};
use oracle_walker::walk_stateful;

use crate::{crawl::run_paged_crawl, error::CollectError};

pub async fn collect_white_mints(
    gateway: &dyn ChainGateway,
    store: &dyn Store,
    white_ticket_collection_address: Address,
    lt_floor_deploy: Lt
) -> Result<(), CollectError> {
    let lt_floor_touch = store.get_touch(ActionKind::WhiteMint, TouchScope::Global).await?;

    let (max_lt_seen, actions) =
        run_paged_crawl(gateway, &white_ticket_collection_address, lt_floor_deploy, lt_floor_touch, |trace: &Trace| {
            Box::pin(async move {
                let mut found = Vec::new();
                let min_lt = walk_stateful(
                    Some(trace),
                    false,
                    |ancestor_marker: &bool, node: &Trace| *ancestor_marker || white_mint::marks_mint(&node.transaction),
                    &mut |node: &Trace, has_marker: &bool| {
                        if node.transaction.lt > lt_floor_touch {
                            if let Some(mint) = white_mint::classify(&node.transaction, *has_marker) {
                                found.push(UserAction {
                                    kind:            ActionKind::WhiteMint,
                                    user_address:    mint.user_address,
                                    related_address: mint.item_address,
                                    tx_hash:         node.transaction.hash,
                                    tx_lt:           node.transaction.lt,
                                    tx_unix_time:    node.transaction.unix_time
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
        store
            .put_touch(UserActionTouch { kind: ActionKind::WhiteMint, scope: TouchScope::Global, tx_lt: max_lt_seen })
            .await?;
    }
    if !actions.is_empty() {
        store.append_actions(&actions).await?;
    }
    Ok(())
}
