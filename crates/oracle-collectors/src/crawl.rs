//! The paged-descending crawl template shared by all four collectors
//! (`spec.md` §4.5). Each collector supplies `visit_root`, an async
//! per-root-trace callback that classifies whatever it finds in that trace
//! tree and returns the minimum LT the walker visited (used as the next
//! page cursor) alongside any `UserAction`s to append.

use futures::future::BoxFuture;
use oracle_chain::{ChainError, ChainGateway, Trace};
use oracle_types::{Address, Lt, UserAction};

/// `spec.md` §6's `GlobalLimitWindowSize`.
pub const GLOBAL_LIMIT_WINDOW_SIZE: u32 = 50;

/// Runs the shared crawl template against `root_account`, returning the
/// highest LT observed across the whole crawl (the candidate touch value,
/// written by the caller only if it advances past `lt_floor_touch`) and
/// every action the walk accepted.
pub async fn run_paged_crawl<F>(
    gateway: &dyn ChainGateway,
    root_account: &Address,
    lt_floor_deploy: Lt,
    lt_floor_touch: Lt,
    mut visit_root: F
) -> Result<(Lt, Vec<UserAction>), ChainError>
where
    F: FnMut(&Trace) -> BoxFuture<'_, Result<(Lt, Vec<UserAction>), ChainError>>
{
    let mut before_lt: Lt = 0;
    let mut max_lt_seen: Lt = 0;
    let mut actions = Vec::new();

    loop {
        let page = gateway.list_traces(root_account, before_lt, GLOBAL_LIMIT_WINDOW_SIZE).await?;
        let page_len = page.len();

        let mut root_lt_reached_touch_floor = false;
        let mut last_root_lt = 0;

        for trace in &page {
            last_root_lt = trace.transaction.lt;
            max_lt_seen = max_lt_seen.max(last_root_lt);

            if last_root_lt <= lt_floor_touch {
                root_lt_reached_touch_floor = true;
                break;
            }

            let (min_lt, mut found) = visit_root(trace).await?;
            before_lt = min_lt;
            actions.append(&mut found);

            if before_lt < lt_floor_deploy {
                break;
            }
        }

        let page_exhausted = page_len < GLOBAL_LIMIT_WINDOW_SIZE as usize;
        if page_exhausted || before_lt < lt_floor_deploy || root_lt_reached_touch_floor || last_root_lt <= lt_floor_touch {
            break;
        }
    }

    Ok((max_lt_seen, actions))
}
