use async_trait::async_trait;
use oracle_types::{Address, Lt};

use crate::{
    error::ChainError,
    model::{AccountInfo, NftItemData, Stack, StackItem, Trace}
};

/// Everything the collectors, the reconciler's sync step, and the wallet
/// transport need from the indexer. One concrete adapter exists
/// ([`crate::http::HttpChainGateway`]); tests implement this directly with
/// fixture data instead of standing up a fake HTTP server.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Pages a single account's trace list backwards from `before_lt`,
    /// newest traces first within the page (`spec.md` §4.2's "paged
    /// descending by LT") so the running minimum LT a collector folds
    /// across the page is a valid cursor for the next, strictly-older
    /// page. `limit` bounds the page size (the original's
    /// `GlobalLimitWindowSize`, 50).
    async fn list_traces(&self, account: &Address, before_lt: Lt, limit: u32) -> Result<Vec<Trace>, ChainError>;

    /// Fetches a single trace tree by its root transaction hash.
    async fn get_trace(&self, root_tx_hash: &[u8; 32]) -> Result<Option<Trace>, ChainError>;

    async fn get_account(&self, account: &Address) -> Result<AccountInfo, ChainError>;

    /// Executes a get-method on `account`, returning its result stack.
    /// Errors (method missing, TVM exit code != 0) surface as
    /// [`ChainError::UnexpectedShape`]; callers that treat a failed getter
    /// as a shape mismatch rather than a hard error should match on that
    /// variant and fall back to `None`.
    async fn exec_getter(&self, account: &Address, method: &str, args: &[StackItem]) -> Result<Stack, ChainError>;

    async fn get_nft_item(&self, account: &Address) -> Result<NftItemData, ChainError>;
}
