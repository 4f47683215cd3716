//! Everything needed to talk to the TON indexer: the [`ChainGateway`] trait
//! the rest of the oracle programs against, the `reqwest`-backed
//! [`HttpChainGateway`] adapter, and the shared rate-limit retry combinator.

pub mod error;
pub mod gateway;
pub mod http;
pub mod model;
pub mod retry;

pub use error::ChainError;
pub use gateway::ChainGateway;
pub use http::HttpChainGateway;
pub use model::{AccountInfo, AccountStatus, InMessage, NftItemData, Stack, StackItem, Trace, Transaction};
pub use retry::retry_on_rate_limit;
