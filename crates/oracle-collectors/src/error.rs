#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Chain(#[from] oracle_chain::ChainError),

    #[error(transparent)]
    Store(#[from] oracle_store::StoreError)
}
