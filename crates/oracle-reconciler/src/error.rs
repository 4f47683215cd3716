#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Store(#[from] oracle_store::StoreError),

    #[error(transparent)]
    Wallet(#[from] oracle_wallet::WalletError)
}
