#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("invalid wallet mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("wallet transport error: {0}")]
    Transport(String)
}
