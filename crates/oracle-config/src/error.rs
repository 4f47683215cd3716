#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field}: {source}")]
    InvalidAddress {
        field:  &'static str,
        #[source]
        source: oracle_types::AddressError
    },

    #[error("WALLET_VERSION: unrecognized wallet version {0:?}")]
    InvalidWalletVersion(String)
}
