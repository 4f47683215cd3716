#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("chain api returned http {0}")]
    Http(u16),

    #[error("chain api transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chain api response did not match the expected shape: {0}")]
    UnexpectedShape(String),

    #[error("rate limited")]
    RateLimited,

    #[error("cancelled")]
    Cancelled
}
