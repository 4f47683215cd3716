//! Port of the original tracker's `infinityRateLimitRetry` generic: a call
//! that keeps retrying forever on HTTP 429, on the theory that the indexer's
//! rate limit always clears and the oracle would rather stall than give up
//! and miss a cycle. Every other error surfaces immediately.

use std::{future::Future, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::error::ChainError;

const RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(500);

pub async fn retry_on_rate_limit<F, Fut, T>(cancel: &CancellationToken, mut call: F) -> Result<T, ChainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ChainError>>
{
    loop {
        match call().await {
            Err(ChainError::RateLimited) => {
                tracing::debug!("chain api rate limited, backing off");
                tokio::select! {
                    _ = tokio::time::sleep(RATE_LIMIT_BACKOFF) => continue,
                    _ = cancel.cancelled() => return Err(ChainError::Cancelled),
                }
            }
            result => return result
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test]
    async fn retries_until_success() {
        let attempts = AtomicU32::new(0);
        let cancel = CancellationToken::new();
        let result = retry_on_rate_limit(&cancel, || async {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(ChainError::RateLimited)
            } else {
                Ok(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_rate_limit_errors_pass_through_immediately() {
        let cancel = CancellationToken::new();
        let result: Result<(), ChainError> =
            retry_on_rate_limit(&cancel, || async { Err(ChainError::Http(500)) }).await;
        assert!(matches!(result, Err(ChainError::Http(500))));
    }

    #[tokio::test]
    async fn cancellation_stops_the_retry_loop() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result: Result<(), ChainError> =
            retry_on_rate_limit(&cancel, || async { Err(ChainError::RateLimited) }).await;
        assert!(matches!(result, Err(ChainError::Cancelled)));
    }
}
