//! Exponential backoff for transient SerpApi failures.
//!
//! Only timeouts, connection failures and 5xx responses are retried.
//! Authentication, quota and request errors come back the same on every
//! attempt, so they are returned immediately. So are `reqwest` builder,
//! redirect and body-decode errors.

use std::future::Future;
use std::time::Duration;

use crate::error::SerpApiError;

fn is_retriable(err: &SerpApiError) -> bool {
    match err {
        SerpApiError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SerpApiError::Upstream { .. } => true,
        SerpApiError::MissingApiKey
        | SerpApiError::InvalidBaseUrl { .. }
        | SerpApiError::Unauthorized(_)
        | SerpApiError::QuotaExceeded(_)
        | SerpApiError::BadRequest(_)
        | SerpApiError::Deserialize { .. } => false,
    }
}

/// Runs `operation`, retrying transient errors up to `max_retries` extra
/// times with a delay of `backoff_base_secs * 2^attempt` seconds.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, SerpApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SerpApiError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient SerpApi error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn upstream() -> SerpApiError {
        SerpApiError::Upstream {
            status: 503,
            message: "service unavailable".to_owned(),
        }
    }

    #[tokio::test]
    async fn retries_upstream_error_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(2, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                if cc.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(upstream())
                } else {
                    Ok::<u32, SerpApiError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(1, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, SerpApiError>(upstream())
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
        assert!(matches!(result, Err(SerpApiError::Upstream { .. })));
    }

    #[tokio::test]
    async fn quota_and_auth_errors_are_not_retried() {
        for err in [
            SerpApiError::QuotaExceeded("out of searches".to_owned()),
            SerpApiError::Unauthorized("invalid api key".to_owned()),
            SerpApiError::BadRequest("missing q".to_owned()),
        ] {
            let call_count = Arc::new(AtomicU32::new(0));
            let cc = Arc::clone(&call_count);
            let mut slot = Some(err);
            let result = retry_with_backoff(3, 0, || {
                cc.fetch_add(1, Ordering::SeqCst);
                let err = slot.take().unwrap_or(SerpApiError::MissingApiKey);
                async move { Err::<u32, SerpApiError>(err) }
            })
            .await;
            assert!(result.is_err());
            assert_eq!(call_count.load(Ordering::SeqCst), 1);
        }
    }

    fn builder_error() -> reqwest::Error {
        reqwest::Client::new()
            .get("not a url")
            .build()
            .expect_err("invalid url fails to build")
    }

    #[tokio::test]
    async fn builder_errors_are_not_retried() {
        let err = SerpApiError::Http(builder_error());
        assert!(!is_retriable(&err));

        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, SerpApiError>(SerpApiError::Http(builder_error()))
            }
        })
        .await;
        assert!(matches!(result, Err(SerpApiError::Http(_))));
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn connection_refused_is_retried() {
        let client = reqwest::Client::new();
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(1, 0, || {
            let cc = Arc::clone(&cc);
            let client = client.clone();
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                client.get("http://127.0.0.1:9/").send().await?;
                Ok::<u32, SerpApiError>(0)
            }
        })
        .await;
        assert!(matches!(result, Err(SerpApiError::Http(ref e)) if e.is_connect()));
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }
}
