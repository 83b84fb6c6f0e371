//! Rate-limited HTTP plumbing shared by the vendor clients.

use crate::error::{DataError, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// Request timeout applied by every vendor client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent to vendors.
const USER_AGENT: &str = concat!("sift/", env!("CARGO_PKG_VERSION"));

/// Enforces a minimum interval between consecutive requests.
///
/// One limiter is owned per host and shared by every task issuing requests
/// to it, so the interval holds in aggregate no matter how many screening
/// workers are running.
#[derive(Debug)]
pub struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    /// Create a limiter with the given minimum interval.
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    /// Minimum interval between requests.
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next request may be sent, then record it.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// A `reqwest` client paired with the rate limiter for its host.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl HttpClient {
    pub(crate) fn new(min_interval: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(min_interval))),
        })
    }

    pub(crate) fn min_interval(&self) -> Duration {
        self.rate_limiter
            .try_lock()
            .map(|limiter| limiter.min_interval())
            .unwrap_or_default()
    }

    /// GET `url` and decode the JSON body.
    ///
    /// `404 Not Found` means the vendor has no data for the request and maps
    /// to `Ok(None)`. Any other non-success status is an error.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&'static str, String)],
        context: &str,
    ) -> Result<Option<T>> {
        self.rate_limiter.lock().await.wait().await;

        tracing::debug!(url, context, "GET");
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        let response = request.send().await.map_err(DataError::Network)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                context: context.to_string(),
            });
        }

        let body = response.text().await.map_err(DataError::Network)?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| DataError::Parse(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(200));
        let start = Instant::now();

        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;

        // First request is immediate, the next two each wait a full interval
        assert!(start.elapsed() >= Duration::from_millis(400));
        assert!(start.elapsed() < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limiter_first_request_is_immediate() {
        let mut limiter = RateLimiter::new(Duration::from_secs(2));
        let start = Instant::now();
        limiter.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_limiter_holds_across_tasks() {
        let limiter = Arc::new(Mutex::new(RateLimiter::new(Duration::from_millis(100))));
        let start = Instant::now();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move { limiter.lock().await.wait().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[test]
    fn test_http_client_reports_interval() {
        let client = HttpClient::new(Duration::from_millis(120)).unwrap();
        assert_eq!(client.min_interval(), Duration::from_millis(120));
    }
}
