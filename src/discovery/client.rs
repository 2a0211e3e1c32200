//! Discovery Client
//!
//! Publishes this service's address in the shared key-value store so workers
//! can find it. The server must not start listening unless this succeeds.

use super::protocol::ENDPOINT_SET;
use crate::error::{DatabaseError, Result};

use std::time::Duration;

const ATTEMPTS: usize = 3;
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(2);

pub struct DiscoveryClient {
    /// `host:port` of the discovery store.
    store_addr: String,
    http_client: reqwest::Client,
}

impl DiscoveryClient {
    pub fn new(store_addr: impl Into<String>) -> Self {
        Self {
            store_addr: store_addr.into(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn store_addr(&self) -> &str {
        &self.store_addr
    }

    /// Stores `value` under `key`.
    ///
    /// Connection failures are retried with backoff. A reply with a non-2xx
    /// status is final and fails with `Unavailable` carrying the reply body.
    pub async fn register(&self, key: &str, value: &str) -> Result<()> {
        let url = format!("http://{}{}", self.store_addr, ENDPOINT_SET);
        let response = self
            .post_with_retry(&url, &[("key", key), ("value", value)])
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DatabaseError::Unavailable(format!(
                "registration of {} rejected with {}: {}",
                key, status, body
            )));
        }

        tracing::info!(
            "Registered {}={} in discovery store {}",
            key,
            value,
            self.store_addr
        );
        Ok(())
    }

    async fn post_with_retry(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let mut delay_ms = 150u64;

        for attempt in 0..ATTEMPTS {
            let response = self
                .http_client
                .post(url)
                .query(query)
                .timeout(ATTEMPT_TIMEOUT)
                .send()
                .await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == ATTEMPTS {
                        return Err(DatabaseError::Unavailable(e.to_string()));
                    }
                    tracing::warn!(
                        "Discovery store {} unreachable (attempt {}): {}",
                        self.store_addr,
                        attempt + 1,
                        e
                    );
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(DatabaseError::Unavailable(
            "retry attempts exhausted".to_string(),
        ))
    }
}
