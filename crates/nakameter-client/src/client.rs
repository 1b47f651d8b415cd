//! The per-provider client: one upstream API, one rate budget.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use nakameter_types::ProviderId;

use crate::error::{FetchError, Result};
use crate::limiter::RateLimiter;

/// Configuration for a provider client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Requests per minute this provider tolerates. 0 = unlimited.
    pub rate_limit: u32,

    /// Per-call deadline. A call that exceeds it fails with
    /// [`FetchError::Timeout`]; in-flight work is cancelled.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rate_limit: 60,
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Set the per-minute rate limit.
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Rate-limited, timeout-bounded client for one upstream provider.
///
/// Conceptually a per-provider singleton: all calls against one provider
/// share this instance and therefore its rate budget. Do not share an
/// instance across providers unless they genuinely are the same
/// rate-limited endpoint.
#[derive(Debug)]
pub struct ProviderClient {
    provider: ProviderId,
    http: reqwest::Client,
    limiter: RateLimiter,
    timeout: Duration,
    next_rpc_id: AtomicU64,
}

impl ProviderClient {
    /// Create a client for `provider` with the given pacing and deadline.
    pub fn new(provider: ProviderId, config: ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("nakameter/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("HTTP client initialization failed");

        Self {
            provider,
            http,
            limiter: RateLimiter::per_minute(config.rate_limit),
            timeout: config.timeout,
            next_rpc_id: AtomicU64::new(1),
        }
    }

    /// The provider this client is scoped to.
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// GET a JSON document.
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        self.execute(self.http.get(url), url).await
    }

    /// GET a JSON document with query parameters.
    pub async fn get_json_with_query(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.execute(self.http.get(url).query(query), url).await
    }

    /// Issue a JSON-RPC 2.0 call and unwrap its envelope.
    ///
    /// Sends `{jsonrpc: "2.0", id, method, params}`; a response carrying
    /// `error.message` becomes [`FetchError::Rpc`], otherwise `result` is
    /// returned.
    pub async fn rpc_call(&self, url: &str, method: &str, params: Value) -> Result<Value> {
        let id = self.next_rpc_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let envelope = self.execute(self.http.post(url).json(&payload), url).await?;

        if let Some(err) = envelope.get("error") {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unspecified rpc error");
            return Err(FetchError::Rpc(message.to_string()));
        }
        envelope
            .get("result")
            .cloned()
            .ok_or_else(|| FetchError::Rpc("response missing result".to_string()))
    }

    /// Rate-limit, send, deadline-bound, and shape the response.
    ///
    /// The rate slot is consumed before the attempt, so a failed call still
    /// counts against the budget.
    async fn execute(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Value> {
        self.limiter.acquire().await;
        debug!(provider = %self.provider, %url, "issuing request");

        let attempt = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());

            if !status.is_success() {
                return Err(FetchError::Status {
                    code: status.as_u16(),
                    body,
                });
            }
            Ok(serde_json::from_str(&body)?)
        };

        let result = match tokio::time::timeout(self.timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                elapsed_ms: self.timeout.as_millis() as u64,
            }),
        };

        if let Err(e) = &result {
            warn!(provider = %self.provider, %url, error = %e, "request failed");
        }
        result
    }
}
