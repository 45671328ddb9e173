//! HTTP client for the repository files.

use reqwest::{header, Client as ReqwestClient};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::domain::error::{RepositoryError, RepositoryResult};
use crate::domain::models::Config;
use crate::infrastructure::logging::SecretScrubber;

/// Client identification sent with every request
pub const USER_AGENT: &str = "Action script";

/// Authorization value used when no GitHub token is configured
pub const NO_AUTHORIZATION: &str = "none";

/// Default timeout for a single download
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for the repository HTTP client
#[derive(Debug, Clone)]
pub struct RepositoryClientConfig {
    /// GitHub token sent as `Authorization: token <X>`
    pub github_token: Option<String>,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for RepositoryClientConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl From<&Config> for RepositoryClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            github_token: config.github_token.clone(),
            timeout_ms: config.timeout_ms,
        }
    }
}

/// HTTP client for the ioBroker repository files
///
/// The header profile is fixed when the client is built. Every download is
/// bounded by the configured timeout and can be aborted through a
/// [`CancellationToken`]; in both cases the in-flight request is dropped, which
/// closes its connection.
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    http_client: ReqwestClient,
    timeout: Duration,
}

impl RepositoryClient {
    /// Create a new repository client
    pub fn new(config: &RepositoryClientConfig) -> RepositoryResult<Self> {
        let headers = default_headers(config.github_token.as_deref())?;

        info!(
            timeout_ms = config.timeout_ms,
            authorization = %authorization_for_log(config.github_token.as_deref()),
            "Initializing repository client"
        );

        let http_client = ReqwestClient::builder()
            .default_headers(headers)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| RepositoryError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Configured timeout for one download
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download `url` and parse it as a usable JSON value
    ///
    /// Exactly one of three things ends the call: the response is complete, the
    /// timeout elapses, or `cancel` fires. The losing futures, including the
    /// timer and the request, are dropped before this returns.
    #[instrument(skip(self, cancel))]
    pub async fn fetch_json(&self, url: &str, cancel: &CancellationToken) -> RepositoryResult<Value> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(RepositoryError::Cancelled { url: url.to_string() }),
            () = tokio::time::sleep(self.timeout) => {
                debug!("Request timed out after {:?}", self.timeout);
                Err(RepositoryError::Timeout {
                    url: url.to_string(),
                    timeout_ms: duration_ms(self.timeout),
                })
            }
            result = self.download(url) => result,
        }
    }

    async fn download(&self, url: &str) -> RepositoryResult<Value> {
        debug!("GET {url}");

        let network = |source| RepositoryError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.http_client.get(url).send().await.map_err(network)?;
        let status = response.status();

        debug!("Response status: {status}");

        if !status.is_success() {
            return Err(RepositoryError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(network)?;
        parse_payload(url, &body)
    }
}

/// Build the fixed header profile sent with every request
pub fn default_headers(github_token: Option<&str>) -> RepositoryResult<header::HeaderMap> {
    let mut headers = header::HeaderMap::new();

    let mut authorization = match github_token.filter(|token| !token.is_empty()) {
        Some(token) => header::HeaderValue::from_str(&format!("token {token}"))
            .map_err(|e| RepositoryError::Client(format!("Invalid GitHub token: {e}")))?,
        None => header::HeaderValue::from_static(NO_AUTHORIZATION),
    };
    authorization.set_sensitive(true);

    headers.insert(header::AUTHORIZATION, authorization);
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
    headers.insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-cache"));
    headers.insert(header::PRAGMA, header::HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, header::HeaderValue::from_static("0"));

    Ok(headers)
}

/// Parse a response body, rejecting anything that carries no usable data
pub(crate) fn parse_payload(url: &str, body: &[u8]) -> RepositoryResult<Value> {
    let invalid = |reason: String| RepositoryError::InvalidPayload {
        url: url.to_string(),
        reason,
    };

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(invalid("empty response body".to_string()));
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| invalid(format!("invalid JSON: {e}")))?;

    if is_falsy(&value) {
        return Err(invalid(format!("response contained no usable data ({value})")));
    }

    Ok(value)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn authorization_for_log(github_token: Option<&str>) -> String {
    match github_token.filter(|token| !token.is_empty()) {
        Some(token) => SecretScrubber::new().scrub_message(&format!("token {token}")),
        None => NO_AUTHORIZATION.to_string(),
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
