//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use iobroker_repositories::{Config, EndpointsConfig, RepositoryCache};
use tokio::net::TcpListener;

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Configuration pointing both origins at `base_url`
#[allow(dead_code)]
pub fn test_config(base_url: &str, timeout_ms: u64, github_token: Option<&str>) -> Config {
    Config {
        timeout_ms,
        github_token: github_token.map(str::to_string),
        endpoints: EndpointsConfig {
            canonical_base: base_url.to_string(),
            mirror_base: base_url.to_string(),
        },
        ..Config::default()
    }
}

/// Cache pointing both origins at `base_url`
#[allow(dead_code)]
pub fn test_cache(base_url: &str) -> RepositoryCache {
    RepositoryCache::new(&test_config(base_url, 5_000, None)).expect("Failed to create cache")
}

/// Start an upstream that accepts connections and never answers
///
/// Returns the base URL of the listener. Accepted sockets are held open for
/// the lifetime of the runtime.
#[allow(dead_code)]
pub async fn spawn_silent_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind silent upstream");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{addr}")
}

/// Sample repository payload in the shape served by download.iobroker.net
#[allow(dead_code)]
pub fn sample_repository() -> serde_json::Value {
    serde_json::json!({
        "_repoInfo": {"stable": true, "name": "Stable (default)"},
        "admin": {
            "meta": "https://raw.githubusercontent.com/ioBroker/ioBroker.admin/master/io-package.json",
            "version": "7.0.23"
        },
        "javascript": {
            "meta": "https://raw.githubusercontent.com/ioBroker/ioBroker.javascript/master/io-package.json",
            "version": "8.8.3"
        }
    })
}
