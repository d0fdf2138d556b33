//! HTTP client settings shared by the document store and the image backend.

use std::time::Duration;

/// HTTP client configuration.
///
/// A zero leaves the HTTP stack's own default in place; no deadline is added
/// on top of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout in milliseconds (0 for the stack default).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 for the stack default).
    pub connect_timeout_ms: u64,
}

impl HttpConfig {
    /// Applies overrides from a variable lookup.
    #[must_use]
    pub fn with_overrides(mut self, lookup: &impl Fn(&str) -> Option<String>) -> Self {
        if let Some(timeout_ms) =
            lookup("RING_DESIGNER_HTTP_TIMEOUT_MS").and_then(|v| v.trim().parse().ok())
        {
            self.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) =
            lookup("RING_DESIGNER_HTTP_CONNECT_TIMEOUT_MS").and_then(|v| v.trim().parse().ok())
        {
            self.connect_timeout_ms = connect_timeout_ms;
        }
        self
    }
}

/// Builds a blocking HTTP client with the configured timeouts.
#[must_use]
pub fn build_http_client(config: HttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder()
        .user_agent(format!("ring-designer/{}", env!("CARGO_PKG_VERSION")));
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
