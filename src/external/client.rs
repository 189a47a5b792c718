use std::time::Duration;

use crate::config::HttpClientConfig;

/// Build the `reqwest::Client` shared by both gateway paths.
///
/// One client is built per process and cloned into each consumer; clones share
/// the connection pool.
///
/// # Features
/// - **Timeouts**: request and connect timeouts from `[http]`
/// - **Compression**: gzip, deflate, brotli and zstd responses
/// - **Security**: rustls; invalid certificates only when
///   `http.accept_invalid_certs` is set (self-signed gateway apps on a LAN)
///
/// # Example
/// ```ignore
/// let client = build_http_client(&settings.http)?;
/// let response = client.get("https://api.sms-gate.app/health").send().await?;
/// ```
pub fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    if config.accept_invalid_certs {
        tracing::warn!("TLS certificate verification is disabled for outbound requests");
    }

    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        // Enable compression (gzip, deflate, brotli, zstd)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        // Security
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .user_agent(config.user_agent.as_str())
        .build()
}
