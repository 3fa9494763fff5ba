//! HTTP transport implementation.
//!
//! This module provides HTTP/1.1 and HTTP/2 transport using reqwest.

use std::sync::LazyLock;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::config::{HttpConfig, HttpVersion};
use crate::{
    error::{PaymentsError, Result},
    transport::{Transport, TransportResponse},
};

/// Default HTTP client with connection pooling enabled.
///
/// Shared by every transport built with [`HttpTransport::new`], so all
/// default clients reuse the same connection pool.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    let config = HttpConfig::default();
    Client::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .user_agent(config.user_agent)
        .build()
        .expect("Failed to create default HTTP client")
});

/// Validates that the URL can be sent over HTTP.
fn validate_url(url: &Url) -> Result<()> {
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(PaymentsError::InvalidInput(format!(
            "unsupported URL scheme: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(PaymentsError::InvalidInput("URL missing host".to_owned()));
    }

    Ok(())
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Supports connection pooling, keep-alive, and HTTP/2 multiplexing.
///
/// # Examples
///
/// ```
/// use axon_payments::transport::{HttpConfig, HttpTransport, HttpVersion, Transport};
///
/// let config = HttpConfig { timeout_secs: 15, http_version: HttpVersion::Http1, ..Default::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// assert_eq!(transport.protocol_name(), "http/1.1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// Uses a shared client for connection pooling.
    ///
    /// Default configuration:
    /// - Pool max idle per host: 10
    /// - Timeout: 30 seconds
    /// - Connect timeout: 10 seconds
    /// - HTTP version: Auto
    ///
    /// # Errors
    ///
    /// This method is infallible but returns `Result` for API consistency.
    pub fn new() -> Result<Self> {
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone(), http_version: HttpVersion::Auto })
    }

    /// Creates HTTP transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::ConfigError`] if the configuration is out of
    /// bounds and [`PaymentsError::TransportError`] if the client cannot be
    /// built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder
            .build()
            .map_err(|e| PaymentsError::TransportError(format!("failed to build client: {e}")))?;

        Ok(Self { client, http_version: config.http_version })
    }

    #[instrument(
        skip(self, url),
        fields(host = url.host_str().unwrap_or_default(), path = url.path(), protocol = self.protocol_name())
    )]
    async fn execute_get(&self, url: &Url) -> Result<TransportResponse> {
        validate_url(url)?;

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status().as_u16();

        let body = response.bytes().await?.to_vec();

        debug!(status, body_len = body.len(), "gateway responded");

        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn get<'a>(&'a self, url: &'a Url) -> Result<TransportResponse> {
        self.execute_get(url).await
    }

    fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Http2 => "http/2",
            HttpVersion::Auto => "http",
        }
    }
}
