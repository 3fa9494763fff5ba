//! Transport abstraction layer.
//!
//! Payment clients never talk to reqwest directly. They hand a fully built
//! URL to a [`Transport`] and get back the raw status and body.
//! Classifying that response is the client's job, so transports return
//! non-2xx responses as values and only fail when no response was obtained.
//!
//! # Examples
//!
//! ```rust,no_run
//! use axon_payments::transport::{HttpTransport, Transport};
//! use url::Url;
//!
//! # async fn example() -> axon_payments::error::Result<()> {
//! let transport = HttpTransport::new()?;
//! let url = Url::parse("https://api.plisio.net/api/v1/currencies").unwrap();
//!
//! let response = transport.get(&url).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use url::Url;

use crate::error::Result;

pub mod config;
pub mod http;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// Response from a transport GET.
///
/// Contains the HTTP status code and the raw response body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport protocol abstraction.
///
/// The gateway API is GET-only, so a transport only needs to issue an
/// authenticated GET for a URL whose query string already carries the
/// credentials.
///
/// Implementations must:
/// - Return `Ok` for every response received, whatever its status code
/// - Return [`PaymentsError::UnknownError`](crate::error::PaymentsError::UnknownError)
///   when no response could be obtained
/// - Perform exactly one request per call (no retries)
pub trait Transport: Send + Sync {
    /// Executes a GET request.
    ///
    /// # Errors
    ///
    /// Returns error if no response could be obtained (DNS, connection, TLS,
    /// timeout).
    fn get<'a>(&'a self, url: &'a Url) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Returns the protocol name for logging.
    ///
    /// Examples: "http/1.1", "http/2", "mock"
    fn protocol_name(&self) -> &'static str;
}
