//! Error types for Axon Payments.
//!
//! Every fallible operation in this crate returns [`Result<T>`], whose error
//! type is [`PaymentsError`]. Gateway failures are split into two classes:
//!
//! - **Request failures** ([`PaymentsError::RequestFailed`]): the gateway was
//!   reached and answered with an error, either as an `{"status": "error"}`
//!   envelope or as a non-2xx response.
//! - **Unknown failures** ([`PaymentsError::UnknownError`]): no recognizable
//!   error body was obtained (DNS failure, refused connection, timeout,
//!   malformed JSON). The underlying error is kept as the source.
//!
//! The remaining variants cover local problems: bad configuration, request
//! values that cannot be flattened into a query string, and transport setup.
//!
//! # Examples
//!
//! ```
//! use axon_payments::error::PaymentsError;
//!
//! let err = PaymentsError::request_failed("Invalid api key", Some("Unauthorized"), Some(401));
//! assert_eq!(err.gateway_message(), Some("Invalid api key"));
//! assert!(err.is_request_failed());
//! ```

use thiserror::Error;

/// Result type alias for payment operations.
pub type Result<T> = std::result::Result<T, PaymentsError>;

/// Boxed underlying error carried by [`PaymentsError::UnknownError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while talking to a payment gateway.
///
/// No variant is retried internally. Retrying is the caller's decision.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum PaymentsError {
    /// The gateway answered with an error.
    ///
    /// `message` is the gateway's `data.message` verbatim when the body
    /// carried one, otherwise a description of the HTTP failure.
    ///
    /// # Recovery
    ///
    /// Inspect `message` and `code`. Most request failures are caused by
    /// request values the gateway rejected (unknown currency, duplicate
    /// order number, insufficient balance) or by an invalid API key.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Human-readable message from the gateway.
        message: String,
        /// Gateway error name (e.g. `"Bad Request"`), when provided.
        name: Option<String>,
        /// Gateway error code, when provided.
        code: Option<i64>,
    },

    /// The request failed without a recognizable gateway error body.
    ///
    /// Wraps the raw underlying error: a [`reqwest::Error`] for network
    /// failures, a [`serde_json::Error`] for malformed responses.
    ///
    /// # Recovery
    ///
    /// Usually transient. Check network connectivity and the configured
    /// `api_base` before retrying.
    #[error("Unknown error: {0}")]
    UnknownError(#[source] BoxError),

    /// A request value could not be turned into query parameters or a URL.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be parsed or failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The HTTP transport could not be set up.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// A cached instance exists under the requested key with a different type.
    #[error("Provider mismatch: {0}")]
    ProviderMismatch(String),
}

impl PaymentsError {
    /// Creates a [`PaymentsError::RequestFailed`].
    pub fn request_failed(
        message: impl Into<String>,
        name: Option<impl Into<String>>,
        code: Option<i64>,
    ) -> Self {
        Self::RequestFailed { message: message.into(), name: name.map(Into::into), code }
    }

    /// Wraps any error as [`PaymentsError::UnknownError`].
    pub fn unknown(source: impl Into<BoxError>) -> Self {
        Self::UnknownError(source.into())
    }

    /// Returns `true` for [`PaymentsError::RequestFailed`].
    #[must_use]
    pub const fn is_request_failed(&self) -> bool {
        matches!(self, Self::RequestFailed { .. })
    }

    /// Returns the gateway message of a [`PaymentsError::RequestFailed`].
    #[must_use]
    pub fn gateway_message(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PaymentsError {
    fn from(error: reqwest::Error) -> Self {
        Self::UnknownError(Box::new(error))
    }
}

impl From<serde_json::Error> for PaymentsError {
    fn from(error: serde_json::Error) -> Self {
        Self::UnknownError(Box::new(error))
    }
}
