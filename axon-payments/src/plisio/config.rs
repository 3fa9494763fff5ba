//! Plisio client configuration.
//!
//! Loaded from TOML, usually a `[plisio]` section of the application config:
//!
//! ```toml
//! secret_key = "sk_live_..."
//! mode = "whitelabel"
//! api_base = "https://api.plisio.net/api/v1/"
//!
//! [http]
//! timeout_secs = 20
//! ```

use std::fmt;

use serde::Deserialize;

use super::{
    endpoint::{DEFAULT_API_BASE, parse_api_base},
    mode::PlisioMode,
};
use crate::{
    error::{PaymentsError, Result},
    transport::HttpConfig,
};

/// Configuration for a [`PlisioClient`](super::PlisioClient).
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct PlisioConfig {
    /// API secret key from the Plisio dashboard.
    pub secret_key: String,

    /// Client mode.
    #[serde(default)]
    pub mode: PlisioMode,

    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl PlisioConfig {
    /// Creates a configuration with defaults for everything but the key.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn new(secret_key: impl Into<String>, mode: PlisioMode) -> Self {
        Self {
            secret_key: secret_key.into(),
            mode,
            api_base: default_api_base(),
            http: HttpConfig::default(),
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::ConfigError`] if the document does not parse
    /// or fails [`validate`](Self::validate).
    ///
    /// # Examples
    ///
    /// ```
    /// use axon_payments::plisio::{PlisioConfig, PlisioMode};
    ///
    /// let config = PlisioConfig::from_toml(r#"
    ///     secret_key = "k1"
    ///     mode = "whitelabel"
    /// "#)?;
    ///
    /// assert_eq!(config.mode, PlisioMode::WhiteLabel);
    /// assert_eq!(config.api_base, "https://api.plisio.net/api/v1/");
    /// # Ok::<(), axon_payments::error::PaymentsError>(())
    /// ```
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| PaymentsError::ConfigError(format!("invalid Plisio config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks that:
    /// - `secret_key` is not blank
    /// - `api_base` is an absolute `http`/`https` URL
    /// - the `http` settings are within bounds
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::ConfigError`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.secret_key.trim().is_empty() {
            return Err(PaymentsError::ConfigError("secret_key must not be empty".to_owned()));
        }

        parse_api_base(&self.api_base)?;
        self.http.validate()
    }
}

impl fmt::Debug for PlisioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlisioConfig")
            .field("secret_key", &"[REDACTED]")
            .field("mode", &self.mode)
            .field("api_base", &self.api_base)
            .field("http", &self.http)
            .finish()
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_owned()
}
