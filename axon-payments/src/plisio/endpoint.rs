//! Plisio endpoint table.

use url::Url;

use crate::error::{PaymentsError, Result};

/// Production API base.
pub const DEFAULT_API_BASE: &str = "https://api.plisio.net/api/v1/";

/// Operations the client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `invoices/new`
    CreateInvoice,
    /// `operations/withdraw`
    Withdrawal,
}

impl Endpoint {
    /// Path relative to the API base.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CreateInvoice => "invoices/new",
            Self::Withdrawal => "operations/withdraw",
        }
    }

    /// Operation name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateInvoice => "create_invoice",
            Self::Withdrawal => "withdraw",
        }
    }

    /// Builds the full request URL for this endpoint with `query` appended.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::InvalidInput`] if the joined URL is invalid.
    pub fn url(self, api_base: &Url, query: &str) -> Result<Url> {
        let mut url = api_base
            .join(self.path())
            .map_err(|e| PaymentsError::InvalidInput(format!("invalid endpoint URL: {e}")))?;
        url.set_query(Some(query));
        Ok(url)
    }
}

/// Parses an API base URL, adding the trailing `/` that relative joins need.
///
/// # Errors
///
/// Returns [`PaymentsError::ConfigError`] if `raw` is not an absolute
/// `http`/`https` URL with a host.
pub fn parse_api_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| PaymentsError::ConfigError(format!("invalid api_base '{raw}': {e}")))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(PaymentsError::ConfigError(format!(
            "api_base must use http or https, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(PaymentsError::ConfigError(format!("api_base '{raw}' has no host")));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(PaymentsError::ConfigError(format!(
            "api_base '{raw}' must not carry a query or fragment"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
