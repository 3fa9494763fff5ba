//! Plisio API client.

use std::{fmt, marker::PhantomData};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, info, instrument};
use url::Url;

use super::{
    config::PlisioConfig,
    endpoint::{DEFAULT_API_BASE, Endpoint, parse_api_base},
    mode::{Mode, PlisioMode, Standard},
    models::{InvoiceRequest, WithdrawRequest, WithdrawSuccess},
    query, response,
};
use crate::{
    error::{PaymentsError, Result},
    registry::Provider,
    transport::{HttpTransport, Transport},
};

/// Client for the Plisio API.
///
/// `M` selects the mode at compile time and with it the invoice payload
/// type: [`Standard`] returns
/// [`InvoiceSuccess`](super::InvoiceSuccess), [`WhiteLabel`](super::WhiteLabel)
/// returns [`InvoiceSuccessWhiteLabel`](super::InvoiceSuccessWhiteLabel).
/// Requests are identical in both modes.
///
/// Each operation performs exactly one GET. Nothing is retried and no
/// response is cached.
///
/// # Examples
///
/// ```rust,no_run
/// use axon_payments::plisio::{FiatCurrency, InvoiceRequest, PlisioClient, WhiteLabel};
/// use rust_decimal::Decimal;
///
/// # async fn example() -> axon_payments::error::Result<()> {
/// let client = PlisioClient::<WhiteLabel>::new("secret-key")?;
///
/// let request = InvoiceRequest::new("Order #1042", 1042).source(FiatCurrency::Usd, Decimal::new(2499, 2));
/// let invoice = client.create_invoice(&request).await?;
///
/// if let (Some(amount), Some(currency), Some(wallet)) =
///     (invoice.amount, invoice.currency.as_deref(), invoice.wallet_hash.as_deref())
/// {
///     println!("pay {amount} {currency} to {wallet}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct PlisioClient<M: Mode = Standard, T: Transport = HttpTransport> {
    secret_key: String,
    api_base: Url,
    transport: T,
    mode: PhantomData<M>,
}

impl<M: Mode> PlisioClient<M, HttpTransport> {
    /// Creates a client for the production API on the shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::ConfigError`] if `secret_key` is blank.
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructors"
    )]
    pub fn new(secret_key: impl Into<String>) -> Result<Self> {
        Self::with_transport(secret_key, DEFAULT_API_BASE, HttpTransport::new()?)
    }

    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::ConfigError`] if the configuration is invalid
    /// or its `mode` differs from `M`, and [`PaymentsError::TransportError`]
    /// if the HTTP client cannot be built.
    pub fn from_config(config: &PlisioConfig) -> Result<Self> {
        config.validate()?;

        if config.mode != M::KIND {
            return Err(PaymentsError::ConfigError(format!(
                "config mode '{}' does not match client mode '{}'",
                config.mode,
                M::KIND
            )));
        }

        let transport = HttpTransport::with_config(&config.http)?;
        Self::with_transport(config.secret_key.clone(), &config.api_base, transport)
    }
}

impl<M: Mode, T: Transport> PlisioClient<M, T> {
    /// Creates a client on a custom transport and API base.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::ConfigError`] if `secret_key` is blank or
    /// `api_base` is not an absolute `http`/`https` URL.
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructors"
    )]
    pub fn with_transport(secret_key: impl Into<String>, api_base: &str, transport: T) -> Result<Self> {
        let secret_key = secret_key.into();
        if secret_key.trim().is_empty() {
            return Err(PaymentsError::ConfigError("secret_key must not be empty".to_owned()));
        }

        Ok(Self { secret_key, api_base: parse_api_base(api_base)?, transport, mode: PhantomData })
    }

    /// Runtime value of `M`.
    #[must_use]
    pub const fn mode(&self) -> PlisioMode {
        M::KIND
    }

    /// API base every endpoint is resolved against.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentsError::RequestFailed`] if the gateway rejects the
    /// invoice, [`PaymentsError::UnknownError`] if no usable answer was
    /// obtained, and [`PaymentsError::InvalidInput`] if the request cannot be
    /// encoded.
    #[instrument(
        skip(self, request),
        fields(provider = "plisio", endpoint = Endpoint::CreateInvoice.path(), mode = M::KIND.as_str(), order_number = request.order_number)
    )]
    pub async fn create_invoice(&self, request: &InvoiceRequest) -> Result<M::Invoice> {
        info!("Creating invoice");
        let invoice = self.call(Endpoint::CreateInvoice, request).await?;
        info!("Invoice created");
        Ok(invoice)
    }

    /// Withdraws funds from the merchant balance.
    ///
    /// For [`WithdrawType::MassCashOut`](super::WithdrawType::MassCashOut),
    /// `to` and `amount` must have equal length. This is not checked here.
    ///
    /// # Errors
    ///
    /// Same as [`create_invoice`](Self::create_invoice).
    #[instrument(
        skip(self, request),
        fields(provider = "plisio", endpoint = Endpoint::Withdrawal.path(), mode = M::KIND.as_str(), destinations = request.to.len())
    )]
    pub async fn withdraw(&self, request: &WithdrawRequest) -> Result<WithdrawSuccess> {
        info!(currency = %request.currency, "Requesting withdrawal");
        let withdrawal = self.call(Endpoint::Withdrawal, request).await?;
        info!("Withdrawal accepted");
        Ok(withdrawal)
    }

    async fn call<P, R>(&self, endpoint: Endpoint, params: &P) -> Result<R>
    where
        P: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = query::serialize(params, &self.secret_key)
            .and_then(|query| endpoint.url(&self.api_base, &query))
            .inspect_err(|e| error!(error = %e, "Cannot build {} request", endpoint.name()))?;

        debug!(
            url = %query::redacted(&url),
            protocol = self.transport.protocol_name(),
            "Sending request"
        );

        response::classify(self.transport.get(&url).await)
    }
}

impl<M: Mode, T: Transport> fmt::Debug for PlisioClient<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlisioClient")
            .field("secret_key", &"[REDACTED]")
            .field("mode", &M::KIND)
            .field("api_base", &self.api_base.as_str())
            .field("transport", &self.transport.protocol_name())
            .finish()
    }
}

impl<M: Mode> Provider for PlisioClient<M> {
    const NAME: &'static str = "plisio";

    type Args = String;

    fn serialize_args(secret_key: &String) -> Result<String> {
        Ok(serde_json::to_string(&(secret_key, M::KIND))?)
    }

    fn construct(secret_key: String) -> Result<Self> {
        Self::new(secret_key)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::{
        plisio::{
            CryptoCurrency, FeePlan, FiatCurrency, InvoiceStatus, WhiteLabel, WithdrawType,
        },
        transport::mock::MockTransport,
    };

    fn client<M: Mode>(transport: MockTransport) -> PlisioClient<M, MockTransport> {
        PlisioClient::with_transport("k1", DEFAULT_API_BASE, transport).unwrap()
    }

    fn query_of(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().into_owned().collect()
    }

    #[tokio::test]
    async fn test_create_invoice_builds_authenticated_url() {
        let body = json!({
            "status": "success",
            "data": {"txn_id": "5f1a", "invoice_url": "https://plisio.net/invoice/5f1a"}
        });
        let client = client::<Standard>(MockTransport::new().respond(200, body.to_string()));

        let request = InvoiceRequest::new("o1", 1).source(FiatCurrency::Usd, Decimal::from(10));
        let invoice = client.create_invoice(&request).await.unwrap();

        assert_eq!(invoice.txn_id, "5f1a");
        assert_eq!(invoice.invoice_url, "https://plisio.net/invoice/5f1a");

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path(), "/api/v1/invoices/new");
        assert_eq!(query_of(&requests[0]), vec![
            ("order_name".to_owned(), "o1".to_owned()),
            ("order_number".to_owned(), "1".to_owned()),
            ("source_currency".to_owned(), "USD".to_owned()),
            ("source_amount".to_owned(), "10".to_owned()),
            ("api_key".to_owned(), "k1".to_owned()),
        ]);
    }

    #[tokio::test]
    async fn test_create_invoice_white_label_payload() {
        let data = json!({
            "txn_id": "5f1a",
            "invoice_url": "https://plisio.net/invoice/5f1a",
            "amount": "0.00041",
            "pending_amount": "0.00041",
            "wallet_hash": "bc1qwallet",
            "psys_cid": "BTC",
            "currency": "BTC",
            "status": "new",
            "source_currency": "USD",
            "source_rate": "24390.2",
            "expire_utc": 1_700_000_000,
            "expected_confirmations": "1",
            "qr_code": "data:image/png;base64,AAA",
            "verify_hash": "abc",
            "invoice_commission": "0",
            "invoice_sum": "0.00041",
            "invoice_total_sum": "0.00041"
        });
        let body = json!({"status": "success", "data": data});
        let client = client::<WhiteLabel>(MockTransport::new().respond(200, body.to_string()));

        let invoice = client.create_invoice(&InvoiceRequest::new("o1", 1)).await.unwrap();

        assert_eq!(invoice.wallet_hash.as_deref(), Some("bc1qwallet"));
        assert_eq!(invoice.psys_cid.as_deref(), Some("BTC"));
        assert_eq!(invoice.known_currency(), Some(CryptoCurrency::Btc));
        assert_eq!(invoice.known_status(), Some(InvoiceStatus::New));
        assert_eq!(invoice.expected_confirmations, Some(1));
        assert_eq!(invoice.qr_code.as_deref(), Some("data:image/png;base64,AAA"));
        assert!(invoice.extra.is_empty());
    }

    #[tokio::test]
    async fn test_white_label_unlisted_currency_is_returned() {
        let body = json!({
            "status": "success",
            "data": {
                "txn_id": "5f1a",
                "invoice_url": "https://plisio.net/invoice/5f1a",
                "amount": "12.5",
                "wallet_hash": "0xabc",
                "psys_cid": "USDT_BASE",
                "currency": "USDT_BASE",
                "status": "new"
            }
        });
        let client = client::<WhiteLabel>(MockTransport::new().respond(200, body.to_string()));

        let invoice = client.create_invoice(&InvoiceRequest::new("o1", 1)).await.unwrap();

        assert_eq!(invoice.psys_cid.as_deref(), Some("USDT_BASE"));
        assert_eq!(invoice.currency.as_deref(), Some("USDT_BASE"));
        assert_eq!(invoice.known_currency(), None);
        assert_eq!(invoice.known_status(), Some(InvoiceStatus::New));
    }

    #[tokio::test]
    async fn test_modes_accept_the_same_hosted_payload() {
        let body = json!({
            "status": "success",
            "data": {"txn_id": "5f1a", "invoice_url": "https://plisio.net/invoice/5f1a"}
        })
        .to_string();
        let standard = client::<Standard>(MockTransport::new().respond(200, body.clone()));
        let white_label = client::<WhiteLabel>(MockTransport::new().respond(200, body));

        let request = InvoiceRequest::new("o1", 1);
        let hosted = standard.create_invoice(&request).await.unwrap();
        let white = white_label.create_invoice(&request).await.unwrap();

        assert_eq!(hosted.txn_id, white.txn_id);
        assert_eq!(hosted.invoice_url, white.invoice_url);
        assert_eq!(white.wallet_hash, None);
        assert_eq!(white.amount, None);
    }

    #[tokio::test]
    async fn test_modes_send_identical_requests() {
        let standard_body = json!({"status": "success", "data": {"txn_id": "a", "invoice_url": "u"}});
        let standard = client::<Standard>(MockTransport::new().respond(200, standard_body.to_string()));
        let white_label = client::<WhiteLabel>(MockTransport::new().fail("offline"));

        let request = InvoiceRequest::new("o1", 9).currency(CryptoCurrency::Eth);
        standard.create_invoice(&request).await.unwrap();
        let _offline = white_label.create_invoice(&request).await.unwrap_err();

        assert_eq!(standard.transport().requests(), white_label.transport().requests());
    }

    #[tokio::test]
    async fn test_create_invoice_error_body() {
        let body = json!({
            "status": "error",
            "data": {"name": "Bad Request", "message": "Order number already used", "code": 104}
        });
        let client = client::<Standard>(MockTransport::new().respond(200, body.to_string()));

        let error = client.create_invoice(&InvoiceRequest::new("o1", 1)).await.unwrap_err();
        assert!(error.is_request_failed());
        assert_eq!(error.gateway_message(), Some("Order number already used"));
    }

    #[tokio::test]
    async fn test_create_invoice_transport_failure() {
        let client = client::<Standard>(MockTransport::new().fail("connection refused"));

        let error = client.create_invoice(&InvoiceRequest::new("o1", 1)).await.unwrap_err();
        assert!(matches!(error, PaymentsError::UnknownError(_)));
        assert!(error.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_withdraw_success() {
        let body = json!({
            "status": "success",
            "data": {
                "id": "64ef",
                "type": "cash_out",
                "status": "completed",
                "currency": "LTC",
                "amount": "0.5",
                "fee": "0.0001",
                "tx_id": ["a1"]
            }
        });
        let client = client::<Standard>(MockTransport::new().respond(200, body.to_string()));

        let request =
            WithdrawRequest::cash_out(CryptoCurrency::Ltc, "ltc1qdest", Decimal::new(5, 1), FeePlan::Normal);
        let withdrawal = client.withdraw(&request).await.unwrap();

        assert_eq!(withdrawal.id, "64ef");
        assert_eq!(withdrawal.known_kind(), Some(WithdrawType::CashOut));
        assert_eq!(withdrawal.fee, Some(Decimal::new(1, 4)));

        let requests = client.transport().requests();
        assert_eq!(requests[0].path(), "/api/v1/operations/withdraw");
        let query = query_of(&requests[0]);
        assert!(query.contains(&("to".to_owned(), "ltc1qdest".to_owned())));
        assert!(query.contains(&("feePlan".to_owned(), "normal".to_owned())));
        assert!(query.contains(&("api_key".to_owned(), "k1".to_owned())));
    }

    #[tokio::test]
    async fn test_withdraw_error_body() {
        let body = json!({
            "status": "error",
            "data": {"name": "Bad Request", "message": "Insufficient balance", "code": 115}
        });
        let client = client::<Standard>(MockTransport::new().respond(422, body.to_string()));

        let request = WithdrawRequest::mass_cash_out(
            CryptoCurrency::Btc,
            [("a", Decimal::ONE), ("b", Decimal::TWO)],
            FeePlan::Priority,
        );
        let error = client.withdraw(&request).await.unwrap_err();
        assert_eq!(error.gateway_message(), Some("Insufficient balance"));
    }

    #[tokio::test]
    async fn test_withdraw_transport_failure() {
        let client = client::<WhiteLabel>(MockTransport::new().fail("tls handshake eof"));

        let request =
            WithdrawRequest::cash_out(CryptoCurrency::Btc, "bc1q", Decimal::ONE, FeePlan::Normal);
        let error = client.withdraw(&request).await.unwrap_err();
        assert!(matches!(error, PaymentsError::UnknownError(_)));
        assert!(error.to_string().contains("tls handshake eof"));
    }

    #[tokio::test]
    async fn test_each_call_sends_one_request() {
        let body = json!({"status": "success", "data": {"txn_id": "a", "invoice_url": "u"}});
        let client = client::<Standard>(
            MockTransport::new().respond(200, body.to_string()).respond(200, body.to_string()),
        );

        client.create_invoice(&InvoiceRequest::new("o1", 1)).await.unwrap();
        client.create_invoice(&InvoiceRequest::new("o2", 2)).await.unwrap();

        assert_eq!(client.transport().requests().len(), 2);
    }

    #[test]
    fn test_with_transport_rejects_blank_secret() {
        let result = PlisioClient::<Standard, _>::with_transport("", DEFAULT_API_BASE, MockTransport::new());
        assert!(matches!(result, Err(PaymentsError::ConfigError(_))));
    }

    #[test]
    fn test_with_transport_rejects_bad_base() {
        let result =
            PlisioClient::<Standard, _>::with_transport("k1", "mailto:ops@example.com", MockTransport::new());
        assert!(matches!(result, Err(PaymentsError::ConfigError(_))));
    }

    #[test]
    fn test_from_config_mode_mismatch() {
        let config = PlisioConfig::new("k1", PlisioMode::WhiteLabel);
        let result = PlisioClient::<Standard>::from_config(&config);
        assert!(matches!(result, Err(PaymentsError::ConfigError(msg)) if msg.contains("whitelabel")));

        let client = PlisioClient::<WhiteLabel>::from_config(&config).unwrap();
        assert_eq!(client.mode(), PlisioMode::WhiteLabel);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client = PlisioClient::<Standard>::new("sk_live_very_secret").unwrap();
        let debug_str = format!("{client:?}");
        assert!(!debug_str.contains("sk_live_very_secret"));
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("api.plisio.net"));
    }

    #[test]
    fn test_provider_args_include_mode() {
        let key = "k1".to_owned();
        assert_eq!(PlisioClient::<Standard>::serialize_args(&key).unwrap(), r#"["k1","default"]"#);
        assert_eq!(PlisioClient::<WhiteLabel>::serialize_args(&key).unwrap(), r#"["k1","whitelabel"]"#);
    }

    #[tokio::test]
    async fn test_withdraw_unlisted_currency_is_returned() {
        let body = json!({
            "status": "success",
            "data": {"id": "64ef", "type": "cash_out", "status": "pending", "currency": "USDT_BASE"}
        });
        let client = client::<Standard>(MockTransport::new().respond(200, body.to_string()));

        let request =
            WithdrawRequest::cash_out(CryptoCurrency::UsdtTrx, "TXdest", Decimal::ONE, FeePlan::Normal);
        let withdrawal = client.withdraw(&request).await.unwrap();

        assert_eq!(withdrawal.currency, "USDT_BASE");
        assert_eq!(withdrawal.known_currency(), None);
        assert_eq!(withdrawal.known_kind(), Some(WithdrawType::CashOut));
    }
}
