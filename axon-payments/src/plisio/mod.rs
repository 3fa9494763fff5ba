//! Plisio cryptocurrency payment gateway.
//!
//! The gateway exposes GET endpoints authenticated by an `api_key` query
//! parameter. [`PlisioClient`] builds the query with [`query`], performs the
//! request through a [`Transport`](crate::transport::Transport) and turns the
//! answer into a typed payload with [`response`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use axon_payments::plisio::{
//!     CryptoCurrency, FeePlan, FiatCurrency, InvoiceRequest, PlisioClient, Standard,
//!     WithdrawRequest,
//! };
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> axon_payments::error::Result<()> {
//! let client = PlisioClient::<Standard>::new("secret-key")?;
//!
//! let invoice = client
//!     .create_invoice(&InvoiceRequest::new("Order #7", 7).source(FiatCurrency::Eur, Decimal::TEN))
//!     .await?;
//! println!("redirect the payer to {}", invoice.invoice_url);
//!
//! let payout = WithdrawRequest::cash_out(CryptoCurrency::Btc, "bc1q...", Decimal::new(5, 3), FeePlan::Normal);
//! let withdrawal = client.withdraw(&payout).await?;
//! println!("withdrawal {} is {}", withdrawal.id, withdrawal.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod currency;
pub mod endpoint;
pub mod mode;
pub mod models;
pub mod query;
pub mod response;


pub use client::PlisioClient;
pub use config::PlisioConfig;
pub use currency::{CryptoCurrency, FiatCurrency, InvoiceStatus};
pub use endpoint::{DEFAULT_API_BASE, Endpoint};
pub use mode::{Mode, PlisioMode, Standard, WhiteLabel};
pub use models::{
    FeePlan, InvoiceCallback, InvoiceRequest, InvoiceSuccess, InvoiceSuccessWhiteLabel,
    WithdrawRequest, WithdrawSuccess, WithdrawType,
};
pub use response::{GatewayErrorBody, ResponseEnvelope};
