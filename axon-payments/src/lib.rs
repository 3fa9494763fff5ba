//! Axon Payments: typed clients for cryptocurrency payment gateways
//!
//! A Rust library for creating invoices and withdrawals through the Plisio
//! payment gateway, with cached client instances shared across an
//! application.
//!
//! # What is Axon Payments?
//!
//! - **Typed requests and responses**: currencies, statuses and payloads are
//!   Rust types, and amounts are [`rust_decimal::Decimal`]
//! - **Mode-aware clients**: the white-label invoice payload is a different
//!   type from the default one, selected at compile time
//! - **Cached instances**: [`registry::AxonPayments`] builds each client once
//!   per secret and mode and shares it behind an [`Arc`](std::sync::Arc)
//! - **Predictable failures**: gateway rejections and transport failures are
//!   distinct error variants, and nothing is retried behind your back
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  payments(false)     │  process-wide registry
//! └──────────┬───────────┘
//!            │ plisio::<M>(secret)
//! ┌──────────▼───────────┐
//! │  AxonPayments cache  │  "plisio:[secret, mode]" → Arc<PlisioClient<M>>
//! └──────────┬───────────┘
//!            │ create_invoice / withdraw
//! ┌──────────▼───────────┐
//! │  PlisioClient<M>     │  query::serialize → Transport::get → response::classify
//! └──────────┬───────────┘
//!            │ HTTPS GET ?...&api_key=...
//! ┌──────────▼───────────┐
//! │  api.plisio.net      │
//! └──────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axon_payments::{
//!     plisio::{FiatCurrency, InvoiceRequest, WhiteLabel},
//!     registry::payments,
//! };
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> axon_payments::Result<()> {
//! let plisio = payments(false).plisio::<WhiteLabel>("secret-key")?;
//!
//! let request = InvoiceRequest::new("Order #1042", 1042)
//!     .source(FiatCurrency::Usd, Decimal::new(2499, 2))
//!     .callback_url("https://shop.example.com/plisio/callback?json=true");
//!
//! let invoice = plisio.create_invoice(&request).await?;
//! if let Some(wallet) = invoice.wallet_hash.as_deref() {
//!     println!("send {:?} {:?} to {wallet}", invoice.amount, invoice.currency);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! ```rust,no_run
//! use axon_payments::{
//!     PaymentsError,
//!     plisio::{InvoiceRequest, PlisioClient, Standard},
//! };
//!
//! # async fn example() -> axon_payments::Result<()> {
//! let client = PlisioClient::<Standard>::new("secret-key")?;
//!
//! match client.create_invoice(&InvoiceRequest::new("Order #1", 1)).await {
//!     Ok(invoice) => println!("pay at {}", invoice.invoice_url),
//!     Err(PaymentsError::RequestFailed { message, code, .. }) => {
//!         eprintln!("gateway rejected the invoice ({code:?}): {message}");
//!     }
//!     Err(PaymentsError::UnknownError(source)) => {
//!         eprintln!("no answer from the gateway: {source}");
//!     }
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest and wiremock"
)]

pub mod error;
pub mod plisio;
pub mod registry;
pub mod transport;

pub use error::{PaymentsError, Result};
pub use plisio::{PlisioClient, PlisioMode};
pub use registry::{AxonPayments, Provider, payments};
