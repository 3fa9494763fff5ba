//! Creates a Plisio invoice from a TOML configuration file.
//!
//! # Running this example
//!
//! Write a config file:
//! ```toml
//! secret_key = "your-plisio-secret-key"
//! mode = "whitelabel"
//!
//! [http]
//! timeout_secs = 20
//! ```
//!
//! Then run:
//! ```bash
//! RUST_LOG=axon_payments=debug cargo run --example create_invoice -- plisio.toml
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::str_to_string,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::{env, fs, process};

use axon_payments::{
    PaymentsError,
    plisio::{
        CryptoCurrency, FiatCurrency, InvoiceRequest, PlisioClient, PlisioConfig, PlisioMode,
        Standard, WhiteLabel,
    },
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Loads the client configuration from the path given as first argument.
fn load_config() -> Result<PlisioConfig, Box<dyn std::error::Error>> {
    let path = env::args().nth(1).ok_or("usage: create_invoice <config.toml>")?;
    let source = fs::read_to_string(&path).map_err(|e| format!("cannot read {path}: {e}"))?;
    Ok(PlisioConfig::from_toml(&source)?)
}

fn invoice_request() -> InvoiceRequest {
    InvoiceRequest::new("Example order", 1)
        .source(FiatCurrency::Usd, Decimal::new(1000, 2))
        .allowed_currencies([CryptoCurrency::Btc, CryptoCurrency::Eth, CryptoCurrency::UsdtTrx])
        .description("Created by the axon-payments example")
        .expire_min(30)
}

fn report(error: &PaymentsError) {
    match error {
        PaymentsError::RequestFailed { message, code, .. } => {
            eprintln!("Plisio rejected the request (code {:?}): {}", code, message);
        }
        PaymentsError::UnknownError(source) => {
            eprintln!("No usable answer from Plisio: {}", source);
        }
        other => eprintln!("Error: {}", other),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    println!("Creating invoice in {} mode against {}", config.mode, config.api_base);

    let outcome = match config.mode {
        PlisioMode::Default => create_default(&config).await,
        PlisioMode::WhiteLabel => create_white_label(&config).await,
    };

    if let Err(e) = outcome {
        report(&e);
        process::exit(1);
    }
}

async fn create_default(config: &PlisioConfig) -> axon_payments::Result<()> {
    let client = PlisioClient::<Standard>::from_config(config)?;
    let invoice = client.create_invoice(&invoice_request()).await?;

    println!("Invoice {} created", invoice.txn_id);
    println!("Redirect the payer to {}", invoice.invoice_url);
    Ok(())
}

async fn create_white_label(config: &PlisioConfig) -> axon_payments::Result<()> {
    let client = PlisioClient::<WhiteLabel>::from_config(config)?;
    let invoice = client.create_invoice(&invoice_request()).await?;

    println!(
        "Invoice {} created ({})",
        invoice.txn_id,
        invoice.status.as_deref().unwrap_or("unknown")
    );
    match (invoice.amount, invoice.currency.as_deref(), invoice.wallet_hash.as_deref()) {
        (Some(amount), Some(currency), Some(wallet)) => {
            println!("Send {} {} to {}", amount, currency, wallet);
        }
        _ => println!("Shop is not in white-label mode, redirect to {}", invoice.invoice_url),
    }
    if let Some(expires) = invoice.expire_utc {
        println!("Expires at unix time {}", expires);
    }
    Ok(())
}
