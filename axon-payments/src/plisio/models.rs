//! Request and response payloads for the Plisio API.
//!
//! Request types serialize into flat maps of scalars and sequences, which
//! [`query::serialize`](super::query::serialize) turns into a query string.
//! The client does not validate values. The gateway rejects what it does not
//! accept and the rejection surfaces as
//! [`PaymentsError::RequestFailed`](crate::error::PaymentsError::RequestFailed).
//!
//! Response types keep every field the gateway sends. Fields without a
//! dedicated member land in `extra`. Currency, status and type codes stay
//! strings on the response side, so codes the gateway adds later decode
//! like any other. The `known_*` accessors map them onto the enums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumString};

use super::currency::{CryptoCurrency, FiatCurrency, InvoiceStatus};

/// Parameters for `invoices/new`.
///
/// Build with [`InvoiceRequest::new`] and the chained setters, or fill the
/// public fields directly. Unset optional fields are left out of the query.
///
/// # Examples
///
/// ```
/// use axon_payments::plisio::{CryptoCurrency, FiatCurrency, InvoiceRequest};
/// use rust_decimal::Decimal;
///
/// let request = InvoiceRequest::new("Order #1042", 1042)
///     .source(FiatCurrency::Usd, Decimal::new(2499, 2))
///     .allowed_currencies([CryptoCurrency::Btc, CryptoCurrency::UsdtTrx])
///     .expire_min(30);
///
/// assert_eq!(request.source_amount, Some(Decimal::new(2499, 2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceRequest {
    /// Cryptocurrency to pay with. The gateway picks one from the shop
    /// settings when unset.
    pub currency: Option<CryptoCurrency>,

    /// Merchant internal order name.
    pub order_name: String,

    /// Merchant internal order number. Must be unique per shop.
    pub order_number: u64,

    /// Amount in `currency`. Leave unset when converting from fiat.
    pub amount: Option<Decimal>,

    /// Fiat currency to convert from.
    pub source_currency: Option<FiatCurrency>,

    /// Amount in `source_currency`.
    pub source_amount: Option<Decimal>,

    /// Cryptocurrencies the payer may choose from. Sent comma-joined.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_psys_cids: Vec<CryptoCurrency>,

    /// Invoice description.
    pub description: Option<String>,

    /// URL receiving status update callbacks (POST).
    pub callback_url: Option<String>,

    /// URL receiving the callback for a paid invoice.
    pub success_callback_url: Option<String>,

    /// URL receiving the callback for a failed invoice.
    pub fail_callback_url: Option<String>,

    /// "To the site" link shown on a paid invoice.
    pub success_invoice_url: Option<String>,

    /// "To the site" link shown on an unpaid invoice.
    pub fail_invoice_url: Option<String>,

    /// Pre-filled payer email flag.
    pub email: Option<bool>,

    /// Invoice page language (`en_US`).
    pub language: Option<String>,

    /// Integration plugin name.
    pub plugin: Option<String>,

    /// Integration plugin version.
    pub version: Option<String>,

    /// Redirect to the hosted invoice page instead of returning JSON.
    /// Has no effect in white-label mode.
    pub redirect_to_invoice: Option<bool>,

    /// Minutes until the invoice expires.
    pub expire_min: Option<u32>,

    /// Return the existing invoice for a reused order number instead of an
    /// error.
    pub return_existing: Option<bool>,
}

impl InvoiceRequest {
    /// Creates a request with only the order name and number set.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn new(order_name: impl Into<String>, order_number: u64) -> Self {
        Self { order_name: order_name.into(), order_number, ..Self::default() }
    }

    /// Sets a crypto amount to charge.
    #[must_use]
    pub fn amount(mut self, currency: CryptoCurrency, amount: Decimal) -> Self {
        self.currency = Some(currency);
        self.amount = Some(amount);
        self
    }

    /// Sets a fiat amount to convert at the current rate.
    #[must_use]
    pub fn source(mut self, currency: FiatCurrency, amount: Decimal) -> Self {
        self.source_currency = Some(currency);
        self.source_amount = Some(amount);
        self
    }

    /// Sets the payment currency without an amount.
    #[must_use]
    pub fn currency(mut self, currency: CryptoCurrency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Restricts the currencies offered to the payer.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl IntoIterator keeps call sites free of Vec allocations"
    )]
    pub fn allowed_currencies(mut self, currencies: impl IntoIterator<Item = CryptoCurrency>) -> Self {
        self.allowed_psys_cids = currencies.into_iter().collect();
        self
    }

    /// Sets the invoice description.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status callback URL.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Sets the paid and failed callback URLs.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn result_callbacks(mut self, success: impl Into<String>, fail: impl Into<String>) -> Self {
        self.success_callback_url = Some(success.into());
        self.fail_callback_url = Some(fail.into());
        self
    }

    /// Sets the "To the site" links for paid and unpaid invoices.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn invoice_links(mut self, success: impl Into<String>, fail: impl Into<String>) -> Self {
        self.success_invoice_url = Some(success.into());
        self.fail_invoice_url = Some(fail.into());
        self
    }

    /// Sets the email flag.
    #[must_use]
    pub fn email(mut self, email: bool) -> Self {
        self.email = Some(email);
        self
    }

    /// Sets the invoice page language.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Identifies the integration plugin and its version.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn plugin(mut self, plugin: impl Into<String>, version: impl Into<String>) -> Self {
        self.plugin = Some(plugin.into());
        self.version = Some(version.into());
        self
    }

    /// Sets the redirect flag.
    #[must_use]
    pub fn redirect_to_invoice(mut self, redirect: bool) -> Self {
        self.redirect_to_invoice = Some(redirect);
        self
    }

    /// Sets the expiry interval in minutes.
    #[must_use]
    pub fn expire_min(mut self, minutes: u32) -> Self {
        self.expire_min = Some(minutes);
        self
    }

    /// Sets the return-existing flag.
    #[must_use]
    pub fn return_existing(mut self, return_existing: bool) -> Self {
        self.return_existing = Some(return_existing);
        self
    }
}

/// Withdrawal kind.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WithdrawType {
    /// Single destination.
    #[default]
    CashOut,
    /// Several destinations in one transaction.
    MassCashOut,
}

/// Network fee tier for a withdrawal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeePlan {
    /// Standard fee and confirmation time.
    #[default]
    Normal,
    /// Higher fee, faster confirmation.
    Priority,
}

/// Parameters for `operations/withdraw`.
///
/// `to` and `amount` are parallel sequences sent comma-joined. For
/// [`WithdrawType::MassCashOut`] they must have equal length. The client
/// does not check this; the gateway rejects mismatched requests.
///
/// # Examples
///
/// ```
/// use axon_payments::plisio::{CryptoCurrency, FeePlan, WithdrawRequest, WithdrawType};
/// use rust_decimal::Decimal;
///
/// let request = WithdrawRequest::mass_cash_out(
///     CryptoCurrency::Ltc,
///     [("ltc1qa", Decimal::new(5, 1)), ("ltc1qb", Decimal::new(125, 2))],
///     FeePlan::Priority,
/// );
///
/// assert_eq!(request.kind, WithdrawType::MassCashOut);
/// assert!(request.is_balanced());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawRequest {
    /// Currency to withdraw.
    pub currency: CryptoCurrency,

    /// Withdrawal kind.
    #[serde(rename = "type")]
    pub kind: WithdrawType,

    /// Destination wallet addresses.
    pub to: Vec<String>,

    /// Amounts, one per destination.
    pub amount: Vec<Decimal>,

    /// Fee tier.
    #[serde(rename = "feePlan")]
    pub fee_plan: FeePlan,
}

impl WithdrawRequest {
    /// Creates a single-destination withdrawal.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn cash_out(
        currency: CryptoCurrency,
        to: impl Into<String>,
        amount: Decimal,
        fee_plan: FeePlan,
    ) -> Self {
        Self {
            currency,
            kind: WithdrawType::CashOut,
            to: vec![to.into()],
            amount: vec![amount],
            fee_plan,
        }
    }

    /// Creates a multi-destination withdrawal from `(address, amount)` pairs.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl IntoIterator keeps call sites free of Vec allocations"
    )]
    pub fn mass_cash_out<S: Into<String>>(
        currency: CryptoCurrency,
        payouts: impl IntoIterator<Item = (S, Decimal)>,
        fee_plan: FeePlan,
    ) -> Self {
        let (to, amount) = payouts.into_iter().map(|(to, amount)| (to.into(), amount)).unzip();
        Self { currency, kind: WithdrawType::MassCashOut, to, amount, fee_plan }
    }

    /// Returns `true` when every destination has exactly one amount.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.to.len() == self.amount.len()
    }
}

/// Invoice payload returned in default mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSuccess {
    /// Gateway transaction ID.
    pub txn_id: String,

    /// Hosted invoice page.
    pub invoice_url: String,

    /// Fields without a dedicated member.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Invoice payload returned in white-label mode.
///
/// Carries everything needed to render checkout without the hosted page.
/// Only `txn_id` and `invoice_url` are required: a shop that is not switched
/// to white-label answers with the hosted payload, which decodes here too
/// with the checkout fields left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSuccessWhiteLabel {
    /// Gateway transaction ID.
    pub txn_id: String,

    /// Hosted invoice page.
    pub invoice_url: String,

    /// Amount to pay in `currency`.
    #[serde(default)]
    pub amount: Option<Decimal>,

    /// Amount still outstanding.
    #[serde(default)]
    pub pending_amount: Option<Decimal>,

    /// Deposit address.
    #[serde(default)]
    pub wallet_hash: Option<String>,

    /// Cryptocurrency ID.
    #[serde(default)]
    pub psys_cid: Option<String>,

    /// Cryptocurrency code.
    #[serde(default)]
    pub currency: Option<String>,

    /// Invoice status.
    #[serde(default)]
    pub status: Option<String>,

    /// Fiat currency the amount was converted from.
    #[serde(default)]
    pub source_currency: Option<String>,

    /// Conversion rate from `source_currency`.
    #[serde(default)]
    pub source_rate: Option<Decimal>,

    /// Expiry as a Unix timestamp.
    #[serde(default, deserialize_with = "lenient::option_u64")]
    pub expire_utc: Option<u64>,

    /// Confirmations required before the invoice completes.
    #[serde(default, deserialize_with = "lenient::option_u64")]
    pub expected_confirmations: Option<u64>,

    /// QR code as a data URI.
    #[serde(default)]
    pub qr_code: Option<String>,

    /// Hash for verifying callbacks.
    #[serde(default)]
    pub verify_hash: Option<String>,

    /// Gateway commission.
    #[serde(default)]
    pub invoice_commission: Option<Decimal>,

    /// Invoice amount excluding commission.
    #[serde(default)]
    pub invoice_sum: Option<Decimal>,

    /// Invoice amount including commission.
    #[serde(default)]
    pub invoice_total_sum: Option<Decimal>,

    /// Fields without a dedicated member.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvoiceSuccessWhiteLabel {
    /// `currency` as a [`CryptoCurrency`], if it is a listed code.
    #[must_use]
    pub fn known_currency(&self) -> Option<CryptoCurrency> {
        self.currency.as_deref().and_then(|code| code.parse().ok())
    }

    /// `status` as an [`InvoiceStatus`], if it is a listed value.
    #[must_use]
    pub fn known_status(&self) -> Option<InvoiceStatus> {
        self.status.as_deref().and_then(|status| status.parse().ok())
    }
}

/// Withdrawal payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawSuccess {
    /// Operation ID.
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,

    /// Withdrawal kind, e.g. `cash_out`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Operation status as reported by the gateway.
    pub status: String,

    /// Withdrawn currency code.
    pub currency: String,

    /// Total amount sent.
    #[serde(default)]
    pub amount: Option<Decimal>,

    /// Network fee charged.
    #[serde(default)]
    pub fee: Option<Decimal>,

    /// Fiat currency used for rate reporting.
    #[serde(default)]
    pub source_currency: Option<String>,

    /// Rate against `source_currency`.
    #[serde(default)]
    pub source_rate: Option<Decimal>,

    /// Creation time as a Unix timestamp.
    #[serde(default, deserialize_with = "lenient::option_u64")]
    pub created_at_utc: Option<u64>,

    /// Fields without a dedicated member (transaction IDs, explorer links).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WithdrawSuccess {
    /// `kind` as a [`WithdrawType`], if it is a listed value.
    #[must_use]
    pub fn known_kind(&self) -> Option<WithdrawType> {
        self.kind.parse().ok()
    }

    /// `currency` as a [`CryptoCurrency`], if it is a listed code.
    #[must_use]
    pub fn known_currency(&self) -> Option<CryptoCurrency> {
        self.currency.parse().ok()
    }
}

/// Payload the gateway posts to `callback_url`.
///
/// Only decoding is provided. Checking `verify_hash` is up to the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvoiceCallback {
    /// Gateway transaction ID.
    #[serde(deserialize_with = "lenient::string")]
    pub txn_id: String,

    /// Notification type.
    pub ipn_type: String,

    /// Merchant name.
    pub merchant: String,

    /// Merchant ID.
    #[serde(deserialize_with = "lenient::string")]
    pub merchant_id: String,

    /// Amount received in `currency`.
    pub amount: Decimal,

    /// Paid cryptocurrency code.
    pub currency: String,

    /// Merchant order number.
    #[serde(deserialize_with = "lenient::u64")]
    pub order_number: u64,

    /// Merchant order name.
    pub order_name: String,

    /// Confirmations so far.
    #[serde(deserialize_with = "lenient::u64")]
    pub confirmations: u64,

    /// Invoice status.
    pub status: String,

    /// Fiat currency the invoice was priced in.
    #[serde(default)]
    pub source_currency: Option<String>,

    /// Fiat amount.
    #[serde(default)]
    pub source_amount: Option<Decimal>,

    /// Conversion rate.
    #[serde(default)]
    pub source_rate: Option<Decimal>,

    /// Free-form comment.
    #[serde(default)]
    pub comment: Option<String>,

    /// Callback hash.
    pub verify_hash: String,

    /// Gateway commission.
    #[serde(default)]
    pub invoice_commission: Option<Decimal>,

    /// Invoice amount excluding commission.
    #[serde(default)]
    pub invoice_sum: Option<Decimal>,

    /// Invoice amount including commission.
    #[serde(default)]
    pub invoice_total_sum: Option<Decimal>,

    /// Fields without a dedicated member.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvoiceCallback {
    /// `status` as an [`InvoiceStatus`], if it is a listed value.
    #[must_use]
    pub fn known_status(&self) -> Option<InvoiceStatus> {
        self.status.parse().ok()
    }

    /// `source_currency` as a [`FiatCurrency`], if it is a listed code.
    #[must_use]
    pub fn known_source_currency(&self) -> Option<FiatCurrency> {
        self.source_currency.as_deref().and_then(|code| code.parse().ok())
    }
}

/// Deserializers for fields the gateway sends either as numbers or strings.
mod lenient {
    use std::fmt;

    use serde::{
        Deserializer,
        de::{self, Visitor},
    };

    struct U64Visitor;

    impl Visitor<'_> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or a string containing one")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_sign_loss,
            clippy::float_cmp,
            reason = "value is checked to be a non-negative whole number first"
        )]
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64 {
                Ok(v as u64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.trim().parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    struct StringVisitor;

    impl Visitor<'_> for StringVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    pub(super) fn u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(U64Visitor)
    }

    pub(super) fn option_u64<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        struct OptionVisitor;

        impl<'de> Visitor<'de> for OptionVisitor {
            type Value = Option<u64>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an optional integer")
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
                u64(d).map(Some)
            }
        }

        deserializer.deserialize_option(OptionVisitor)
    }

    pub(super) fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(StringVisitor)
    }
}
