//! Currency and invoice status codes accepted by the Plisio gateway.
//!
//! These closed sets constrain request and response types at compile time.
//! The client never validates values against them at runtime; the gateway
//! remains the authority on which codes are currently enabled.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Cryptocurrency identifiers (Plisio `psys_cid` values).
///
/// Serialized as the gateway's upper-case IDs, e.g. `BTC`, `USDT_TRX`.
///
/// # Examples
///
/// ```
/// use axon_payments::plisio::CryptoCurrency;
///
/// assert_eq!(CryptoCurrency::UsdtTrx.as_ref(), "USDT_TRX");
/// assert_eq!("ETH_BASE".parse::<CryptoCurrency>().unwrap(), CryptoCurrency::EthBase);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CryptoCurrency {
    /// Ethereum.
    Eth,
    /// Ethereum on Base.
    EthBase,
    /// Bitcoin.
    Btc,
    /// Litecoin.
    Ltc,
    /// Dash.
    Dash,
    /// Zcash (transparent).
    Tzec,
    /// Dogecoin.
    Doge,
    /// Bitcoin Cash.
    Bch,
    /// Monero.
    Xmr,
    /// Tether (ERC-20).
    Usdt,
    /// USD Coin (ERC-20).
    Usdc,
    /// USD Coin on Base.
    UsdcBase,
    /// Shiba Inu.
    Shib,
    /// `ApeCoin`.
    Ape,
    /// `BitTorrent`.
    Btt,
    /// Tether on Tron.
    UsdtTrx,
    /// Tron.
    Trx,
    /// BNB.
    Bnb,
    /// Binance USD.
    Busd,
    /// Tether on BNB Smart Chain.
    UsdtBsc,
    /// USD Coin on BNB Smart Chain.
    UsdcBsc,
    /// `LBRY` Credits.
    Lb,
    /// Ethereum Classic.
    Etc,
    /// Toncoin.
    Ton,
    /// Tether on TON.
    UsdtTon,
    /// Solana.
    Sol,
    /// Tether on Solana.
    UsdtSol,
}

/// Fiat currency codes (ISO 4217) accepted as `source_currency`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs, reason = "ISO 4217 codes are self-describing")]
pub enum FiatCurrency {
    Aed,
    Afn,
    All,
    Amd,
    Ang,
    Aoa,
    Ars,
    Aud,
    Awg,
    Azn,
    Bam,
    Bbd,
    Bdt,
    Bgn,
    Bhd,
    Bif,
    Bmd,
    Bnd,
    Bob,
    Brl,
    Bsd,
    Btn,
    Bwp,
    Byn,
    Byr,
    Bzd,
    Cad,
    Cdf,
    Chf,
    Clf,
    Clp,
    Cny,
    Cop,
    Crc,
    Cuc,
    Cup,
    Cve,
    Czk,
    Djf,
    Dkk,
    Dop,
    Dzd,
    Egp,
    Ern,
    Etb,
    Eur,
    Fjd,
    Fkp,
    Gbp,
    Gel,
    Ggp,
    Ghs,
    Gip,
    Gmd,
    Gnf,
    Gtq,
    Gyd,
    Hkd,
    Hnl,
    Hrk,
    Htg,
    Huf,
    Idr,
    Ils,
    Imp,
    Inr,
    Iqd,
    Irr,
    Isk,
    Jep,
    Jmd,
    Jod,
    Jpy,
    Kes,
    Kgs,
    Khr,
    Kmf,
    Kpw,
    Krw,
    Kwd,
    Kyd,
    Kzt,
    Lak,
    Lbp,
    Lkr,
    Lrd,
    Lsl,
    Ltl,
    Lvl,
    Lyd,
    Mad,
    Mdl,
    Mga,
    Mkd,
    Mmk,
    Mnt,
    Mop,
    Mro,
    Mur,
    Mvr,
    Mwk,
    Mxn,
    Myr,
    Mzn,
    Nad,
    Ngn,
    Nio,
    Nok,
    Npr,
    Nzd,
    Omr,
    Pab,
    Pen,
    Pgk,
    Php,
    Pkr,
    Pln,
    Pyg,
    Qar,
    Ron,
    Rsd,
    Rub,
    Rwf,
    Sar,
    Sbd,
    Scr,
    Sdg,
    Sek,
    Sgd,
    Shp,
    Sll,
    Sos,
    Srd,
    Std,
    Svc,
    Syp,
    Szl,
    Thb,
    Tjs,
    Tmt,
    Tnd,
    Top,
    Try,
    Ttd,
    Twd,
    Tzs,
    Uah,
    Ugx,
    Usd,
    Uyu,
    Uzs,
    Vef,
    Vnd,
    Vuv,
    Wst,
    Xaf,
    Xag,
    Xau,
    Xcd,
    Xdr,
    Xof,
    Xpf,
    Yer,
    Zar,
    Zmk,
    Zmw,
    Zwl,
}

/// Invoice lifecycle status.
///
/// - **new**: initial invoice status
/// - **pending**: some amount received, waiting for confirmations
/// - **pending internal**: moving invoice funds to the merchant wallet has started
/// - **expired**: check the `amount` field; the full amount may not have been paid
/// - **completed**: paid in full
/// - **mismatch**: overpaid
/// - **error**: an error occurred
/// - **cancelled**: no payment received within 10 hours
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InvoiceStatus {
    /// Initial status.
    New,
    /// Partially received, awaiting confirmations.
    Pending,
    /// Funds are being moved to the merchant wallet.
    #[serde(rename = "pending internal")]
    #[strum(serialize = "pending internal")]
    PendingInternal,
    /// Expired before full payment.
    Expired,
    /// Paid in full.
    Completed,
    /// Overpaid.
    Mismatch,
    /// Failed.
    Error,
    /// Cancelled without payment.
    Cancelled,
}

impl InvoiceStatus {
    /// Returns `true` once the invoice can no longer change state.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Expired | Self::Completed | Self::Mismatch | Self::Error | Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_crypto_currency_count() {
        assert_eq!(CryptoCurrency::iter().count(), 27);
    }

    #[test]
    fn test_fiat_currency_count() {
        assert_eq!(FiatCurrency::iter().count(), 167);
    }

    #[test]
    fn test_crypto_currency_codes() {
        let cases = [
            (CryptoCurrency::Btc, "BTC"),
            (CryptoCurrency::EthBase, "ETH_BASE"),
            (CryptoCurrency::Tzec, "TZEC"),
            (CryptoCurrency::UsdtTrx, "USDT_TRX"),
            (CryptoCurrency::UsdcBsc, "USDC_BSC"),
            (CryptoCurrency::Lb, "LB"),
            (CryptoCurrency::UsdtSol, "USDT_SOL"),
        ];

        for (currency, code) in cases {
            assert_eq!(currency.as_ref(), code);
            assert_eq!(currency.to_string(), code);
            assert_eq!(serde_json::to_value(currency).unwrap(), code);
            assert_eq!(code.parse::<CryptoCurrency>().unwrap(), currency);
        }
    }

    #[test]
    fn test_crypto_codes_serde_and_strum_agree() {
        for currency in CryptoCurrency::iter() {
            let json = serde_json::to_value(currency).unwrap();
            assert_eq!(json.as_str(), Some(currency.as_ref()));
        }
    }

    #[test]
    fn test_fiat_codes_are_three_upper_letters() {
        for currency in FiatCurrency::iter() {
            let code = currency.as_ref();
            assert_eq!(code.len(), 3, "{code}");
            assert!(code.chars().all(|c| c.is_ascii_uppercase()), "{code}");
            assert_eq!(serde_json::to_value(currency).unwrap(), code);
        }
    }

    #[test]
    fn test_fiat_currency_parse() {
        assert_eq!("USD".parse::<FiatCurrency>().unwrap(), FiatCurrency::Usd);
        assert_eq!("EUR".parse::<FiatCurrency>().unwrap(), FiatCurrency::Eur);
        assert!("usd".parse::<FiatCurrency>().is_err());
        assert!("XYZ".parse::<FiatCurrency>().is_err());
    }

    #[test]
    fn test_invoice_status_strings() {
        assert_eq!(InvoiceStatus::PendingInternal.as_ref(), "pending internal");
        assert_eq!(
            serde_json::to_value(InvoiceStatus::PendingInternal).unwrap(),
            "pending internal"
        );
        assert_eq!(
            serde_json::from_str::<InvoiceStatus>("\"pending internal\"").unwrap(),
            InvoiceStatus::PendingInternal
        );
        assert_eq!(serde_json::from_str::<InvoiceStatus>("\"new\"").unwrap(), InvoiceStatus::New);
        assert_eq!(InvoiceStatus::iter().count(), 8);
    }

    #[test]
    fn test_invoice_status_is_final() {
        assert!(!InvoiceStatus::New.is_final());
        assert!(!InvoiceStatus::Pending.is_final());
        assert!(!InvoiceStatus::PendingInternal.is_final());
        assert!(InvoiceStatus::Completed.is_final());
        assert!(InvoiceStatus::Cancelled.is_final());
    }
}
