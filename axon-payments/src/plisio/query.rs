//! Query string construction.
//!
//! Every Plisio call is a GET whose parameters, including the secret key,
//! travel in the query string. A request struct is flattened into ordered
//! `(key, value)` pairs with these rules:
//!
//! - `None` / `null` fields are omitted
//! - Strings and numbers are written as-is, booleans as `true` / `false`
//! - Sequences of scalars are joined with `,` into a single value
//! - Nested maps and nested sequences are rejected
//! - `api_key` is forced to the client's secret, overriding any caller value
//!
//! `false` is sent like any other value. Some gateway flags are presence
//! checks, so `return_existing=false` may behave like `true`.

use serde::Serialize;
use serde_json::Value;
use url::{Url, form_urlencoded};

use crate::error::{PaymentsError, Result};

/// Query parameter carrying the secret key.
pub const AUTH_PARAM: &str = "api_key";

const REDACTED: &str = "REDACTED";

/// Flattens `params` into ordered query pairs with `api_key` set to `auth_token`.
///
/// Field order follows the serialization order of `params`. A caller-supplied
/// `api_key` keeps its position but takes the new value; otherwise `api_key`
/// is appended last.
///
/// # Errors
///
/// Returns [`PaymentsError::InvalidInput`] if `params` does not serialize to
/// a map, or a field holds a nested map or a nested sequence.
pub fn to_pairs<T>(params: &T, auth_token: &str) -> Result<Vec<(String, String)>>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(params)
        .map_err(|e| PaymentsError::InvalidInput(format!("cannot serialize parameters: {e}")))?;

    let Value::Object(map) = value else {
        return Err(PaymentsError::InvalidInput(
            "query parameters must serialize to a map".to_owned(),
        ));
    };

    let mut pairs = Vec::with_capacity(map.len() + 1);
    let mut has_auth = false;

    for (key, value) in map {
        if key == AUTH_PARAM {
            has_auth = true;
            pairs.push((key, auth_token.to_owned()));
            continue;
        }

        if let Some(text) = flatten_value(&key, &value)? {
            pairs.push((key, text));
        }
    }

    if !has_auth {
        pairs.push((AUTH_PARAM.to_owned(), auth_token.to_owned()));
    }

    Ok(pairs)
}

/// Serializes `params` into an `application/x-www-form-urlencoded` query
/// string authenticated with `auth_token`.
///
/// # Errors
///
/// Same as [`to_pairs`].
///
/// # Examples
///
/// ```
/// use axon_payments::plisio::{CryptoCurrency, InvoiceRequest, query};
///
/// let request = InvoiceRequest::new("order 1", 1)
///     .allowed_currencies([CryptoCurrency::Btc, CryptoCurrency::Eth]);
///
/// let query = query::serialize(&request, "k1")?;
/// assert_eq!(query, "order_name=order+1&order_number=1&allowed_psys_cids=BTC%2CETH&api_key=k1");
/// # Ok::<(), axon_payments::error::PaymentsError>(())
/// ```
pub fn serialize<T>(params: &T, auth_token: &str) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let pairs = to_pairs(params, auth_token)?;

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }

    Ok(serializer.finish())
}

/// Returns `path?query` of `url` with the `api_key` value masked, for logs.
#[must_use]
pub fn redacted(url: &Url) -> String {
    let Some(query) = url.query() else {
        return url.path().to_owned();
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key == AUTH_PARAM {
            serializer.append_pair(&key, REDACTED);
        } else {
            serializer.append_pair(&key, &value);
        }
    }

    format!("{}?{}", url.path(), serializer.finish())
}

fn flatten_value(key: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => {
            let mut joined = Vec::with_capacity(items.len());
            for item in items {
                match scalar(item) {
                    Some(text) => joined.push(text),
                    None => {
                        return Err(PaymentsError::InvalidInput(format!(
                            "sequence '{key}' must only contain strings, numbers or booleans"
                        )));
                    }
                }
            }
            Ok(Some(joined.join(",")))
        }
        Value::Object(_) => {
            Err(PaymentsError::InvalidInput(format!("field '{key}' is a nested map")))
        }
        scalar_value => Ok(scalar(scalar_value)),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::plisio::{CryptoCurrency, FeePlan, FiatCurrency, InvoiceRequest, WithdrawRequest};

    fn count_auth(query: &str) -> usize {
        form_urlencoded::parse(query.as_bytes()).filter(|(k, _)| k == AUTH_PARAM).count()
    }

    #[test]
    fn test_serialize_invoice_request() {
        let request = InvoiceRequest::new("o1", 1).source(FiatCurrency::Usd, Decimal::from(10));

        let query = serialize(&request, "k1").unwrap();
        assert_eq!(query, "order_name=o1&order_number=1&source_currency=USD&source_amount=10&api_key=k1");
    }

    #[test]
    fn test_serialize_appends_api_key_once() {
        let query = serialize(&json!({"a": 1}), "secret").unwrap();
        assert_eq!(query, "a=1&api_key=secret");
        assert_eq!(count_auth(&query), 1);
    }

    #[test]
    fn test_serialize_overrides_caller_api_key() {
        let params = json!({"api_key": "attacker", "order_name": "o1"});

        let pairs = to_pairs(&params, "k1").unwrap();
        assert_eq!(pairs, vec![
            ("api_key".to_owned(), "k1".to_owned()),
            ("order_name".to_owned(), "o1".to_owned()),
        ]);
    }

    #[test]
    fn test_serialize_null_api_key_is_still_overridden() {
        let pairs = to_pairs(&json!({"api_key": null}), "k1").unwrap();
        assert_eq!(pairs, vec![("api_key".to_owned(), "k1".to_owned())]);
    }

    #[test]
    fn test_serialize_joins_sequences() {
        let params = json!({"allowed_psys_cids": ["BTC", "ETH", "TZEC"]});
        let pairs = to_pairs(&params, "k").unwrap();
        assert_eq!(pairs[0], ("allowed_psys_cids".to_owned(), "BTC,ETH,TZEC".to_owned()));
    }

    #[test]
    fn test_serialize_withdraw_request() {
        let request = WithdrawRequest::mass_cash_out(
            CryptoCurrency::Btc,
            [("bc1qa", Decimal::new(15, 1)), ("bc1qb", Decimal::new(2, 0))],
            FeePlan::Priority,
        );

        let query = serialize(&request, "k1").unwrap();
        assert_eq!(
            query,
            "currency=BTC&type=mass_cash_out&to=bc1qa%2Cbc1qb&amount=1.5%2C2&feePlan=priority&api_key=k1"
        );
    }

    #[test]
    fn test_serialize_booleans_pass_through() {
        let request = InvoiceRequest::new("o1", 1).email(false).return_existing(true);

        let pairs = to_pairs(&request, "k").unwrap();
        assert!(pairs.contains(&("email".to_owned(), "false".to_owned())));
        assert!(pairs.contains(&("return_existing".to_owned(), "true".to_owned())));
    }

    #[test]
    fn test_serialize_omits_none() {
        let pairs = to_pairs(&InvoiceRequest::new("o1", 1), "k").unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["order_name", "order_number", "api_key"]);
    }

    #[test]
    fn test_serialize_percent_encodes_values() {
        let request = InvoiceRequest::new("books & media", 1)
            .callback_url("https://shop.example.com/cb?json=true");

        let query = serialize(&request, "k/+=").unwrap();
        assert!(query.contains("order_name=books+%26+media"));
        assert!(query.contains("callback_url=https%3A%2F%2Fshop.example.com%2Fcb%3Fjson%3Dtrue"));
        assert!(query.ends_with("api_key=k%2F%2B%3D"));

        let decoded: BTreeMap<String, String> =
            form_urlencoded::parse(query.as_bytes()).into_owned().collect();
        assert_eq!(decoded["api_key"], "k/+=");
    }

    #[test]
    fn test_serialize_rejects_nested_map() {
        let result = to_pairs(&json!({"meta": {"a": 1}}), "k");
        assert!(matches!(result, Err(PaymentsError::InvalidInput(msg)) if msg.contains("meta")));
    }

    #[test]
    fn test_serialize_rejects_nested_sequence() {
        let result = to_pairs(&json!({"to": [["a"], ["b"]]}), "k");
        assert!(matches!(result, Err(PaymentsError::InvalidInput(_))));

        let result = to_pairs(&json!({"to": ["a", null]}), "k");
        assert!(matches!(result, Err(PaymentsError::InvalidInput(_))));
    }

    #[test]
    fn test_serialize_rejects_non_map() {
        let result = to_pairs(&["a", "b"], "k");
        assert!(matches!(result, Err(PaymentsError::InvalidInput(_))));

        let result = to_pairs(&42, "k");
        assert!(matches!(result, Err(PaymentsError::InvalidInput(_))));
    }

    #[test]
    fn test_redacted_masks_api_key() {
        let url = Url::parse("https://api.plisio.net/api/v1/invoices/new?order_name=o1&api_key=k1")
            .unwrap();
        let redacted = redacted(&url);
        assert_eq!(redacted, "/api/v1/invoices/new?order_name=o1&api_key=REDACTED");
        assert!(!redacted.contains("k1"));
    }

    #[test]
    fn test_redacted_without_query() {
        let url = Url::parse("https://api.plisio.net/api/v1/invoices/new").unwrap();
        assert_eq!(redacted(&url), "/api/v1/invoices/new");
    }
}
