//! Response classification.
//!
//! Plisio wraps every answer in an envelope tagged by `status`:
//!
//! ```json
//! {"status": "success", "data": { ... }}
//! {"status": "error", "data": {"name": "...", "message": "...", "code": 104}}
//! ```
//!
//! [`classify`] turns a transport result into the `data` payload or a
//! [`PaymentsError`]:
//!
//! | Transport result | Outcome |
//! |------------------|---------|
//! | 2xx, `status: success` | `Ok(data)` |
//! | 2xx, `status: error` | `RequestFailed` with `data.message` |
//! | 2xx, anything else | `UnknownError` with the decode error |
//! | non-2xx with an error body | `RequestFailed` with `data.message` |
//! | non-2xx without one | `RequestFailed` with `gateway returned status N` |
//! | no response | `UnknownError`, passed through unchanged |
//!
//! The payload is decoded into whatever type the caller asks for. Nothing is
//! reshaped by mode.

use serde::{Deserialize, de::DeserializeOwned};
use tracing::error;

use crate::{
    error::{PaymentsError, Result},
    transport::TransportResponse,
};

/// Response envelope, tagged by `status` with the payload under `data`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum ResponseEnvelope<T> {
    /// The call succeeded.
    Success(T),
    /// The gateway rejected the call.
    Error(GatewayErrorBody),
}

/// `data` of an error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayErrorBody {
    /// Error name, e.g. `"Bad Request"`.
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable explanation.
    pub message: String,
    /// Gateway error code.
    #[serde(default)]
    pub code: Option<i64>,
}

impl From<GatewayErrorBody> for PaymentsError {
    fn from(body: GatewayErrorBody) -> Self {
        Self::RequestFailed { message: body.message, name: body.name, code: body.code }
    }
}

/// Loose view of an error body, used when the status code already says the
/// call failed and only `data.message` matters.
#[derive(Deserialize)]
struct ErrorProbe {
    data: Option<ErrorProbeData>,
}

#[derive(Deserialize)]
struct ErrorProbeData {
    #[serde(default)]
    name: Option<String>,
    message: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

/// Classifies a transport result into the success payload or an error.
///
/// Every error is logged with `tracing::error!` before it is returned.
///
/// # Errors
///
/// Returns [`PaymentsError::RequestFailed`] when the gateway answered with an
/// error and [`PaymentsError::UnknownError`] when no usable answer was
/// obtained. See the module documentation for the full table.
pub fn classify<T>(result: Result<TransportResponse>) -> Result<T>
where
    T: DeserializeOwned,
{
    let outcome = result.and_then(|response| {
        if response.is_success() {
            decode_success(&response)
        } else {
            Err(decode_failure(&response))
        }
    });

    if let Err(ref e) = outcome {
        log_failure(e);
    }

    outcome
}

fn decode_success<T: DeserializeOwned>(response: &TransportResponse) -> Result<T> {
    match serde_json::from_slice::<ResponseEnvelope<T>>(&response.body)? {
        ResponseEnvelope::Success(data) => Ok(data),
        ResponseEnvelope::Error(body) => Err(body.into()),
    }
}

fn decode_failure(response: &TransportResponse) -> PaymentsError {
    let fallback = format!("gateway returned status {}", response.status);

    match serde_json::from_slice::<ErrorProbe>(&response.body) {
        Ok(ErrorProbe { data: Some(data) }) => PaymentsError::RequestFailed {
            message: data.message.unwrap_or(fallback),
            name: data.name,
            code: data.code,
        },
        _ => {
            error!(
                status = response.status,
                body = %response.body_text(),
                "Plisio error response has no error envelope"
            );
            PaymentsError::RequestFailed { message: fallback, name: None, code: None }
        }
    }
}

fn log_failure(e: &PaymentsError) {
    match e {
        PaymentsError::RequestFailed { message, code, .. } => {
            error!(code = ?code, "Plisio request failed: {message}");
        }
        other => error!(error = %other, "Plisio request failed without a gateway answer"),
    }
}
