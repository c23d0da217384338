//! Turns non-200 responses into structured errors.
//!
//! Instagram is inconsistent about error bodies. Some endpoints emit the error
//! object at the top level, others nest it under `meta`, and a 500 sometimes
//! comes back as the plain sentence "Oops, an error occurred." rather than JSON.

use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;

use crate::envelope::Meta;
use crate::ApiError;

/// Classifies a non-200 response body.
///
/// Returns `None` only when a status without special handling arrives with an
/// empty body.
pub fn classify(status: StatusCode, body: &[u8]) -> Option<ApiError> {
    match status {
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Some(flat(status, body)),
        StatusCode::INTERNAL_SERVER_ERROR => Some(internal_server_error()),
        _ if body.is_empty() => None,
        _ => Some(flat_or_nested(body)),
    }
}

/// The fixed error reported for every 500, whatever the body says.
pub fn internal_server_error() -> ApiError {
    ApiError::new(
        "Internal Server Error",
        i64::from(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
        "Oops, an error occurred.",
    )
}

fn flat(status: StatusCode, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<ApiError>(body) {
        Ok(error) => error,
        Err(e) => {
            tracing::debug!(error = %e, status = status.as_u16(), "Error body is not structured JSON");
            ApiError::new(
                "",
                i64::from(status.as_u16()),
                String::from_utf8_lossy(body).trim(),
            )
        }
    }
}

// Try the bare shape first; fall back to `{"meta": {...}}` only when the bare
// decode found nothing.
fn flat_or_nested(body: &[u8]) -> ApiError {
    let error = serde_json::from_slice::<ApiError>(body).unwrap_or_default();
    if !error.is_empty() {
        return error;
    }

    let mut nested = serde_json::from_slice::<HashMap<String, Value>>(body).unwrap_or_default();
    nested
        .remove("meta")
        .and_then(|meta| serde_json::from_value::<Meta>(meta).ok())
        .map(ApiError::from)
        .unwrap_or_default()
}
