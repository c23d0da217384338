//! The JSON envelope Instagram wraps around every payload.
//!
//! ```json
//! {"meta": {"code": 200}, "data": ..., "pagination": {"next_url": "...", "next_max_id": "..."}}
//! ```

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Status metadata carried in the `meta` object.
///
/// On a healthy response only `code` (200) is present. When something goes
/// wrong upstream, `error_type` and `error_message` are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    /// Upstream error kind, e.g. `OAuthException`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error_type: String,

    /// Numeric status code echoed by the API.
    #[serde(skip_serializing_if = "is_zero")]
    pub code: i64,

    /// Human readable error message.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error_message: String,
}

impl Meta {
    /// Returns `true` when decoding found nothing usable.
    pub fn is_empty(&self) -> bool {
        self.error_type.is_empty() && self.code == 0 && self.error_message.is_empty()
    }

    /// Returns the error described by this metadata, if any.
    ///
    /// Only a non-empty `error_type` or `error_message` counts; a bare
    /// `code` is not an error.
    pub fn error(&self) -> Option<ApiError> {
        if self.error_type.is_empty() && self.error_message.is_empty() {
            return None;
        }
        Some(ApiError::from(self.clone()))
    }
}

fn is_zero(code: &i64) -> bool {
    *code == 0
}

/// Cursor for fetching the next page of a sequential result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Fully qualified URL of the next page.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub next_url: String,

    /// Value to pass as `max_id` to request the next page.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub next_max_id: String,
}

/// A decoded response envelope.
///
/// `data` is `None` when the body carried no payload or when the call site
/// asked for no payload at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            meta: None,
            data: None,
            pagination: None,
        }
    }
}
