//! Rate limit snapshot parsed from response headers.
//!
//! Instagram reports quota on every response through `X-Ratelimit-Limit`
//! (calls allowed per hour) and `X-Ratelimit-Remaining` (calls left in the
//! current window). The client never acts on these values itself.

use http::{HeaderMap, StatusCode};

use crate::{Error, Result};

/// Header carrying the total number of calls allowed per hour.
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Header carrying the number of calls left in the current window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// API call quota as reported by the last response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Total number of possible calls per hour.
    pub limit: u64,

    /// How many calls are left for this token or client id.
    pub remaining: u64,
}

impl RateLimit {
    /// Parses both rate limit headers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if either header is absent or not an integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use instagram_client::rate_limit::RateLimit;
    /// use http::{HeaderMap, StatusCode};
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("x-ratelimit-limit", "5000".parse().unwrap());
    /// headers.insert("x-ratelimit-remaining", "4999".parse().unwrap());
    ///
    /// let rate_limit = RateLimit::from_headers(StatusCode::OK, &headers).unwrap();
    /// assert_eq!((rate_limit.limit, rate_limit.remaining), (5000, 4999));
    /// ```
    pub fn from_headers(status: StatusCode, headers: &HeaderMap) -> Result<Self> {
        Ok(Self {
            limit: parse_header(status, headers, LIMIT_HEADER)?,
            remaining: parse_header(status, headers, REMAINING_HEADER)?,
        })
    }

    /// Returns `true` if no calls are left in the current window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

fn parse_header(status: StatusCode, headers: &HeaderMap, name: &str) -> Result<u64> {
    let value = headers.get(name).ok_or_else(|| Error::Parse {
        status,
        message: format!("missing {} header", name),
        raw_response: String::new(),
    })?;

    let text = value.to_str().map_err(|e| Error::Parse {
        status,
        message: format!("{} header is not visible ASCII: {}", name, e),
        raw_response: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })?;

    text.trim().parse::<u64>().map_err(|e| Error::Parse {
        status,
        message: format!("{} header is not an integer: {}", name, e),
        raw_response: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(limit: &'static str, remaining: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LIMIT_HEADER, HeaderValue::from_static(limit));
        headers.insert(REMAINING_HEADER, HeaderValue::from_static(remaining));
        headers
    }

    #[test]
    fn test_parse_rate_limit() {
        let rate_limit = RateLimit::from_headers(StatusCode::OK, &headers("5000", "4999")).unwrap();
        assert_eq!(
            rate_limit,
            RateLimit {
                limit: 5000,
                remaining: 4999
            }
        );
        assert!(!rate_limit.is_exhausted());
    }

    #[test]
    fn test_missing_header_is_parse_error() {
        let mut headers = HeaderMap::new();
        headers.insert(LIMIT_HEADER, HeaderValue::from_static("5000"));

        let err = RateLimit::from_headers(StatusCode::OK, &headers).unwrap_err();
        match err {
            Error::Parse { message, .. } => assert!(message.contains(REMAINING_HEADER)),
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_header_is_parse_error() {
        let err = RateLimit::from_headers(StatusCode::OK, &headers("lots", "4999")).unwrap_err();
        match err {
            Error::Parse { raw_response, .. } => assert_eq!(raw_response, "lots"),
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_exhausted() {
        let rate_limit = RateLimit::from_headers(StatusCode::OK, &headers("5000", "0")).unwrap();
        assert!(rate_limit.is_exhausted());
    }
}
