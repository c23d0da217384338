//! Response wrapper that pairs the decoded envelope with HTTP details.
//!
//! Every call hands back its own [`Response`]; nothing is cached on the
//! client. Pagination, rate limit and envelope errors are read from the value
//! the call returned.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

use crate::envelope::{Envelope, Meta, Pagination};
use crate::rate_limit::RateLimit;
use crate::{ApiError, Result};

/// A successful (HTTP 200) Instagram response.
///
/// # Examples
///
/// ```no_run
/// use instagram_client::{Client, Media};
///
/// # async fn example() -> Result<(), instagram_client::Error> {
/// let client = Client::builder().access_token("token").build()?;
///
/// let response = client.get::<Vec<Media>>("users/self/media/recent").await?;
/// println!("Got {} posts", response.data().map_or(0, Vec::len));
/// println!("Next page: {:?}", response.next_url());
/// println!("Quota: {:?}", response.rate_limit()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded envelope.
    pub envelope: Envelope<T>,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request to reading the full body.
    pub latency: Duration,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(envelope: Envelope<T>, status: StatusCode, headers: HeaderMap, latency: Duration) -> Self {
        Self {
            envelope,
            status,
            headers,
            latency,
        }
    }

    /// Extra information about the response. On a healthy call only `code`
    /// is set.
    pub fn meta(&self) -> Option<&Meta> {
        self.envelope.meta.as_ref()
    }

    /// The payload, if the body carried one.
    pub fn data(&self) -> Option<&T> {
        self.envelope.data.as_ref()
    }

    /// Consumes the response and returns the payload.
    pub fn into_data(self) -> Option<T> {
        self.envelope.data
    }

    /// Pagination cursor, if the endpoint returns sequential data.
    pub fn pagination(&self) -> Option<&Pagination> {
        self.envelope.pagination.as_ref()
    }

    /// URL of the next page of data.
    pub fn next_url(&self) -> Option<&str> {
        self.pagination()
            .map(|p| p.next_url.as_str())
            .filter(|s| !s.is_empty())
    }

    /// `max_id` value to pass to fetch the next page.
    pub fn next_max_id(&self) -> Option<&str> {
        self.pagination()
            .map(|p| p.next_max_id.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Parses the `X-Ratelimit-*` headers.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] if either header is missing or not an
    /// integer.
    pub fn rate_limit(&self) -> Result<RateLimit> {
        RateLimit::from_headers(self.status, &self.headers)
    }

    /// Returns the error reported inside `meta`, if any.
    pub fn error(&self) -> Option<ApiError> {
        self.meta().and_then(Meta::error)
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Maps the payload to a different type, keeping the rest of the envelope.
    ///
    /// # Examples
    ///
    /// ```
    /// # use instagram_client::{Envelope, Response};
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let envelope = Envelope { meta: None, data: Some(42), pagination: None };
    /// let response = Response::new(envelope, StatusCode::OK, HeaderMap::new(), Duration::ZERO);
    ///
    /// let response = response.map(|n| n.to_string());
    /// assert_eq!(response.data().map(String::as_str), Some("42"));
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            envelope: Envelope {
                meta: self.envelope.meta,
                data: self.envelope.data.map(f),
                pagination: self.envelope.pagination,
            },
            status: self.status,
            headers: self.headers,
            latency: self.latency,
        }
    }
}
