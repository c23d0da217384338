//! Error types for Instagram API calls.
//!
//! Every failure is returned to the immediate caller. Nothing here is retried
//! or logged as a side effect of construction; callers decide what to do with
//! a classified [`ApiError`] or a transport failure.

use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::envelope::Meta;

/// A structured error reported by the Instagram API.
///
/// Same shape as the envelope's [`Meta`], promoted to an error value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    /// Upstream error kind, e.g. `OAuthAccessTokenException`.
    pub error_type: String,
    /// Numeric code reported in the body (not necessarily the HTTP status).
    pub code: i64,
    /// Human readable message.
    pub error_message: String,
}

impl ApiError {
    /// Creates a new `ApiError`.
    pub fn new(error_type: impl Into<String>, code: i64, error_message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            code,
            error_message: error_message.into(),
        }
    }

    /// Returns `true` when every field is empty or zero.
    pub fn is_empty(&self) -> bool {
        self.error_type.is_empty() && self.code == 0 && self.error_message.is_empty()
    }
}

impl From<Meta> for ApiError {
    fn from(meta: Meta) -> Self {
        Self {
            error_type: meta.error_type,
            code: meta.code,
            error_message: meta.error_message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.error_type, self.code, self.error_message)
    }
}

impl std::error::Error for ApiError {}

/// The main error type for Instagram API calls.
///
/// # Examples
///
/// ```no_run
/// use instagram_client::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder().access_token("token").build()?;
///
/// match client.tags().get("nature").await {
///     Ok(tag) => println!("{} has {} posts", tag.name, tag.media_count),
///     Err(Error::Upstream { status, error }) => {
///         eprintln!("Instagram said no ({}): {}", status, error);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The endpoint path could not be parsed as a URL reference.
    #[error("Malformed URL: {0}")]
    MalformedUrl(#[from] url::ParseError),

    /// The underlying network call could not complete.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-200 status and a structured error.
    #[error("Instagram error (HTTP {status}): {error}")]
    Upstream {
        /// The HTTP status code of the response
        status: StatusCode,
        /// The classified error body
        error: ApiError,
    },

    /// The API answered with a non-200 status and an empty body.
    #[error("Unexpected HTTP status {status} with empty body")]
    UnexpectedStatus {
        /// The HTTP status code of the response
        status: StatusCode,
    },

    /// A successful response could not be decoded.
    ///
    /// Covers both JSON body decoding and header parsing. `raw_response` holds
    /// the text that failed to parse.
    #[error("Failed to parse response (status {status}): {message}")]
    Parse {
        /// The HTTP status code of the response
        status: StatusCode,
        /// What went wrong
        message: String,
        /// The raw text that failed to parse
        raw_response: String,
    },

    /// Invalid configuration was provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An error enriched with the request that produced it.
    #[error("{method} {url}: {source}")]
    Request {
        /// The HTTP method of the failed request
        method: Method,
        /// The fully resolved URL of the failed request
        url: Url,
        /// The underlying error
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps this error with the method and URL of the request that caused it.
    pub fn with_request(self, method: Method, url: Url) -> Self {
        Error::Request {
            method,
            url,
            source: Box::new(self),
        }
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            Error::UnexpectedStatus { status } => Some(*status),
            Error::Parse { status, .. } => Some(*status),
            Error::Request { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Returns the structured upstream error if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Upstream { error, .. } => Some(error),
            Error::Request { source, .. } => source.api_error(),
            _ => None,
        }
    }

    /// Returns the raw text that failed to parse, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Parse { raw_response, .. } => Some(raw_response),
            Error::Request { source, .. } => source.raw_response(),
            _ => None,
        }
    }

    /// Returns `true` if the API rejected the call for exceeding its quota.
    ///
    /// # Examples
    ///
    /// ```
    /// use instagram_client::{ApiError, Error};
    /// use http::StatusCode;
    ///
    /// let err = Error::Upstream {
    ///     status: StatusCode::TOO_MANY_REQUESTS,
    ///     error: ApiError::new("OAuthRateLimitException", 429, "slow down"),
    /// };
    /// assert!(err.is_rate_limited());
    /// ```
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }
}

/// A specialized `Result` type for Instagram API calls.
pub type Result<T> = std::result::Result<T, Error>;
