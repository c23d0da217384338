//! # instagram-client - A typed client for the Instagram v1 API
//!
//! Builds authenticated requests against `https://api.instagram.com/v1/`,
//! decodes the JSON envelope Instagram wraps around every payload, and turns
//! the API's inconsistent error bodies into one structured error type.
//!
//! ## Quick Start
//!
//! ```no_run
//! use instagram_client::{Client, Parameters};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), instagram_client::Error> {
//!     let client = Client::builder()
//!         .client_id("8f2c0ad697ea4094beb2b1753b7cde9c")
//!         .access_token("token")
//!         .build()?;
//!
//!     let params = Parameters::new().count(3);
//!     let (media, page) = client.tags().recent_media("nature", Some(&params)).await?;
//!     println!("Got {} posts, next page at {:?}", media.len(), page.next_url);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Credential injection** - `access_token`, `client_id` and `client_secret` are added to the
//!   query string unless the call already sets them
//! - **Signed forwarded-for header** - HMAC-SHA256 attestation of the end user's address
//! - **Envelope decoding** - `meta`, `data` and `pagination` decoded in a single pass
//! - **Error classification** - flat and `meta`-nested error bodies, plus the plain-text 500
//! - **Rate limit snapshot** - `X-Ratelimit-Limit` / `X-Ratelimit-Remaining` on every response
//! - **Automatic logging** - Structured logging with `tracing`
//!
//! The client performs one request per call. It never retries, caches or
//! throttles; that is left to the caller.
//!
//! ## Error Handling
//!
//! ```no_run
//! use instagram_client::{Client, Error, Tag};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new()?;
//! match client.get::<Tag>("tags/nature").await {
//!     Ok(response) => {
//!         println!("Success: {:?}", response.data());
//!         println!("Quota: {:?}", response.rate_limit());
//!     }
//!     Err(Error::Upstream { status, error }) => {
//!         eprintln!("HTTP {}: {} ({})", status, error.error_message, error.error_type);
//!     }
//!     Err(Error::Parse { raw_response, message, .. }) => {
//!         eprintln!("Could not decode {}: {}", raw_response, message);
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod classify;
mod client;
pub mod envelope;
mod error;
pub mod likes;
mod params;
pub mod rate_limit;
pub mod relationships;
mod response;
pub mod tags;
mod types;

pub use client::{Client, ClientBuilder, BASE_URL, LIBRARY_VERSION, USER_AGENT};
pub use envelope::{Envelope, Meta, Pagination};
pub use error::{ApiError, Error, Result};
pub use params::{form_body, Parameters};
pub use rate_limit::RateLimit;
pub use response::Response;
pub use types::{Count, Media, Relationship, Tag, User};
