//! HTTP client for the Instagram API.
//!
//! The [`Client`] type builds authenticated requests and executes them one at
//! a time. Use [`ClientBuilder`] to configure and create clients.

use crate::{
    auth::{Credentials, FORWARDED_FOR_HEADER},
    classify::classify,
    envelope::Envelope,
    Error, Response, Result,
};
use http::header::{CONTENT_TYPE, USER_AGENT as USER_AGENT_HEADER};
use http::{HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use url::Url;

/// Version of this library.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Instagram API base URL.
pub const BASE_URL: &str = "https://api.instagram.com/v1/";

/// Default `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("instagram-client v", env!("CARGO_PKG_VERSION"));

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A client for the Instagram API.
///
/// Each call performs exactly one HTTP round trip and returns its own
/// [`Response`]. The client holds no per-call state, so clones can be used
/// from several tasks at once.
///
/// # Examples
///
/// ```no_run
/// use instagram_client::{Client, Tag};
///
/// # async fn example() -> Result<(), instagram_client::Error> {
/// let client = Client::builder()
///     .client_id("8f2c0ad697ea4094beb2b1753b7cde9c")
///     .access_token("token")
///     .build()?;
///
/// let response = client.get::<Tag>("tags/nature").await?;
/// if let Some(tag) = response.data() {
///     println!("#{}: {} posts", tag.name, tag.media_count);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
    base_url: Url,
    user_agent: HeaderValue,
    credentials: Credentials,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a client with default settings and no credentials.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The base URL all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sets the authenticated user's access token.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.credentials.access_token = Some(token.into());
    }

    /// Sets the application's `client_id`.
    pub fn set_client_id(&mut self, client_id: impl Into<String>) {
        self.credentials.client_id = Some(client_id.into());
    }

    /// Sets the application's `client_secret`.
    pub fn set_client_secret(&mut self, client_secret: impl Into<String>) {
        self.credentials.client_secret = Some(client_secret.into());
    }

    /// Sets the end user's IP address for the signed forwarded-for header.
    pub fn set_forwarded_for(&mut self, address: impl Into<String>) {
        self.credentials.forwarded_for = Some(address.into());
    }

    /// Builds an authenticated request.
    ///
    /// `path` is resolved relative to the base URL and must not start with a
    /// `/`, which would replace the versioned base path. Credentials are added
    /// to the query string only where the path does not already set them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedUrl`] if `path` is not a valid URL reference.
    pub fn new_request(&self, method: Method, path: &str, body: Option<String>) -> Result<reqwest::Request> {
        let mut url = self.base_url.join(path)?;
        self.credentials.apply_to(&mut url);

        tracing::debug!(method = %method, path = %url.path(), "Building Instagram request");

        let submits_form = is_submission(&method);
        let mut request = reqwest::Request::new(method, url);

        let headers = request.headers_mut();
        headers.insert(USER_AGENT_HEADER, self.user_agent.clone());
        if submits_form {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        }
        if let Some(token) = self.credentials.forwarded_for_token()? {
            let value = HeaderValue::try_from(token)
                .map_err(|e| Error::Configuration(format!("Invalid forwarded-for address: {}", e)))?;
            headers.insert(FORWARDED_FOR_HEADER, value);
        }

        if let Some(body) = body {
            *request.body_mut() = Some(body.into());
        }
        if let Some(timeout) = self.timeout {
            *request.timeout_mut() = Some(timeout);
        }

        Ok(request)
    }

    /// Executes a request and decodes the envelope with a `T` payload.
    ///
    /// Only HTTP 200 counts as success. Any other status is classified into
    /// an error and the payload is never decoded.
    pub async fn execute<T>(&self, request: reqwest::Request) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let start_time = Instant::now();
        let response = self.dispatch(request, start_time).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        let latency = start_time.elapsed();

        match serde_json::from_slice::<Envelope<T>>(&body) {
            Ok(envelope) => Ok(Response::new(envelope, status, headers, latency)),
            Err(e) => {
                let raw_response = String::from_utf8_lossy(&body).into_owned();
                tracing::error!(
                    error = %e,
                    raw_response = %raw_response,
                    "Failed to decode Instagram envelope"
                );

                Err(Error::Parse {
                    status,
                    message: e.to_string(),
                    raw_response,
                })
            }
        }
    }

    /// Executes a request whose body is of no interest, such as a like.
    ///
    /// The body of a 200 response is discarded without decoding; the
    /// returned envelope is empty.
    pub async fn execute_unit(&self, request: reqwest::Request) -> Result<Response<()>> {
        let start_time = Instant::now();
        let response = self.dispatch(request, start_time).await?;

        let status = response.status();
        let headers = response.headers().clone();
        drop(response);

        Ok(Response::new(
            Envelope::default(),
            status,
            headers,
            start_time.elapsed(),
        ))
    }

    /// Builds and executes a request in one step.
    pub async fn call<T>(&self, method: Method, path: &str, body: Option<String>) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.new_request(method, path, body)?;
        self.execute(request).await
    }

    /// Builds and executes a request without decoding the response body.
    pub async fn call_unit(&self, method: Method, path: &str, body: Option<String>) -> Result<Response<()>> {
        let request = self.new_request(method, path, body)?;
        self.execute_unit(request).await
    }

    /// Makes a GET request to the specified path.
    pub async fn get<T>(&self, path: &str) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        self.call(Method::GET, path, None).await
    }

    /// Makes a POST request with a form-urlencoded body.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use instagram_client::{form_body, Client};
    ///
    /// # async fn example() -> Result<(), instagram_client::Error> {
    /// let client = Client::builder().access_token("token").build()?;
    /// let body = form_body([("action", "follow")]);
    /// let response = client.post_form::<serde_json::Value>("users/3/relationship", body).await?;
    /// println!("{:?}", response.data());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn post_form<T>(&self, path: &str, body: String) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        self.call(Method::POST, path, Some(body)).await
    }

    /// Makes a DELETE request to the specified path.
    pub async fn delete<T>(&self, path: &str) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        self.call(Method::DELETE, path, None).await
    }

    // Sends the request and hands back the response only when it is a 200.
    // Every other status reads the body once and goes through the classifier.
    async fn dispatch(&self, request: reqwest::Request, start_time: Instant) -> Result<reqwest::Response> {
        tracing::debug!(
            method = %request.method(),
            path = %request.url().path(),
            "Executing Instagram request"
        );

        let response = self.http_client.execute(request).await?;
        let status = response.status();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "Received Instagram response"
        );

        if status == StatusCode::OK {
            return Ok(response);
        }

        let body = response.bytes().await?;
        let raw_response = String::from_utf8_lossy(&body);

        if status.is_client_error() {
            tracing::error!(
                status = status.as_u16(),
                response = %raw_response,
                "Client error (4xx)"
            );
        } else {
            tracing::warn!(
                status = status.as_u16(),
                response = %raw_response,
                "Non-200 response"
            );
        }

        match classify(status, &body) {
            Some(error) => Err(Error::Upstream { status, error }),
            None => Err(Error::UnexpectedStatus { status }),
        }
    }
}

fn is_submission(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use instagram_client::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), instagram_client::Error> {
/// let client = ClientBuilder::new()
///     .client_id("id")
///     .client_secret("secret")
///     .access_token("token")
///     .forwarded_for("203.0.113.7")
///     .timeout(Duration::from_secs(30))
///     .user_agent("my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<HeaderValue>,
    credentials: Credentials,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` pointing at [`BASE_URL`].
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            credentials: Credentials::default(),
            timeout: None,
            http_client: None,
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// A trailing `/` is added when missing so relative paths extend the
    /// base path instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let mut url = Url::parse(url.as_ref())?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = Some(url);
        Ok(self)
    }

    /// Overrides the `User-Agent` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid header value.
    pub fn user_agent(mut self, user_agent: impl AsRef<str>) -> Result<Self> {
        let value = HeaderValue::try_from(user_agent.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid user agent: {}", e)))?;
        self.user_agent = Some(value);
        Ok(self)
    }

    /// Sets the authenticated user's access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.access_token = Some(token.into());
        self
    }

    /// Sets the application's `client_id`.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.credentials.client_id = Some(client_id.into());
        self
    }

    /// Sets the application's `client_secret`. Also the key used to sign the
    /// forwarded-for header.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.credentials.client_secret = Some(client_secret.into());
        self
    }

    /// Sets the end user's IP address. When set, every request carries a
    /// signed `X-Insta-Forwarded-For` header.
    pub fn forwarded_for(mut self, address: impl Into<String>) -> Self {
        self.credentials.forwarded_for = Some(address.into());
        self
    }

    /// Sets a per-request timeout. No timeout is applied by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a pre-configured `reqwest::Client` as the transport.
    ///
    /// The default transport never follows redirects, so a 3xx reaches the
    /// classifier as a failure. A client passed here keeps its own redirect
    /// policy; build it with `redirect::Policy::none()` to keep that behavior.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL cannot be parsed or the HTTP
    /// client cannot be created.
    pub fn build(self) -> Result<Client> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(BASE_URL)?,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?,
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| HeaderValue::from_static(USER_AGENT));

        Ok(Client {
            http_client,
            base_url,
            user_agent,
            credentials: self.credentials,
            timeout: self.timeout,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::builder()
            .access_token("token")
            .client_id("id")
            .client_secret("secret")
            .build()
            .unwrap()
    }

    fn query(request: &reqwest::Request, key: &str) -> Option<String> {
        request
            .url()
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_resolves_against_base_url() {
        let request = client().new_request(Method::GET, "tags/nature", None).unwrap();
        assert_eq!(request.url().path(), "/v1/tags/nature");
        assert_eq!(request.url().host_str(), Some("api.instagram.com"));
    }

    #[test]
    fn test_leading_slash_escapes_base_path() {
        let request = client().new_request(Method::GET, "/tags/nature", None).unwrap();
        assert_eq!(request.url().path(), "/tags/nature");
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = Client::builder()
            .base_url("https://api.instagram.com/v1")
            .unwrap()
            .build()
            .unwrap();
        let request = client.new_request(Method::GET, "media/popular", None).unwrap();
        assert_eq!(request.url().as_str(), "https://api.instagram.com/v1/media/popular");
    }

    #[test]
    fn test_credentials_merged_into_query() {
        let request = client()
            .new_request(Method::GET, "tags/nature/media/recent?count=3&client_id=override", None)
            .unwrap();

        assert_eq!(query(&request, "access_token").as_deref(), Some("token"));
        assert_eq!(query(&request, "client_id").as_deref(), Some("override"));
        assert_eq!(query(&request, "client_secret").as_deref(), Some("secret"));
        assert_eq!(query(&request, "count").as_deref(), Some("3"));
    }

    #[test]
    fn test_malformed_path() {
        let err = client().new_request(Method::GET, "http://[::1", None).unwrap_err();
        assert!(matches!(err, Error::MalformedUrl(_)));
    }

    #[test]
    fn test_default_user_agent() {
        let request = client().new_request(Method::GET, "users/self", None).unwrap();
        let user_agent = request.headers().get(USER_AGENT_HEADER).unwrap();
        assert_eq!(user_agent, USER_AGENT);
        assert!(USER_AGENT.ends_with(LIBRARY_VERSION));
    }

    #[test]
    fn test_custom_user_agent() {
        let client = Client::builder().user_agent("my-app/1.0").unwrap().build().unwrap();
        let request = client.new_request(Method::GET, "users/self", None).unwrap();
        assert_eq!(request.headers().get(USER_AGENT_HEADER).unwrap(), "my-app/1.0");
    }

    #[test]
    fn test_form_content_type_only_for_submissions() {
        let client = client();
        for method in [Method::POST, Method::PUT, Method::PATCH] {
            let request = client
                .new_request(method, "users/3/relationship", Some("action=follow".to_string()))
                .unwrap();
            assert_eq!(request.headers().get(CONTENT_TYPE).unwrap(), FORM_CONTENT_TYPE);
        }
        for method in [Method::GET, Method::DELETE] {
            let request = client.new_request(method, "media/1/likes", None).unwrap();
            assert!(request.headers().get(CONTENT_TYPE).is_none());
        }
    }

    #[test]
    fn test_body_is_attached() {
        let request = client()
            .new_request(Method::POST, "users/3/relationship", Some("action=follow".to_string()))
            .unwrap();
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"action=follow");
    }

    #[test]
    fn test_forwarded_for_header() {
        let request = client().new_request(Method::GET, "users/self", None).unwrap();
        assert!(request.headers().get(FORWARDED_FOR_HEADER).is_none());

        let mut client = client();
        client.set_forwarded_for("203.0.113.7");
        let request = client.new_request(Method::GET, "users/self", None).unwrap();
        let expected = crate::auth::sign_forwarded_for("203.0.113.7", "secret").unwrap();
        assert_eq!(request.headers().get(FORWARDED_FOR_HEADER).unwrap(), expected.as_str());
    }

    #[test]
    fn test_credentials_set_after_construction() {
        let mut client = Client::new().unwrap();
        let request = client.new_request(Method::GET, "users/self", None).unwrap();
        assert!(request.url().query().is_none());

        client.set_access_token("late");
        let request = client.new_request(Method::GET, "users/self", None).unwrap();
        assert_eq!(query(&request, "access_token").as_deref(), Some("late"));
    }

    #[test]
    fn test_timeout_is_applied() {
        let client = Client::builder().timeout(Duration::from_secs(5)).build().unwrap();
        let request = client.new_request(Method::GET, "users/self", None).unwrap();
        assert_eq!(request.timeout(), Some(&Duration::from_secs(5)));
    }
}
