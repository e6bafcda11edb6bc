//! Wire-level exchange types and the pluggable HTTP client.
//!
//! [`Transport`](super::Transport) turns an [`ApiRequest`](super::ApiRequest)
//! into an [`HttpRequest`] (absolute URL, bearer header, encoded body) and
//! hands it to an [`HttpClient`]. The client only moves bytes; auth,
//! timeouts, retries and logging stay in the transport.

use super::HttpError;

/// A fully built request to the Chapa API.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: http::Method,
    /// Absolute URL, base URL already joined
    pub url: url::Url,
    /// Includes `Authorization` and `Content-Type`
    pub headers: http::HeaderMap,
    /// Encoded JSON or form body; `None` for GET calls
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a bodiless request with no headers.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request, the shape of every lookup call.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    /// Sets a header. A second value for the same name replaces the first,
    /// so a request never carries two bearer tokens.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Announced content type, used to pick the body redaction.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Whatever the API answered, error statuses included.
///
/// The body is buffered whole: Chapa responses are small JSON documents and
/// the normalizer needs the full body to pull out `message`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Builds a JSON response, the way the API answers.
    #[must_use]
    pub fn json(status: http::StatusCode, body: &serde_json::Value) -> Self {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        Self::new(status, headers, body.to_string().into_bytes())
    }

    /// 2xx. Anything else goes to error normalization.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body as JSON, or `None` for HTML error pages and other non-JSON.
    #[must_use]
    pub fn body_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Sends one request and returns whatever came back.
///
/// Implemented by [`ReqwestClient`](super::ReqwestClient) in production and
/// by scripted mocks in tests. Every status, 4xx and 5xx included, is a
/// response; only exchanges that produced no response are errors.
///
/// # Errors
///
/// - [`HttpError::Connection`] when the API host cannot be reached
/// - [`HttpError::Network`] when the exchange breaks mid-flight
/// - [`HttpError::Timeout`] when the client's own timeout fires
/// - [`HttpError::InvalidUrl`] when the URL is rejected
pub trait HttpClient: Send + Sync {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}
