//! Endpoint-relative request descriptions.

use serde_json::Value;

/// Body of an API request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A JSON document, sent as `application/json`.
    Json(Value),
    /// Ordered form fields, sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Content type announced for this body.
    ///
    /// Bodiless requests still announce JSON.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Form(_) => "application/x-www-form-urlencoded",
            Self::Empty | Self::Json(_) => "application/json",
        }
    }

    /// Encodes the body to bytes, or `None` for [`RequestBody::Empty`].
    #[must_use]
    pub fn encode(&self) -> Option<Vec<u8>> {
        match self {
            Self::Empty => None,
            Self::Json(value) => Some(value.to_string().into_bytes()),
            Self::Form(fields) => {
                let mut serializer = url::form_urlencoded::Serializer::new(String::new());
                serializer.extend_pairs(fields);
                Some(serializer.finish().into_bytes())
            }
        }
    }
}

/// A request relative to the API base URL.
///
/// Path segments are kept unencoded; the transport percent-encodes them
/// when joining with the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: http::Method,
    /// Path segments below the base URL.
    pub segments: Vec<String>,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
}

impl ApiRequest {
    /// Creates a request for `segments` with no query and no body.
    #[must_use]
    pub fn new<I, S>(method: http::Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(http::Method::GET, segments)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(http::Method::POST, segments)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Joins this request onto `base`.
    ///
    /// # Errors
    ///
    /// Returns `Err` with a reason if `base` cannot carry path segments
    /// (for example a `data:` URL).
    pub fn url(&self, base: &url::Url) -> Result<url::Url, String> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| format!("base URL '{base}' cannot be a base"))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}
