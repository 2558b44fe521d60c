//! Response wrapper that keeps the decoded body next to the HTTP details.
//!
//! BigDataCloud bodies are passed through without schema checks: the facade
//! operations decode into [`serde_json::Value`], and [`crate::Client::call`]
//! lets callers pick their own type.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful (2xx) API response.
///
/// # Examples
///
/// ```no_run
/// use bigdatacloud::{Client, IpQuery};
///
/// # async fn example() -> Result<(), bigdatacloud::Error> {
/// let client = Client::new("my-api-key")?;
///
/// let response = client.ip_geolocation(&IpQuery::new().ip("1.1.1.1")).await?;
///
/// println!("Country: {}", response.data["country"]["name"]);
/// println!("Request took {:?}", response.latency);
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded response body.
    pub data: T,

    /// The body exactly as received.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from dispatching the request to receiving the full body.
    pub latency: Duration,
}

impl<T> Response<T> {
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
        }
    }

    /// Maps the response data to a different type, keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bigdatacloud::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(
    ///     serde_json::json!({"ipString": "1.1.1.1"}),
    ///     r#"{"ipString":"1.1.1.1"}"#.to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(100),
    /// );
    ///
    /// let ip = response.map(|body| body["ipString"].as_str().unwrap_or_default().to_string());
    /// assert_eq!(ip.data, "1.1.1.1");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
        }
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
