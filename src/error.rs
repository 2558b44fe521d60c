//! Error types for BigDataCloud API calls.
//!
//! Errors fall into two phases. Validation errors ([`Error::InvalidFormat`],
//! [`Error::InvalidAddress`], [`Error::GeolocationRange`] and
//! [`Error::UnsupportedLanguage`]) are raised before any network I/O, so a
//! rejected call never reaches the API. Remote errors ([`Error::HttpError`],
//! [`Error::Network`], [`Error::Timeout`], [`Error::DeserializationFailed`])
//! come back from the transport and are never retried by this crate.

use http::{HeaderMap, StatusCode};

use crate::catalog::Operation;

/// The main error type for BigDataCloud API calls.
///
/// Match on the variant to tell input mistakes apart from remote failures.
///
/// # Examples
///
/// ```no_run
/// use bigdatacloud::{Client, Error, IpQuery};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("my-api-key")?;
///
/// match client.ip_geolocation(&IpQuery::new().ip("8.8.8.8")).await {
///     Ok(response) => println!("Located: {}", response.data),
///     Err(Error::UnsupportedLanguage(code)) => eprintln!("No locality names in {code}"),
///     Err(Error::HttpError { status, raw_response, .. }) => {
///         eprintln!("BigDataCloud refused the request ({status}): {raw_response}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A syntactically malformed argument: email address, phone number or
    /// UTC timestamp.
    #[error("Invalid {field} `{value}`: {reason}")]
    InvalidFormat {
        /// The argument name the value was supplied under
        field: &'static str,
        /// The rejected value
        value: String,
        /// What the value failed to satisfy
        reason: String,
    },

    /// An IP address or CIDR block that does not parse.
    ///
    /// This is a format error too; see [`Error::is_format_error`].
    #[error("Invalid {field} `{value}`: {reason}")]
    InvalidAddress {
        /// The argument name the value was supplied under (`ip` or `cidr`)
        field: &'static str,
        /// The rejected value
        value: String,
        /// The parser's complaint
        reason: String,
    },

    /// A latitude or longitude outside the accepted WGS 84 pattern.
    #[error("{value} is not a valid WGS 84 reference system {field} coordinate")]
    GeolocationRange {
        /// `latitude` or `longitude`
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// The locality language is not one BigDataCloud supports.
    #[error("BigDataCloud currently doesn't support `localityLanguage` {0}")]
    UnsupportedLanguage(String),

    /// No catalog entry exists at the given category and index.
    ///
    /// Reachable only through [`crate::catalog::lookup`]; the typed facade
    /// never addresses the catalog by position.
    #[error("No operation at index {index} of category `{category}`")]
    CatalogLookup {
        /// The category name that was asked for
        category: String,
        /// The ordinal that was asked for
        index: usize,
    },

    /// The number of supplied values does not match the operation's
    /// declared parameters. This indicates a defect in the caller building
    /// the request, not bad user input.
    #[error("{operation} takes {expected} parameters but {actual} were supplied")]
    ArgumentMismatch {
        /// The operation being built
        operation: Operation,
        /// Declared parameter count, including the key slot
        expected: usize,
        /// Supplied value count, including the key when appended
        actual: usize,
    },

    /// The API answered with a non-2xx status.
    ///
    /// An invalid or missing API key surfaces here, never as a validation
    /// error.
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// A 2xx body that could not be decoded into the requested type.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request exceeded the timeout configured on the client.
    #[error("Request timed out")]
    Timeout,

    /// Invalid client configuration, such as a bad header value.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid base URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` for errors raised while checking arguments, before any
    /// request was sent.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidFormat { .. }
                | Error::InvalidAddress { .. }
                | Error::GeolocationRange { .. }
                | Error::UnsupportedLanguage(_)
        )
    }

    /// Returns `true` for syntactic input errors, address literals included.
    ///
    /// ```
    /// use bigdatacloud::Error;
    ///
    /// let err = Error::InvalidAddress {
    ///     field: "ip",
    ///     value: "192.168".to_string(),
    ///     reason: "invalid IP address syntax".to_string(),
    /// };
    /// assert!(err.is_format_error());
    /// assert!(!Error::UnsupportedLanguage("yy".to_string()).is_format_error());
    /// ```
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidFormat { .. } | Error::InvalidAddress { .. }
        )
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Wraps a transport error with its request URL removed, since the URL
    /// carries the API key.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        let error = error.without_url();
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(error)
        }
    }
}

/// A specialized `Result` type for BigDataCloud API calls.
pub type Result<T> = std::result::Result<T, Error>;
