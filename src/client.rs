//! The BigDataCloud client.
//!
//! [`Client`] exposes one async method per API capability. Every call runs
//! the same pipeline: validate the caller's arguments, bind them to the
//! operation's catalog entry (appending the API key where the endpoint needs
//! one), render the URL, send one GET and hand back the JSON body as-is.
//! Nothing is retried or cached.

use std::fmt;
use std::time::{Duration, Instant};

use http::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::catalog::Operation;
use crate::metadata::RequestMetadata;
use crate::query::{
    Argument, AsnQuery, CoordinatesQuery, CountryInfoQuery, IpQuery, NetworkByCidrQuery,
    PhoneByIpQuery, PhoneQuery, PrefixesQuery, QueryArguments, RoamingQuery, TimezoneByIpQuery,
    TimezoneByLocationQuery, TimezoneInfoQuery, TorExitNodesQuery,
};
use crate::validate::{LongitudeRule, Validator};
use crate::{Error, Response, Result};

/// Where requests go unless [`ClientBuilder::base_url`] says otherwise.
pub const DEFAULT_BASE_URL: &str = "https://api.bigdatacloud.net/data";

/// Client for the BigDataCloud APIs.
///
/// Cloning is cheap: clones share the underlying connection pool. The pool
/// is safe to use from many tasks at once, and the client holds no other
/// shared mutable state, so concurrent calls need no extra locking.
///
/// # Examples
///
/// ```no_run
/// use bigdatacloud::{Client, CoordinatesQuery, IpQuery};
///
/// # async fn example() -> Result<(), bigdatacloud::Error> {
/// let client = Client::new("my-api-key")?;
///
/// let located = client
///     .ip_geolocation(&IpQuery::new().ip("8.8.8.8").lang("fr"))
///     .await?;
/// println!("{}", located.data["location"]["city"]);
///
/// // Works without a key.
/// let place = client
///     .reverse_geocode_client(&CoordinatesQuery::new().latitude("-34.93").longitude("138.6"))
///     .await?;
/// println!("{}", place.data["locality"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    default_headers: HeaderMap,
    validator: Validator,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a client with default settings and the given API key.
    ///
    /// An empty key is allowed; endpoints that need one will then answer
    /// with an HTTP error.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Replaces the key used by subsequent calls.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn longitude_rule(&self) -> LongitudeRule {
        self.validator.longitude_rule()
    }

    /// Validates `arguments` and binds them to `operation`, without any I/O.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad argument, or
    /// [`Error::ArgumentMismatch`] if `arguments` does not fit the
    /// operation's parameter list.
    pub fn prepare(&self, operation: Operation, arguments: &[Argument]) -> Result<RequestMetadata> {
        self.validator.validate_all(arguments)?;
        let values = arguments.iter().map(|a| a.value.clone()).collect();
        RequestMetadata::build(operation, values, &self.api_key)
    }

    /// Returns the exact URL a call would request.
    ///
    /// ```
    /// use bigdatacloud::{Client, IpQuery, Operation, QueryArguments};
    ///
    /// let client = Client::new("").unwrap();
    /// let url = client
    ///     .request_url(Operation::CountryByIp, &IpQuery::new().ip("1.1.1.1").arguments())
    ///     .unwrap();
    /// assert_eq!(
    ///     url,
    ///     "https://api.bigdatacloud.net/data/country-by-ip?ip=1.1.1.1&localityLanguage=en&key="
    /// );
    /// ```
    pub fn request_url(&self, operation: Operation, arguments: &[Argument]) -> Result<String> {
        Ok(self.prepare(operation, arguments)?.url(&self.base_url))
    }

    /// Runs `operation` and decodes the body into `Res`.
    ///
    /// The facade methods call this with [`serde_json::Value`]; use it
    /// directly to decode into your own types.
    ///
    /// ```no_run
    /// use bigdatacloud::{Client, Operation};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// #[serde(rename_all = "camelCase")]
    /// struct ClientIp {
    ///     ip_string: String,
    ///     ip_type: String,
    /// }
    ///
    /// # async fn example() -> Result<(), bigdatacloud::Error> {
    /// let client = Client::new("")?;
    /// let response = client.call::<ClientIp>(Operation::ClientIp, &[]).await?;
    /// println!("{} ({})", response.data.ip_string, response.data.ip_type);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<Res>(
        &self,
        operation: Operation,
        arguments: &[Argument],
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let metadata = self.prepare(operation, arguments)?;
        let url = metadata.url(&self.base_url);

        // The URL carries the API key, so only the endpoint is logged.
        tracing::debug!(
            operation = %operation,
            endpoint = metadata.endpoint,
            params = metadata.params.len(),
            "Executing HTTP request"
        );

        let start_time = Instant::now();

        let mut request = self.http_client.get(url);
        for (name, value) in &self.default_headers {
            request = request.header(name, value);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            let error = Error::from_transport(e);
            tracing::warn!(error = %error, operation = %operation, "Request failed");
            error
        })?;

        self.parse_response(operation, response, start_time).await
    }

    async fn parse_response<Res>(
        &self,
        operation: Operation,
        response: reqwest::Response,
        start_time: Instant,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let raw_response = response.text().await.unwrap_or_default();

            if status.is_client_error() {
                tracing::error!(
                    operation = %operation,
                    status = status.as_u16(),
                    response = %raw_response,
                    "Client error (4xx)"
                );
            } else if status.is_server_error() {
                tracing::warn!(
                    operation = %operation,
                    status = status.as_u16(),
                    response = %raw_response,
                    "Server error (5xx)"
                );
            }

            return Err(Error::HttpError {
                status,
                raw_response,
                headers,
            });
        }

        let raw_body = response.text().await.map_err(Error::from_transport)?;
        let latency = start_time.elapsed();

        tracing::info!(
            operation = %operation,
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        match serde_json::from_str::<Res>(&raw_body) {
            Ok(data) => Ok(Response::new(data, raw_body, status, headers, latency)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    raw_response = %raw_body,
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: raw_body,
                    serde_error: e.to_string(),
                    status,
                })
            }
        }
    }

    async fn fetch(
        &self,
        operation: Operation,
        query: &impl QueryArguments,
    ) -> Result<Response<Value>> {
        self.call(operation, &query.arguments()).await
    }

    /// IP geolocation: country, region and locality for `ip`, or for the
    /// caller when `ip` is unset.
    pub async fn ip_geolocation(&self, query: &IpQuery) -> Result<Response<Value>> {
        self.fetch(Operation::IpGeolocation, query).await
    }

    /// IP geolocation with network, hazard-report and time zone details.
    pub async fn ip_geolocation_full(&self, query: &IpQuery) -> Result<Response<Value>> {
        self.fetch(Operation::IpGeolocationFull, query).await
    }

    /// IP geolocation with a confidence area.
    pub async fn ip_geolocation_with_confidence(&self, query: &IpQuery) -> Result<Response<Value>> {
        self.fetch(Operation::IpGeolocationWithConfidence, query).await
    }

    /// Reverse geocoding for client-side use. Needs no API key.
    pub async fn reverse_geocode_client(
        &self,
        query: &CoordinatesQuery,
    ) -> Result<Response<Value>> {
        self.fetch(Operation::ReverseGeocodeClient, query).await
    }

    /// Reverse geocoding: the locality at the given coordinates.
    pub async fn reverse_geocode(&self, query: &CoordinatesQuery) -> Result<Response<Value>> {
        self.fetch(Operation::ReverseGeocode, query).await
    }

    /// Details about whoever made the request. Needs no API key.
    pub async fn client_info(&self) -> Result<Response<Value>> {
        self.call(Operation::ClientInfo, &[]).await
    }

    /// Whether the caller's network location differs from the given
    /// coordinates' country. Needs no API key.
    pub async fn am_i_roaming(&self, query: &RoamingQuery) -> Result<Response<Value>> {
        self.fetch(Operation::AmIRoaming, query).await
    }

    /// Parses a raw `User-Agent` string.
    ///
    /// The string is always sent as given; it has no validation rule, so an
    /// empty string is passed to the API unchanged.
    pub async fn user_agent_info(&self, user_agent_raw: &str) -> Result<Response<Value>> {
        let arguments = [Argument::provided("user_agent_raw", user_agent_raw)];
        self.call(Operation::UserAgentInfo, &arguments).await
    }

    /// The caller's public IP address, with proxy detection through the
    /// `X-Forwarded-For` header. Needs no API key.
    pub async fn client_ip(&self) -> Result<Response<Value>> {
        self.call(Operation::ClientIp, &[]).await
    }

    /// Active time zone estimated from an IP address, daylight saving
    /// included.
    pub async fn timezone_by_ip(&self, query: &TimezoneByIpQuery) -> Result<Response<Value>> {
        self.fetch(Operation::TimezoneByIp, query).await
    }

    /// IANA time zone details. With a UTC reference, the response also
    /// converts that instant to local time.
    pub async fn timezone_info(&self, query: &TimezoneInfoQuery) -> Result<Response<Value>> {
        self.fetch(Operation::TimezoneInfo, query).await
    }

    pub async fn timezone_by_location(
        &self,
        query: &TimezoneByLocationQuery,
    ) -> Result<Response<Value>> {
        self.fetch(Operation::TimezoneByLocation, query).await
    }

    /// Country details for the country `ip` geolocates to: ISO names,
    /// languages, currencies and UN / World Bank regions.
    pub async fn country_by_ip(&self, query: &IpQuery) -> Result<Response<Value>> {
        self.fetch(Operation::CountryByIp, query).await
    }

    pub async fn country_info(&self, query: &CountryInfoQuery) -> Result<Response<Value>> {
        self.fetch(Operation::CountryInfo, query).await
    }

    /// Registration, announced IPv4 space and ranking of an Autonomous System.
    pub async fn asn_info(&self, query: &AsnQuery) -> Result<Response<Value>> {
        self.fetch(Operation::AsnInfo, query).await
    }

    /// Like [`Client::asn_info`], plus connectivity and the most active areas.
    pub async fn asn_info_full(&self, query: &AsnQuery) -> Result<Response<Value>> {
        self.fetch(Operation::AsnInfoFull, query).await
    }

    /// Active TOR exit nodes, geolocated to country level.
    pub async fn tor_exit_nodes_list(&self, query: &TorExitNodesQuery) -> Result<Response<Value>> {
        self.fetch(Operation::TorExitNodesList, query).await
    }

    /// Latest IPv4 address space registration and BGP statistics. Needs no
    /// API key.
    pub async fn address_space_stats_ipv4(&self) -> Result<Response<Value>> {
        self.call(Operation::AddressSpaceStatsIpv4, &[]).await
    }

    /// The active network `ip` belongs to, with the Autonomous Systems that
    /// announce it.
    pub async fn network_by_ip(&self, query: &IpQuery) -> Result<Response<Value>> {
        self.fetch(Operation::NetworkByIp, query).await
    }

    /// Announced IPv4 routes and prefixes.
    pub async fn prefixes_list(&self, query: &PrefixesQuery) -> Result<Response<Value>> {
        self.fetch(Operation::PrefixesList, query).await
    }

    /// Networks announced over BGP within a CIDR block.
    pub async fn network_by_cidr(&self, query: &NetworkByCidrQuery) -> Result<Response<Value>> {
        self.fetch(Operation::NetworkByCidr, query).await
    }

    /// Phone number formatting and validation, localised by IP geolocation.
    pub async fn phone_number_validate_by_ip(
        &self,
        query: &PhoneByIpQuery,
    ) -> Result<Response<Value>> {
        self.fetch(Operation::PhoneNumberValidateByIp, query).await
    }

    /// Phone number formatting and validation against a default country.
    pub async fn phone_number_validate(&self, query: &PhoneQuery) -> Result<Response<Value>> {
        self.fetch(Operation::PhoneNumberValidate, query).await
    }

    /// Checks that an address is well formed and that its domain accepts mail.
    ///
    /// The address is required and always validated, so an empty string is
    /// rejected with [`Error::InvalidFormat`] before any request is sent.
    pub async fn email_verify(&self, email_address: &str) -> Result<Response<Value>> {
        let arguments = [Argument::provided("email_address", email_address)];
        self.call(Operation::EmailVerify, &arguments).await
    }
}

impl fmt::Debug for Client {
    /// Renders the constructor call that recreates this client's key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client::new({:?})", self.api_key)
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use bigdatacloud::{ClientBuilder, LongitudeRule};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), bigdatacloud::Error> {
/// let client = ClientBuilder::new()
///     .api_key("my-api-key")
///     .timeout(Duration::from_secs(10))
///     .default_header("User-Agent", "my-app/1.0")?
///     .longitude_rule(LongitudeRule::Wgs84)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: String,
    base_url: Option<Url>,
    default_headers: HeaderMap,
    http_client: Option<reqwest::Client>,
    longitude_rule: LongitudeRule,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            default_headers: HeaderMap::new(),
            http_client: None,
            longitude_rule: LongitudeRule::default(),
            timeout: None,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Overrides [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, or if it has a query string
    /// or fragment, since endpoint paths are appended to it.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        if url.query().is_some() || url.fragment().is_some() {
            return Err(Error::ConfigurationError(format!(
                "Base URL must not have a query or fragment: {}",
                url
            )));
        }
        self.base_url = Some(url);
        Ok(self)
    }

    /// Adds a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sends requests through an existing `reqwest::Client`, sharing its
    /// connection pool and TLS settings.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn longitude_rule(mut self, rule: LongitudeRule) -> Self {
        self.longitude_rule = rule;
        self
    }

    /// Per-request timeout. Without one, the transport's own policy applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn build(self) -> Result<Client> {
        let base_url = match &self.base_url {
            Some(url) => url.as_str().trim_end_matches('/').to_string(),
            None => DEFAULT_BASE_URL.to_string(),
        };

        let http_client = match self.http_client {
            Some(http_client) => http_client,
            None => reqwest::Client::builder().build().map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?,
        };

        Ok(Client {
            http_client,
            base_url,
            api_key: self.api_key,
            default_headers: self.default_headers,
            validator: Validator::new(self.longitude_rule),
            timeout: self.timeout,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
