//! Typed argument sets for the facade operations.
//!
//! Each query is a small builder. Fields left unset are sent with their
//! documented default and skip validation; fields that are set are checked
//! by [`crate::validate::Validator`] before the request is built.
//!
//! ```
//! use bigdatacloud::{NetworkByCidrQuery, QueryArguments};
//!
//! let query = NetworkByCidrQuery::new().cidr("8.8.8.0/24").bogons_only(true);
//! let names: Vec<_> = query.arguments().iter().map(|a| a.name).collect();
//! assert_eq!(names, ["cidr", "depth_limit", "bogons_only", "asn", "lang"]);
//! ```

use crate::languages::DEFAULT_LANGUAGE;
use crate::metadata::ParamValue;

/// One named value destined for a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// The caller-facing argument name, which selects the validation rule.
    pub name: &'static str,
    pub value: ParamValue,
    /// `false` when `value` is a default the caller never supplied.
    pub provided: bool,
}

impl Argument {
    pub fn provided(name: &'static str, value: impl Into<ParamValue>) -> Self {
        Self {
            name,
            value: value.into(),
            provided: true,
        }
    }

    pub fn defaulted(name: &'static str, value: impl Into<ParamValue>) -> Self {
        Self {
            name,
            value: value.into(),
            provided: false,
        }
    }

    /// Uses `value` when the caller set one, `default` otherwise.
    pub fn or_default<T: Into<ParamValue>>(
        name: &'static str,
        value: Option<T>,
        default: impl Into<ParamValue>,
    ) -> Self {
        match value {
            Some(value) => Self::provided(name, value),
            None => Self::defaulted(name, default),
        }
    }
}

/// Produces an operation's arguments in the order its descriptor binds them.
pub trait QueryArguments {
    fn arguments(&self) -> Vec<Argument>;
}

fn lang(value: &Option<String>) -> Argument {
    Argument::or_default("lang", value.clone(), DEFAULT_LANGUAGE)
}

fn text(name: &'static str, value: &Option<String>) -> Argument {
    Argument::or_default(name, value.clone(), "")
}

/// Arguments for the IP-keyed lookups: geolocation, country and network by IP.
///
/// An empty `ip` asks the API to use the caller's own address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IpQuery {
    ip: Option<String>,
    lang: Option<String>,
}

impl IpQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Preferred language for locality names, ISO 639-1. Defaults to `en`.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl QueryArguments for IpQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![text("ip", &self.ip), lang(&self.lang)]
    }
}

/// Coordinates plus locality language, for reverse geocoding.
///
/// Latitude and longitude are WGS 84 decimal degrees, passed as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinatesQuery {
    latitude: Option<String>,
    longitude: Option<String>,
    lang: Option<String>,
}

impl CoordinatesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latitude(mut self, latitude: impl Into<String>) -> Self {
        self.latitude = Some(latitude.into());
        self
    }

    pub fn longitude(mut self, longitude: impl Into<String>) -> Self {
        self.longitude = Some(longitude.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl QueryArguments for CoordinatesQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            text("latitude", &self.latitude),
            text("longitude", &self.longitude),
            lang(&self.lang),
        ]
    }
}

/// Coordinates only, for the roaming check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoamingQuery {
    latitude: Option<String>,
    longitude: Option<String>,
}

impl RoamingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latitude(mut self, latitude: impl Into<String>) -> Self {
        self.latitude = Some(latitude.into());
        self
    }

    pub fn longitude(mut self, longitude: impl Into<String>) -> Self {
        self.longitude = Some(longitude.into());
        self
    }
}

impl QueryArguments for RoamingQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            text("latitude", &self.latitude),
            text("longitude", &self.longitude),
        ]
    }
}

/// Time zone estimated from an IP address.
///
/// `utc_reference` is a Unix time in seconds; `0` (the default) means "now".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimezoneByIpQuery {
    ip: Option<String>,
    utc_reference: Option<ParamValue>,
}

impl TimezoneByIpQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Accepts an integer or its text form; text is checked to be an integer.
    pub fn utc_reference(mut self, utc_reference: impl Into<ParamValue>) -> Self {
        self.utc_reference = Some(utc_reference.into());
        self
    }
}

impl QueryArguments for TimezoneByIpQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            text("ip", &self.ip),
            Argument::or_default("utc_reference", self.utc_reference.clone(), 0i64),
        ]
    }
}

/// IANA time zone details, e.g. `Australia/Sydney`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimezoneInfoQuery {
    timezone_id: Option<String>,
    utc_reference: Option<ParamValue>,
}

impl TimezoneInfoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timezone_id(mut self, timezone_id: impl Into<String>) -> Self {
        self.timezone_id = Some(timezone_id.into());
        self
    }

    pub fn utc_reference(mut self, utc_reference: impl Into<ParamValue>) -> Self {
        self.utc_reference = Some(utc_reference.into());
        self
    }
}

impl QueryArguments for TimezoneInfoQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            text("timezone_id", &self.timezone_id),
            Argument::or_default("utc_reference", self.utc_reference.clone(), 0i64),
        ]
    }
}

/// Time zone for a pair of coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimezoneByLocationQuery {
    latitude: Option<String>,
    longitude: Option<String>,
    utc_reference: Option<ParamValue>,
}

impl TimezoneByLocationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latitude(mut self, latitude: impl Into<String>) -> Self {
        self.latitude = Some(latitude.into());
        self
    }

    pub fn longitude(mut self, longitude: impl Into<String>) -> Self {
        self.longitude = Some(longitude.into());
        self
    }

    pub fn utc_reference(mut self, utc_reference: impl Into<ParamValue>) -> Self {
        self.utc_reference = Some(utc_reference.into());
        self
    }
}

impl QueryArguments for TimezoneByLocationQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            text("latitude", &self.latitude),
            text("longitude", &self.longitude),
            Argument::or_default("utc_reference", self.utc_reference.clone(), 0i64),
        ]
    }
}

/// Country details by ISO 3166-1 code (alpha-2, alpha-3 or numeric).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryInfoQuery {
    code: Option<String>,
    lang: Option<String>,
}

impl CountryInfoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl QueryArguments for CountryInfoQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![text("code", &self.code), lang(&self.lang)]
    }
}

/// Autonomous System lookups. `asn` may be `123`, `AS123` or `ASN123`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsnQuery {
    asn: Option<String>,
    lang: Option<String>,
}

impl AsnQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asn(mut self, asn: impl Into<String>) -> Self {
        self.asn = Some(asn.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl QueryArguments for AsnQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![text("asn", &self.asn), lang(&self.lang)]
    }
}

/// Paging over the active TOR exit node list.
///
/// `batch_size` defaults to 1 (the API caps it at 1000), `offset` to 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TorExitNodesQuery {
    batch_size: Option<u32>,
    offset: Option<u32>,
    lang: Option<String>,
}

impl TorExitNodesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl QueryArguments for TorExitNodesQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            Argument::or_default("batch_size", self.batch_size, 1u32),
            Argument::or_default("offset", self.offset, 0u32),
            lang(&self.lang),
        ]
    }
}

/// Paging over announced IPv4 prefixes, optionally bogons only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefixesQuery {
    bogons_only: Option<bool>,
    batch_size: Option<u32>,
    offset: Option<u32>,
    lang: Option<String>,
}

impl PrefixesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bogons_only(mut self, bogons_only: bool) -> Self {
        self.bogons_only = Some(bogons_only);
        self
    }

    pub fn batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl QueryArguments for PrefixesQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            Argument::or_default("bogons_only", self.bogons_only, false),
            Argument::or_default("batch_size", self.batch_size, 1u32),
            Argument::or_default("offset", self.offset, 0u32),
            lang(&self.lang),
        ]
    }
}

/// Networks announced over BGP inside a CIDR block.
///
/// `depth_limit` sets how many hierarchy levels below the block to include
/// and defaults to 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkByCidrQuery {
    cidr: Option<String>,
    depth_limit: Option<u32>,
    bogons_only: Option<bool>,
    asn: Option<String>,
    lang: Option<String>,
}

impl NetworkByCidrQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cidr(mut self, cidr: impl Into<String>) -> Self {
        self.cidr = Some(cidr.into());
        self
    }

    pub fn depth_limit(mut self, depth_limit: u32) -> Self {
        self.depth_limit = Some(depth_limit);
        self
    }

    pub fn bogons_only(mut self, bogons_only: bool) -> Self {
        self.bogons_only = Some(bogons_only);
        self
    }

    pub fn asn(mut self, asn: impl Into<String>) -> Self {
        self.asn = Some(asn.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl QueryArguments for NetworkByCidrQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            text("cidr", &self.cidr),
            Argument::or_default("depth_limit", self.depth_limit, 1u32),
            Argument::or_default("bogons_only", self.bogons_only, false),
            text("asn", &self.asn),
            lang(&self.lang),
        ]
    }
}

/// Phone number validation localised by the caller's (or a given) IP.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneByIpQuery {
    number: Option<String>,
    ip: Option<String>,
    lang: Option<String>,
}

impl PhoneByIpQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digits only, without spaces or hyphens.
    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl QueryArguments for PhoneByIpQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            text("number", &self.number),
            text("ip", &self.ip),
            lang(&self.lang),
        ]
    }
}

/// Phone number validation against a default country.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneQuery {
    number: Option<String>,
    country_code: Option<String>,
    lang: Option<String>,
}

impl PhoneQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl QueryArguments for PhoneQuery {
    fn arguments(&self) -> Vec<Argument> {
        vec![
            text("number", &self.number),
            text("country_code", &self.country_code),
            lang(&self.lang),
        ]
    }
}
