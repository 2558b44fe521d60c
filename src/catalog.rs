//! Static registry of BigDataCloud endpoints.
//!
//! Every API capability is an [`Operation`]. Each operation maps directly to
//! a [`Descriptor`] holding its endpoint path and the wire names of its query
//! parameters, in the order values are bound to them. Operations are grouped
//! into [`Category`] values for documentation; within a category the order
//! of [`Category::operations`] is stable, so the positional form
//! `(category, index)` remains addressable through [`lookup`].

use std::fmt;

use crate::{Error, Result};

/// Name of the authorization parameter. Its presence in a descriptor's
/// parameter list marks the operation as requiring an API key.
pub const KEY_PARAM: &str = "key";

/// Endpoint path and ordered parameter names for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Path relative to the API base URL, without a leading slash.
    pub endpoint: &'static str,
    /// Wire names of the query parameters, in binding order.
    pub params: &'static [&'static str],
}

impl Descriptor {
    /// Returns `true` if the operation authenticates with an API key.
    pub fn requires_key(&self) -> bool {
        self.params.contains(&KEY_PARAM)
    }

    /// Number of values a caller supplies, i.e. the parameter count minus
    /// the key slot when there is one.
    pub fn caller_arity(&self) -> usize {
        self.params.len() - usize::from(self.requires_key())
    }
}

/// A group of related operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    IpGeolocation,
    Geocoding,
    ClientInfo,
    Timezone,
    CountryInfo,
    AsnInfo,
    Insights,
    Network,
    PhoneNumber,
    EmailValidation,
}

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Category; 10] = [
        Category::IpGeolocation,
        Category::Geocoding,
        Category::ClientInfo,
        Category::Timezone,
        Category::CountryInfo,
        Category::AsnInfo,
        Category::Insights,
        Category::Network,
        Category::PhoneNumber,
        Category::EmailValidation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::IpGeolocation => "ip_geolocation",
            Category::Geocoding => "geocoding",
            Category::ClientInfo => "client_info",
            Category::Timezone => "timezone",
            Category::CountryInfo => "country_info",
            Category::AsnInfo => "asn_info",
            Category::Insights => "insights",
            Category::Network => "network",
            Category::PhoneNumber => "phone_number",
            Category::EmailValidation => "email_validation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }

    /// The category's operations in their fixed ordinal order.
    pub fn operations(self) -> &'static [Operation] {
        use Operation::*;
        match self {
            Category::IpGeolocation => &[
                IpGeolocation,
                IpGeolocationFull,
                IpGeolocationWithConfidence,
            ],
            Category::Geocoding => &[ReverseGeocodeClient, ReverseGeocode],
            Category::ClientInfo => &[ClientInfo, AmIRoaming, UserAgentInfo, ClientIp],
            Category::Timezone => &[TimezoneByIp, TimezoneInfo, TimezoneByLocation],
            Category::CountryInfo => &[CountryByIp, CountryInfo],
            Category::AsnInfo => &[AsnInfo, AsnInfoFull],
            Category::Insights => &[TorExitNodesList, AddressSpaceStatsIpv4],
            Category::Network => &[NetworkByIp, PrefixesList, NetworkByCidr],
            Category::PhoneNumber => &[PhoneNumberValidateByIp, PhoneNumberValidate],
            Category::EmailValidation => &[EmailVerify],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One BigDataCloud API capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    IpGeolocation,
    IpGeolocationFull,
    IpGeolocationWithConfidence,
    ReverseGeocodeClient,
    ReverseGeocode,
    ClientInfo,
    AmIRoaming,
    UserAgentInfo,
    ClientIp,
    TimezoneByIp,
    TimezoneInfo,
    TimezoneByLocation,
    CountryByIp,
    CountryInfo,
    AsnInfo,
    AsnInfoFull,
    TorExitNodesList,
    AddressSpaceStatsIpv4,
    NetworkByIp,
    PrefixesList,
    NetworkByCidr,
    PhoneNumberValidateByIp,
    PhoneNumberValidate,
    EmailVerify,
}

impl Operation {
    /// Returns the endpoint path and parameter names for this operation.
    pub const fn descriptor(self) -> &'static Descriptor {
        match self {
            Operation::IpGeolocation => &Descriptor {
                endpoint: "ip-geolocation",
                params: &["ip", "localityLanguage", KEY_PARAM],
            },
            Operation::IpGeolocationFull => &Descriptor {
                endpoint: "ip-geolocation-full",
                params: &["ip", "localityLanguage", KEY_PARAM],
            },
            Operation::IpGeolocationWithConfidence => &Descriptor {
                endpoint: "ip-geolocation-with-confidence",
                params: &["ip", "localityLanguage", KEY_PARAM],
            },
            Operation::ReverseGeocodeClient => &Descriptor {
                endpoint: "reverse-geocode-client",
                params: &["latitude", "longitude", "localityLanguage"],
            },
            Operation::ReverseGeocode => &Descriptor {
                endpoint: "reverse-geocode",
                params: &["latitude", "longitude", "localityLanguage", KEY_PARAM],
            },
            Operation::ClientInfo => &Descriptor {
                endpoint: "client-info",
                params: &[],
            },
            Operation::AmIRoaming => &Descriptor {
                endpoint: "am-i-roaming",
                params: &["latitude", "longitude"],
            },
            Operation::UserAgentInfo => &Descriptor {
                endpoint: "user-agent-info",
                params: &["userAgentRaw", KEY_PARAM],
            },
            Operation::ClientIp => &Descriptor {
                endpoint: "client-ip",
                params: &[],
            },
            Operation::TimezoneByIp => &Descriptor {
                endpoint: "timezone-by-ip",
                params: &["ip", "utcReference", KEY_PARAM],
            },
            Operation::TimezoneInfo => &Descriptor {
                endpoint: "timezone-info",
                params: &["timeZoneId", "utcReference", KEY_PARAM],
            },
            Operation::TimezoneByLocation => &Descriptor {
                endpoint: "timezone-by-location",
                params: &["latitude", "longitude", "utcReference", KEY_PARAM],
            },
            Operation::CountryByIp => &Descriptor {
                endpoint: "country-by-ip",
                params: &["ip", "localityLanguage", KEY_PARAM],
            },
            Operation::CountryInfo => &Descriptor {
                endpoint: "country-info",
                params: &["code", "localityLanguage", KEY_PARAM],
            },
            Operation::AsnInfo => &Descriptor {
                endpoint: "asn-info",
                params: &["asn", "localityLanguage", KEY_PARAM],
            },
            Operation::AsnInfoFull => &Descriptor {
                endpoint: "asn-info-full",
                params: &["asn", "localityLanguage", KEY_PARAM],
            },
            Operation::TorExitNodesList => &Descriptor {
                endpoint: "tor-exit-nodes-list",
                params: &["batchSize", "offset", "localityLanguage", KEY_PARAM],
            },
            Operation::AddressSpaceStatsIpv4 => &Descriptor {
                endpoint: "ipv4-address-space",
                params: &[],
            },
            Operation::NetworkByIp => &Descriptor {
                endpoint: "network-by-ip",
                params: &["ip", "localityLanguage", KEY_PARAM],
            },
            Operation::PrefixesList => &Descriptor {
                endpoint: "prefixes-list",
                params: &[
                    "bogonsOnly",
                    "batchSize",
                    "offset",
                    "localityLanguage",
                    KEY_PARAM,
                ],
            },
            Operation::NetworkByCidr => &Descriptor {
                endpoint: "network-by-cidr",
                params: &[
                    "cidr",
                    "depthLimit",
                    "bogonsOnly",
                    "asn",
                    "localityLanguage",
                    KEY_PARAM,
                ],
            },
            Operation::PhoneNumberValidateByIp => &Descriptor {
                endpoint: "phone-number-validate-by-ip",
                params: &["number", "ip", "localityLanguage", KEY_PARAM],
            },
            Operation::PhoneNumberValidate => &Descriptor {
                endpoint: "phone-number-validate",
                params: &["number", "countryCode", "localityLanguage", KEY_PARAM],
            },
            Operation::EmailVerify => &Descriptor {
                endpoint: "email-verify",
                params: &["emailAddress", KEY_PARAM],
            },
        }
    }

    pub fn category(self) -> Category {
        use Operation::*;
        match self {
            IpGeolocation | IpGeolocationFull | IpGeolocationWithConfidence => {
                Category::IpGeolocation
            }
            ReverseGeocodeClient | ReverseGeocode => Category::Geocoding,
            ClientInfo | AmIRoaming | UserAgentInfo | ClientIp => Category::ClientInfo,
            TimezoneByIp | TimezoneInfo | TimezoneByLocation => Category::Timezone,
            CountryByIp | CountryInfo => Category::CountryInfo,
            AsnInfo | AsnInfoFull => Category::AsnInfo,
            TorExitNodesList | AddressSpaceStatsIpv4 => Category::Insights,
            NetworkByIp | PrefixesList | NetworkByCidr => Category::Network,
            PhoneNumberValidateByIp | PhoneNumberValidate => Category::PhoneNumber,
            EmailVerify => Category::EmailValidation,
        }
    }

    /// Snake-case name matching the facade method on [`crate::Client`].
    pub fn name(self) -> &'static str {
        match self {
            Operation::IpGeolocation => "ip_geolocation",
            Operation::IpGeolocationFull => "ip_geolocation_full",
            Operation::IpGeolocationWithConfidence => "ip_geolocation_with_confidence",
            Operation::ReverseGeocodeClient => "reverse_geocode_client",
            Operation::ReverseGeocode => "reverse_geocode",
            Operation::ClientInfo => "client_info",
            Operation::AmIRoaming => "am_i_roaming",
            Operation::UserAgentInfo => "user_agent_info",
            Operation::ClientIp => "client_ip",
            Operation::TimezoneByIp => "timezone_by_ip",
            Operation::TimezoneInfo => "timezone_info",
            Operation::TimezoneByLocation => "timezone_by_location",
            Operation::CountryByIp => "country_by_ip",
            Operation::CountryInfo => "country_info",
            Operation::AsnInfo => "asn_info",
            Operation::AsnInfoFull => "asn_info_full",
            Operation::TorExitNodesList => "tor_exit_nodes_list",
            Operation::AddressSpaceStatsIpv4 => "address_space_stats_ipv4",
            Operation::NetworkByIp => "network_by_ip",
            Operation::PrefixesList => "prefixes_list",
            Operation::NetworkByCidr => "network_by_cidr",
            Operation::PhoneNumberValidateByIp => "phone_number_validate_by_ip",
            Operation::PhoneNumberValidate => "phone_number_validate",
            Operation::EmailVerify => "email_verify",
        }
    }

    pub fn requires_key(self) -> bool {
        self.descriptor().requires_key()
    }

    /// Iterates every operation, category by category.
    pub fn all() -> impl Iterator<Item = Operation> {
        Category::ALL
            .into_iter()
            .flat_map(|category| category.operations().iter().copied())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves an operation by category name and ordinal position.
///
/// # Errors
///
/// Returns [`Error::CatalogLookup`] if the category is unknown or the index
/// is past the end of the category.
///
/// ```
/// use bigdatacloud::catalog::{lookup, Operation};
///
/// assert_eq!(lookup("timezone", 1).unwrap(), Operation::TimezoneInfo);
/// assert!(lookup("timezone", 3).is_err());
/// ```
pub fn lookup(category: &str, index: usize) -> Result<Operation> {
    Category::from_name(category)
        .and_then(|c| c.operations().get(index).copied())
        .ok_or_else(|| Error::CatalogLookup {
            category: category.to_string(),
            index,
        })
}
