//! Argument checks that run before a request is built.
//!
//! The rule applied to a value is chosen by the *name* the caller supplied
//! it under (`ip`, `lang`, `latitude`, ...), not by its Rust type. Only
//! arguments the caller actually set are checked; defaults never are.

use std::net::IpAddr;
use std::sync::LazyLock;

use ipnetwork::IpNetwork;
use regex::Regex;

use crate::languages;
use crate::metadata::ParamValue;
use crate::query::Argument;
use crate::{Error, Result};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.+_-]+@[A-Za-z0-9._-]+\.[A-Za-z]+$").expect("email pattern")
});

// Signed decimal, integer part 0-90, at most six fractional digits.
static LATITUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:90(?:\.0{1,6})?|(?:[0-9]|[1-8][0-9])(?:\.[0-9]{1,6})?)$")
        .expect("latitude pattern")
});

// Same shape as LATITUDE with the integer part widened to 0-180.
static LONGITUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[+-]?(?:180(?:\.0{1,6})?|(?:[0-9]|[1-9][0-9]|1[0-7][0-9])(?:\.[0-9]{1,6})?)$",
    )
    .expect("longitude pattern")
});

/// An argument name that carries a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Ip,
    Cidr,
    Lang,
    EmailAddress,
    UtcReference,
    Number,
    Latitude,
    Longitude,
}

impl Field {
    /// The order rules are applied in. When several arguments are invalid,
    /// the error for the earliest field here is the one reported.
    pub const ORDER: [Field; 8] = [
        Field::Ip,
        Field::Cidr,
        Field::Lang,
        Field::EmailAddress,
        Field::UtcReference,
        Field::Number,
        Field::Latitude,
        Field::Longitude,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Ip => "ip",
            Field::Cidr => "cidr",
            Field::Lang => "lang",
            Field::EmailAddress => "email_address",
            Field::UtcReference => "utc_reference",
            Field::Number => "number",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
        }
    }

    /// Maps an argument name to its rule. Names without a rule return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ip" => Some(Field::Ip),
            "cidr" => Some(Field::Cidr),
            "lang" => Some(Field::Lang),
            "email_address" => Some(Field::EmailAddress),
            "utc_reference" => Some(Field::UtcReference),
            "number" => Some(Field::Number),
            "latitude" => Some(Field::Latitude),
            "longitude" => Some(Field::Longitude),
            _ => None,
        }
    }
}

/// Accepted range for the integer part of a longitude.
///
/// Earlier releases of this client checked longitudes with the latitude
/// pattern, capping them at ±90. That rejects most of the globe, so the
/// default is the full WGS 84 range; `LatitudeBounded` keeps the old
/// behaviour for callers that depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongitudeRule {
    /// Integer part 0–180.
    #[default]
    Wgs84,
    /// Integer part 0–90, identical to the latitude check.
    LatitudeBounded,
}

/// Applies the per-field rules.
///
/// # Examples
///
/// ```
/// use bigdatacloud::validate::{Field, LongitudeRule, Validator};
///
/// let validator = Validator::default();
/// assert!(validator.validate(Field::Longitude, &"151.2093".into()).is_ok());
///
/// let legacy = Validator::new(LongitudeRule::LatitudeBounded);
/// assert!(legacy.validate(Field::Longitude, &"151.2093".into()).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    longitude: LongitudeRule,
}

impl Validator {
    pub fn new(longitude: LongitudeRule) -> Self {
        Self { longitude }
    }

    pub fn longitude_rule(&self) -> LongitudeRule {
        self.longitude
    }

    /// Checks one value against the rule for `field`.
    pub fn validate(&self, field: Field, value: &ParamValue) -> Result<()> {
        match field {
            Field::Ip => validate_ip(&value.to_string()),
            Field::Cidr => validate_cidr(&value.to_string()),
            Field::Lang => validate_language(&value.to_string()),
            Field::EmailAddress => validate_email(&value.to_string()),
            Field::UtcReference => validate_utc_reference(value),
            Field::Number => validate_phone_number(&value.to_string()),
            Field::Latitude => validate_latitude(&value.to_string()),
            Field::Longitude => self.validate_longitude(&value.to_string()),
        }
    }

    /// Checks a value supplied under an argument name. Names without a rule
    /// are accepted unchanged.
    pub fn validate_named(&self, name: &str, value: &ParamValue) -> Result<()> {
        match Field::from_name(name) {
            Some(field) => self.validate(field, value),
            None => Ok(()),
        }
    }

    /// Checks every caller-provided argument, field by field in
    /// [`Field::ORDER`], stopping at the first failure.
    pub fn validate_all(&self, arguments: &[Argument]) -> Result<()> {
        for field in Field::ORDER {
            let provided = arguments
                .iter()
                .filter(|a| a.provided && a.name == field.name());
            for argument in provided {
                if let Err(e) = self.validate(field, &argument.value) {
                    tracing::debug!(
                        argument = argument.name,
                        error = %e,
                        "Rejected argument"
                    );
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    pub fn validate_longitude(&self, value: &str) -> Result<()> {
        let pattern = match self.longitude {
            LongitudeRule::Wgs84 => &*LONGITUDE,
            LongitudeRule::LatitudeBounded => &*LATITUDE,
        };
        if pattern.is_match(value) {
            Ok(())
        } else {
            Err(Error::GeolocationRange {
                field: Field::Longitude.name(),
                value: value.to_string(),
            })
        }
    }
}

/// An IPv4 or IPv6 address literal.
pub fn validate_ip(value: &str) -> Result<()> {
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|e| Error::InvalidAddress {
            field: Field::Ip.name(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// An IPv4 or IPv6 network in CIDR notation. Host bits must be zero.
pub fn validate_cidr(value: &str) -> Result<()> {
    let invalid = |reason: String| Error::InvalidAddress {
        field: Field::Cidr.name(),
        value: value.to_string(),
        reason,
    };

    let network = value
        .parse::<IpNetwork>()
        .map_err(|e| invalid(e.to_string()))?;
    if network.ip() != network.network() {
        return Err(invalid(format!(
            "host bits set, the network address is {}/{}",
            network.network(),
            network.prefix()
        )));
    }
    Ok(())
}

pub fn validate_language(value: &str) -> Result<()> {
    if languages::is_supported(value) {
        Ok(())
    } else {
        Err(Error::UnsupportedLanguage(value.to_string()))
    }
}

pub fn validate_email(value: &str) -> Result<()> {
    if EMAIL.is_match(value) {
        Ok(())
    } else {
        Err(Error::InvalidFormat {
            field: Field::EmailAddress.name(),
            value: value.to_string(),
            reason: "not a valid email address".to_string(),
        })
    }
}

/// A Unix timestamp in seconds: an integer, or text that parses as one.
pub fn validate_utc_reference(value: &ParamValue) -> Result<()> {
    let valid = match value {
        ParamValue::Integer(_) => true,
        ParamValue::Text(text) => text.trim().parse::<i64>().is_ok(),
        ParamValue::Flag(_) => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidFormat {
            field: Field::UtcReference.name(),
            value: value.to_string(),
            reason: "not a valid unix timestamp".to_string(),
        })
    }
}

/// Digits only; hyphens, spaces and a leading `+` are rejected.
pub fn validate_phone_number(value: &str) -> Result<()> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(Error::InvalidFormat {
            field: Field::Number.name(),
            value: value.to_string(),
            reason: "the phone number should be digits only, without hyphens or spaces"
                .to_string(),
        })
    }
}

pub fn validate_latitude(value: &str) -> Result<()> {
    if LATITUDE.is_match(value) {
        Ok(())
    } else {
        Err(Error::GeolocationRange {
            field: Field::Latitude.name(),
            value: value.to_string(),
        })
    }
}
