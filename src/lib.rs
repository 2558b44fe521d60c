//! # bigdatacloud - typed client for the BigDataCloud APIs
//!
//! Async bindings for BigDataCloud's IP geolocation, reverse geocoding, time
//! zone, country, ASN, network insight, phone and email validation
//! endpoints, built on `reqwest`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bigdatacloud::{Client, IpQuery, TimezoneInfoQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bigdatacloud::Error> {
//!     let client = Client::new("my-api-key")?;
//!
//!     let geo = client
//!         .ip_geolocation(&IpQuery::new().ip("8.8.8.8").lang("de"))
//!         .await?;
//!     println!("{}", geo.data["country"]["name"]);
//!
//!     let zone = client
//!         .timezone_info(
//!             &TimezoneInfoQuery::new()
//!                 .timezone_id("Australia/Sydney")
//!                 .utc_reference(1_600_000_000i64),
//!         )
//!         .await?;
//!     println!("{}", zone.data["localTime"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How a call is made
//!
//! Each method on [`Client`] names an [`Operation`]. The operation's
//! [`Descriptor`] in the [`catalog`] fixes the endpoint path and the order
//! of its query parameters. Before anything is sent, the arguments the
//! caller set are checked by the [`validate`] rules (IP and CIDR literals,
//! locality language, coordinates, timestamps, phone digits, email shape).
//! The values are then bound to the descriptor, the API key is appended for
//! endpoints that authenticate, and one GET is issued. The JSON body comes
//! back untouched in a [`Response`].
//!
//! ## Error Handling
//!
//! ```no_run
//! use bigdatacloud::{Client, Error, PhoneQuery};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("my-api-key")?;
//! let query = PhoneQuery::new().number("0414-123-456").country_code("AU");
//! match client.phone_number_validate(&query).await {
//!     Ok(response) => println!("{}", response.data),
//!     Err(e) if e.is_validation_error() => eprintln!("Fix the input: {e}"),
//!     Err(Error::HttpError { status, .. }) => eprintln!("Rejected by the API: {status}"),
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
mod client;
mod error;
pub mod languages;
pub mod metadata;
pub mod query;
mod response;
pub mod validate;

pub use catalog::{Category, Descriptor, Operation};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use metadata::{ParamValue, RequestMetadata};
pub use query::{
    Argument, AsnQuery, CoordinatesQuery, CountryInfoQuery, IpQuery, NetworkByCidrQuery,
    PhoneByIpQuery, PhoneQuery, PrefixesQuery, QueryArguments, RoamingQuery, TimezoneByIpQuery,
    TimezoneByLocationQuery, TimezoneInfoQuery, TorExitNodesQuery,
};
pub use response::Response;
pub use validate::{Field, LongitudeRule, Validator};
