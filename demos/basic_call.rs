//! Basic example: a few lookups against the live BigDataCloud API.
//!
//! This example shows how to:
//! - Create a client from an API key
//! - Call key-free and keyed endpoints
//! - Decode a response into your own type with `Client::call`
//! - Access response data and metadata
//!
//! Run with: `BIGDATACLOUD_API_KEY=... cargo run --example basic_call`

use bigdatacloud::{Client, CoordinatesQuery, Error, IpQuery, Operation, TimezoneInfoQuery};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientIp {
    ip_string: String,
    ip_type: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("bigdatacloud=debug,basic_call=info")
        .init();

    let api_key = std::env::var("BIGDATACLOUD_API_KEY").unwrap_or_default();
    let client = Client::new(api_key)?;

    println!("=== Key-free endpoints ===");
    let me = client.call::<ClientIp>(Operation::ClientIp, &[]).await?;
    println!("Your IP: {} ({})", me.data.ip_string, me.data.ip_type);

    let place = client
        .reverse_geocode_client(&CoordinatesQuery::new().latitude("-34.93").longitude("138.6"))
        .await?;
    println!("Locality: {}", place["locality"]);
    println!("Request latency: {:?}", place.latency);
    println!();

    if client.api_key().is_empty() {
        println!("Set BIGDATACLOUD_API_KEY to try the keyed endpoints.");
        return Ok(());
    }

    println!("=== Keyed endpoints ===");
    let geo = client
        .ip_geolocation(&IpQuery::new().ip(me.data.ip_string.as_str()).lang("de"))
        .await?;
    println!("Country: {}", geo["country"]["name"]);

    let zone = client
        .timezone_info(
            &TimezoneInfoQuery::new()
                .timezone_id("Australia/Sydney")
                .utc_reference(1_600_000_000i64),
        )
        .await?;
    println!("Sydney local time: {}", zone["localTime"]);
    println!();

    println!("=== Accessing Response Metadata ===");
    println!("Status code: {}", zone.status);
    println!("Raw response length: {} bytes", zone.raw_body.len());
    println!("Content-Type: {:?}", zone.header("content-type"));

    Ok(())
}
