//! Example demonstrating error handling.
//!
//! This example shows how to:
//! - Catch bad input before any request is sent
//! - Tell validation errors apart from API errors
//! - Inspect HTTP status codes and raw bodies
//! - Deal with deserialization failures
//!
//! Run with: `cargo run --example error_handling`

use bigdatacloud::{Client, Error, NetworkByCidrQuery, Operation, PhoneQuery, TimezoneByIpQuery};
use serde::Deserialize;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("bigdatacloud=info")
        .init();

    let client = Client::new("not-a-real-key")?;

    println!("=== Example 1: Validation Errors ===");
    let bad_inputs = [
        client
            .phone_number_validate(&PhoneQuery::new().number("0414-123-456").country_code("AU"))
            .await,
        client
            .network_by_cidr(&NetworkByCidrQuery::new().cidr("8.8.8.1/24"))
            .await,
        client.email_verify("foo@bar").await,
    ];
    for result in bad_inputs {
        match result {
            Err(e) if e.is_validation_error() => println!("Rejected locally: {}", e),
            Err(e) => println!("Other error: {}", e),
            Ok(_) => println!("Unexpected success"),
        }
    }
    println!();

    println!("=== Example 2: Handling HTTP Errors ===");
    // An invalid key is only detected by the API.
    match client
        .timezone_by_ip(&TimezoneByIpQuery::new().ip("8.8.8.8"))
        .await
    {
        Ok(response) => println!("Success: {}", response.data),
        Err(Error::HttpError {
            status,
            raw_response,
            headers,
        }) => {
            println!("HTTP Error!");
            println!("  Status: {}", status);
            println!("  Is client error (4xx): {}", status.is_client_error());
            println!("  Raw response: {}", raw_response);
            println!("  Content-Type: {:?}", headers.get("content-type"));
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 3: Handling Deserialization Errors ===");
    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct WrongSchema {
        nonexistent_field: String,
    }

    match client.call::<WrongSchema>(Operation::ClientInfo, &[]).await {
        Ok(_) => println!("Unexpected success"),
        Err(Error::DeserializationFailed {
            raw_response,
            serde_error,
            status,
        }) => {
            println!("Deserialization Failed!");
            println!("  Status: {}", status);
            println!("  Serde error: {}", serde_error);
            println!(
                "  Raw response (first 200 chars): {}",
                raw_response.chars().take(200).collect::<String>()
            );
        }
        Err(e) => println!("Other error: {}", e),
    }

    Ok(())
}
