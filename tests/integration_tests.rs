//! Integration tests using wiremock to stand in for the BigDataCloud API.

use bigdatacloud::{
    AsnQuery, Client, CoordinatesQuery, CountryInfoQuery, Error, IpQuery, LongitudeRule,
    NetworkByCidrQuery, Operation, PhoneByIpQuery, PhoneQuery, PrefixesQuery, RoamingQuery,
    TimezoneByIpQuery, TimezoneByLocationQuery, TimezoneInfoQuery, TorExitNodesQuery,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn client_for(server: &MockServer, api_key: &str) -> Client {
    Client::builder()
        .base_url(format!("{}/data", server.uri()))
        .unwrap()
        .api_key(api_key)
        .build()
        .unwrap()
}

async fn mount_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(server)
        .await;
}

async fn received_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |requests| requests.len())
}

#[tokio::test]
async fn test_ip_geolocation_sends_bound_parameters() {
    let mock_server = MockServer::start().await;

    let body = json!({
        "ip": "8.8.8.8",
        "country": {"isoAlpha2": "US", "name": "United States of America"}
    });

    Mock::given(method("GET"))
        .and(path("/data/ip-geolocation"))
        .and(query_param("ip", "8.8.8.8"))
        .and(query_param("localityLanguage", "fr"))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, API_KEY);
    let response = client
        .ip_geolocation(&IpQuery::new().ip("8.8.8.8").lang("fr"))
        .await
        .unwrap();

    assert_eq!(response.data, body);
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response["country"]["isoAlpha2"], "US");
}

#[tokio::test]
async fn test_every_operation_hits_its_endpoint() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server).await;

    let client = client_for(&mock_server, API_KEY);
    let coordinates = CoordinatesQuery::new().latitude("-34.93").longitude("138.6");

    client.ip_geolocation(&IpQuery::new()).await.unwrap();
    client.ip_geolocation_full(&IpQuery::new()).await.unwrap();
    client.ip_geolocation_with_confidence(&IpQuery::new()).await.unwrap();
    client.reverse_geocode_client(&coordinates).await.unwrap();
    client.reverse_geocode(&coordinates).await.unwrap();
    client.client_info().await.unwrap();
    client
        .am_i_roaming(&RoamingQuery::new().latitude("-34.93").longitude("138.6"))
        .await
        .unwrap();
    client.user_agent_info("curl/8.0").await.unwrap();
    client.client_ip().await.unwrap();
    client.timezone_by_ip(&TimezoneByIpQuery::new()).await.unwrap();
    client.timezone_info(&TimezoneInfoQuery::new()).await.unwrap();
    client
        .timezone_by_location(&TimezoneByLocationQuery::new())
        .await
        .unwrap();
    client.country_by_ip(&IpQuery::new()).await.unwrap();
    client
        .country_info(&CountryInfoQuery::new().code("AU"))
        .await
        .unwrap();
    client.asn_info(&AsnQuery::new().asn("AS13335")).await.unwrap();
    client.asn_info_full(&AsnQuery::new().asn("AS13335")).await.unwrap();
    client.tor_exit_nodes_list(&TorExitNodesQuery::new()).await.unwrap();
    client.address_space_stats_ipv4().await.unwrap();
    client.network_by_ip(&IpQuery::new()).await.unwrap();
    client.prefixes_list(&PrefixesQuery::new()).await.unwrap();
    client
        .network_by_cidr(&NetworkByCidrQuery::new().cidr("8.8.8.0/24"))
        .await
        .unwrap();
    client
        .phone_number_validate_by_ip(&PhoneByIpQuery::new().number("0414123456"))
        .await
        .unwrap();
    client
        .phone_number_validate(&PhoneQuery::new().number("0414123456").country_code("AU"))
        .await
        .unwrap();
    client.email_verify("a@b.co").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    let expected: Vec<String> = Operation::all()
        .map(|op| format!("/data/{}", op.descriptor().endpoint))
        .collect();
    assert_eq!(paths, expected);

    for (request, operation) in requests.iter().zip(Operation::all()) {
        let has_key = request.url.query_pairs().any(|(name, _)| name == "key");
        assert_eq!(has_key, operation.requires_key(), "{operation}");
    }
}

#[tokio::test]
async fn test_invalid_key_surfaces_as_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/timezone-by-ip"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"status": 403, "description": "Invalid API key"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "API_KEY");
    let result = client
        .timezone_by_ip(&TimezoneByIpQuery::new().ip("8.8.8.8").utc_reference(1000i64))
        .await;

    let err = result.unwrap_err();
    assert!(!err.is_validation_error());
    match err {
        Error::HttpError {
            status,
            raw_response,
            ..
        } => {
            assert_eq!(status.as_u16(), 403);
            assert!(raw_response.contains("Invalid API key"));
        }
        other => panic!("Expected HttpError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_key_is_sent_as_empty_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/country-info"))
        .and(query_param("code", "AU"))
        .and(query_param("key", ""))
        .respond_with(ResponseTemplate::new(401).set_body_string("Missing key"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "");
    let result = client
        .country_info(&CountryInfoQuery::new().code("AU"))
        .await;

    assert_eq!(result.unwrap_err().status().map(|s| s.as_u16()), Some(401));
}

#[tokio::test]
async fn test_validation_errors_send_nothing() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server).await;

    let client = client_for(&mock_server, API_KEY);

    let err = client.email_verify("foo@bar").await.unwrap_err();
    assert!(matches!(err, Error::InvalidFormat { field: "email_address", .. }));

    let err = client
        .ip_geolocation(&IpQuery::new().ip("192.168"))
        .await
        .unwrap_err();
    assert!(err.is_format_error());

    let err = client
        .ip_geolocation(&IpQuery::new().ip("8.8.8.8").lang("yy"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedLanguage(ref code) if code == "yy"));

    let err = client
        .network_by_cidr(&NetworkByCidrQuery::new().cidr("8.0.0.0/55").asn("AS15169"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidAddress { field: "cidr", .. }));

    let err = client
        .phone_number_validate(&PhoneQuery::new().number("myphonenumber").country_code("AU"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidFormat { field: "number", .. }));

    let err = client
        .timezone_by_location(
            &TimezoneByLocationQuery::new()
                .latitude("-34.93")
                .longitude("138.6")
                .utc_reference("MyUTC"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidFormat { field: "utc_reference", .. }));

    let err = client
        .timezone_by_location(&TimezoneByLocationQuery::new().latitude("-350").longitude("138.6"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::GeolocationRange { field: "latitude", .. }));

    assert_eq!(received_count(&mock_server).await, 0);
}

#[tokio::test]
async fn test_longitude_rule_is_configurable() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server).await;

    let query = TimezoneByLocationQuery::new().latitude("12.5").longitude("95");

    let client = client_for(&mock_server, API_KEY);
    client.timezone_by_location(&query).await.unwrap();

    let legacy = Client::builder()
        .base_url(format!("{}/data", mock_server.uri()))
        .unwrap()
        .api_key(API_KEY)
        .longitude_rule(LongitudeRule::LatitudeBounded)
        .build()
        .unwrap();
    let err = legacy.timezone_by_location(&query).await.unwrap_err();
    assert!(matches!(err, Error::GeolocationRange { field: "longitude", .. }));

    assert_eq!(received_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_defaults_fill_unset_arguments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/prefixes-list"))
        .and(query_param("bogonsOnly", "true"))
        .and(query_param("batchSize", "1"))
        .and(query_param("offset", "0"))
        .and(query_param("localityLanguage", "en"))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prefixes": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, API_KEY);
    let response = client
        .prefixes_list(&PrefixesQuery::new().bogons_only(true))
        .await
        .unwrap();

    assert_eq!(response["prefixes"], json!([]));
}

#[tokio::test]
async fn test_timezone_info_round_trip() {
    let mock_server = MockServer::start().await;

    let params = Operation::TimezoneInfo.descriptor().params;
    Mock::given(method("GET"))
        .and(path("/data/timezone-info"))
        .and(query_param(params[0], "Australia/Sydney"))
        .and(query_param(params[1], "1000"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ianaTimeId": "Australia/Sydney"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, API_KEY);
    let response = client
        .timezone_info(
            &TimezoneInfoQuery::new()
                .timezone_id("Australia/Sydney")
                .utc_reference(1000i64),
        )
        .await
        .unwrap();

    assert_eq!(response["ianaTimeId"], "Australia/Sydney");
}

#[tokio::test]
async fn test_open_endpoint_has_no_query_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/client-ip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ipString": "203.0.113.7",
            "ipType": "IPv4"
        })))
        .mount(&mock_server)
        .await;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ClientIp {
        ip_string: String,
        ip_type: String,
    }

    let client = client_for(&mock_server, API_KEY);
    let response = client
        .call::<ClientIp>(Operation::ClientIp, &[])
        .await
        .unwrap();

    assert_eq!(response.data.ip_string, "203.0.113.7");
    assert_eq!(response.data.ip_type, "IPv4");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_user_agent_is_query_encoded() {
    let mock_server = MockServer::start().await;
    let user_agent = "Mozilla/5.0 (X11; Linux x86_64) Firefox/120.0";

    Mock::given(method("GET"))
        .and(path("/data/user-agent-info"))
        .and(query_param("userAgentRaw", user_agent))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"os": "Linux"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, API_KEY);
    let response = client.user_agent_info(user_agent).await.unwrap();
    assert_eq!(response["os"], "Linux");
}

#[tokio::test]
async fn test_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/client-info"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, API_KEY);
    let result = client.client_info().await;

    match result {
        Err(Error::DeserializationFailed {
            raw_response,
            serde_error,
            status,
        }) => {
            assert_eq!(status.as_u16(), 200);
            assert_eq!(raw_response, "invalid json");
            assert!(serde_error.contains("expected"));
        }
        _ => panic!("Expected DeserializationFailed, got {:?}", result),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/asn-info"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, API_KEY);
    let err = client
        .asn_info(&AsnQuery::new().asn("AS15169"))
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    assert_eq!(err.raw_response(), Some("Service unavailable"));
    assert_eq!(received_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/client-info"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(format!("{}/data", mock_server.uri()))
        .unwrap()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let result = client.client_info().await;
    assert!(matches!(result, Err(Error::Timeout)), "got {:?}", result);
}

#[tokio::test]
async fn test_default_headers_and_injected_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/client-info"))
        .and(header("x-request-source", "integration-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = reqwest::Client::new();
    let client = Client::builder()
        .base_url(format!("{}/data", mock_server.uri()))
        .unwrap()
        .http_client(transport)
        .default_header("X-Request-Source", "integration-test")
        .unwrap()
        .build()
        .unwrap();

    let response = client.client_info().await.unwrap();
    assert_eq!(response["ok"], true);
}

#[tokio::test]
async fn test_clones_share_configuration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/network-by-ip"))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, API_KEY);
    let other = client.clone();

    let query = IpQuery::new().ip("1.1.1.1");
    let (a, b) = tokio::join!(client.network_by_ip(&query), other.network_by_ip(&query));
    assert!(a.is_ok());
    assert!(b.is_ok());
}

#[tokio::test]
async fn test_transport_errors_do_not_expose_key() {
    // Reserve a local port, then free it so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let secret = "SUPER-SECRET-KEY";
    let client = Client::builder()
        .base_url(format!("http://127.0.0.1:{port}/data"))
        .unwrap()
        .api_key(secret)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = client
        .ip_geolocation(&IpQuery::new().ip("8.8.8.8"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network(_) | Error::Timeout), "got {:?}", err);
    assert!(!err.to_string().contains(secret), "{err}");
    assert!(!format!("{:?}", err).contains(secret));
}

#[tokio::test]
async fn test_timestamp_errors_win_over_coordinate_errors() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server).await;

    let client = client_for(&mock_server, API_KEY);
    let err = client
        .timezone_by_location(
            &TimezoneByLocationQuery::new()
                .latitude("-350")
                .longitude("138.6")
                .utc_reference("MyUTC"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidFormat { field: "utc_reference", .. }));
    assert_eq!(received_count(&mock_server).await, 0);
}

#[tokio::test]
async fn test_empty_email_is_rejected_locally() {
    let mock_server = MockServer::start().await;
    mount_ok(&mock_server).await;

    let client = client_for(&mock_server, API_KEY);
    let err = client.email_verify("").await.unwrap_err();

    assert!(matches!(err, Error::InvalidFormat { field: "email_address", .. }));
    assert_eq!(received_count(&mock_server).await, 0);
}
