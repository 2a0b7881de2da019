use super::*;

fn client(base_url: &str, city: &str) -> ParkingApiClient {
    ParkingApiClient::with_base_url(base_url, city, 30, "lotlist-test")
        .expect("client construction should not fail")
}

#[test]
fn lots_url_appends_city() {
    let c = client("https://api.parkendd.de", "Dresden");
    assert_eq!(c.lots_url().as_str(), "https://api.parkendd.de/Dresden");
}

#[test]
fn lots_url_strips_trailing_slashes() {
    let c = client("https://api.parkendd.de//", "Dresden");
    assert_eq!(c.lots_url().as_str(), "https://api.parkendd.de/Dresden");
}

#[test]
fn lots_url_keeps_base_path() {
    let c = client("http://localhost:8080/v1", "Leipzig");
    assert_eq!(c.lots_url().as_str(), "http://localhost:8080/v1/Leipzig");
    assert_eq!(
        c.notice_url().as_str(),
        "http://localhost:8080/v1/notification"
    );
}

#[test]
fn lots_url_encodes_city() {
    let c = client("https://api.parkendd.de", "Frankfurt am Main");
    assert_eq!(
        c.lots_url().as_str(),
        "https://api.parkendd.de/Frankfurt%20am%20Main"
    );
}

#[test]
fn rejects_invalid_base_url() {
    let result = ParkingApiClient::with_base_url("not-a-url", "Dresden", 30, "ua");
    assert!(
        matches!(result, Err(ClientError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn rejects_non_http_scheme() {
    let result = ParkingApiClient::with_base_url("ftp://example.com", "Dresden", 30, "ua");
    assert!(
        matches!(result, Err(ClientError::InvalidBaseUrl { ref reason, .. }) if reason.contains("ftp")),
        "expected InvalidBaseUrl for ftp scheme"
    );
}

#[test]
fn default_client_targets_public_api() {
    let c = ParkingApiClient::new("Dresden", 30, "ua").unwrap();
    assert_eq!(c.lots_url().as_str(), "https://api.parkendd.de/Dresden");
    assert!(c.lots_url().as_str().starts_with(DEFAULT_API_BASE_URL));
}
