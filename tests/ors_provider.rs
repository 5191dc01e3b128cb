mod common;

use common::{closed_port_url, directions_body, Reply, StubServer};
use std::num::NonZeroU32;
use std::time::Duration;
use travel_time::sdk::config::OrsConfig;
use travel_time::sdk::routing::{Coordinate, OrsProvider, RoutingError, RoutingProvider};
use travel_time::sdk::util::rate_limit::ors_limiter;

fn provider(config: OrsConfig, timeout: Duration) -> OrsProvider {
    OrsProvider::new(&config, timeout, ors_limiter(NonZeroU32::new(40).unwrap())).unwrap()
}

fn remote(base_url: &str) -> OrsConfig {
    OrsConfig::Remote {
        api_key: "secret".into(),
        base_url: base_url.into(),
    }
}

fn endpoints() -> (Coordinate, Coordinate) {
    (
        Coordinate::new(12.946538, 77.579975).unwrap(),
        Coordinate::new(13.04438892, 77.60185844).unwrap(),
    )
}

#[test]
fn sends_lon_lat_query_and_parses_route() {
    let server = StubServer::start(vec![Reply::Json(200, directions_body(5000.0, 600.0))]);
    let ors = provider(remote(&server.base_url), Duration::from_secs(5));
    let (start, end) = endpoints();

    let route = ors.get_directions(start, end).unwrap();
    assert_eq!(route.distance_meters, 5000.0);
    assert_eq!(route.duration_seconds, 600.0);
    assert_eq!(route.path.first(), Some(&start));
    assert_eq!(route.path.last(), Some(&end));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let line = &requests[0];
    assert!(line.starts_with("GET /v2/directions/driving-car?"), "{}", line);
    assert!(line.contains("api_key=secret"), "{}", line);
    assert!(line.contains("start=77.579975%2C12.946538"), "{}", line);
    assert!(line.contains("end=77.60185844%2C13.04438892"), "{}", line);
}

#[test]
fn local_instance_gets_no_api_key() {
    let server = StubServer::start(vec![Reply::Json(200, directions_body(1.0, 1.0))]);
    let ors = provider(
        OrsConfig::Local {
            base_url: format!("{}/", server.base_url),
        },
        Duration::from_secs(5),
    );
    let (start, end) = endpoints();
    ors.get_directions(start, end).unwrap();
    let requests = server.requests();
    assert!(!requests[0].contains("api_key"), "{}", requests[0]);
    assert!(requests[0].starts_with("GET /v2/directions/driving-car?"));
}

#[test]
fn non_success_status_is_not_retried() {
    let body = r#"{"error":{"code":2004,"message":"Request parameters exceed the server configuration limits"}}"#;
    let server = StubServer::start(vec![
        Reply::Json(400, body.to_string()),
        Reply::Json(200, directions_body(1.0, 1.0)),
    ]);
    let ors = provider(remote(&server.base_url), Duration::from_secs(5));
    let (start, end) = endpoints();

    let err = ors.get_directions(start, end).unwrap_err();
    match &err {
        RoutingError::ApiError { status, code, .. } => {
            assert_eq!(*status, 400);
            assert_eq!(*code, 2004);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_unavailable());
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn malformed_body_is_not_retried() {
    let server = StubServer::start(vec![
        Reply::Json(200, r#"{"features":[{"properties":{}}]}"#.to_string()),
        Reply::Json(200, directions_body(1.0, 1.0)),
    ]);
    let ors = provider(remote(&server.base_url), Duration::from_secs(5));
    let (start, end) = endpoints();

    let err = ors.get_directions(start, end).unwrap_err();
    assert!(!err.is_unavailable());
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn timeout_is_retried_once_then_reported() {
    let server = StubServer::start(vec![
        Reply::Hang(Duration::from_secs(3)),
        Reply::Hang(Duration::from_secs(3)),
    ]);
    let ors = provider(remote(&server.base_url), Duration::from_millis(500));
    let (start, end) = endpoints();

    let started = std::time::Instant::now();
    let err = ors.get_directions(start, end).unwrap_err();
    assert!(err.is_transient(), "{err:?}");
    assert!(err.is_unavailable());
    // two attempts, each bounded by the timeout
    assert!(started.elapsed() >= Duration::from_millis(900));
}

#[test]
fn transient_failure_recovers_on_retry() {
    let server = StubServer::start(vec![
        Reply::Hang(Duration::from_secs(2)),
        Reply::Json(200, directions_body(2500.0, 300.0)),
    ]);
    let ors = provider(remote(&server.base_url), Duration::from_secs(1));
    let (start, end) = endpoints();

    let route = ors.get_directions(start, end).unwrap();
    assert_eq!(route.distance_meters, 2500.0);
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn unreachable_host_is_unavailable() {
    let ors = provider(remote(&closed_port_url()), Duration::from_secs(2));
    let (start, end) = endpoints();
    let err = ors.get_directions(start, end).unwrap_err();
    assert!(err.is_unavailable(), "{err:?}");
}
