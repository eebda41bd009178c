//! Scheduler integration tests driving a wiremock Places endpoint.

use std::cell::{Cell, RefCell};

use mapspider_core::Coordinate;
use mapspider_places::PlacesClient;
use mapspider_scan::{ScanError, SearchRegion, Spider};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, 0, 0, base_url)
        .expect("client construction should not fail")
}

/// A response body with `count` places, IDs `{prefix}0..{prefix}{count-1}`.
fn places_body(prefix: &str, count: usize) -> serde_json::Value {
    let places: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("{prefix}{i}"),
                "displayName": { "text": format!("Place {prefix}{i}") },
                "location": { "latitude": 1.0, "longitude": 2.0 }
            })
        })
        .collect();
    serde_json::json!({ "places": places })
}

/// Matches requests whose search circle is centered on `center`.
fn centered_on(center: Coordinate) -> wiremock::matchers::BodyPartialJsonMatcher {
    body_partial_json(serde_json::json!({
        "locationRestriction": {
            "circle": { "center": { "latitude": center.lat, "longitude": center.lng } }
        }
    }))
}

#[tokio::test]
async fn accepts_region_under_cap_without_split() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("p", 5)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let seen = RefCell::new(Vec::new());
    let report = Spider::new(&client, 10)
        .on_progress(|p| seen.borrow_mut().push(p))
        .run(&[Coordinate::new(55.7558, 37.6173)], 1000.0)
        .await
        .unwrap();

    assert_eq!(report.places.len(), 5);
    assert_eq!(report.requests_used, 1);
    assert!(!report.budget_exhausted);
    // One accepted root region covers the whole bounding square.
    assert_eq!(*seen.borrow(), vec![100.0]);
}

#[tokio::test]
async fn splits_full_region_and_accepts_quadrants() {
    let server = MockServer::start().await;
    let origin = Coordinate::new(0.0, 0.0);

    // Root probe comes back full → must split.
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(centered_on(origin))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("root", 20)))
        .with_priority(1)
        .mount(&server)
        .await;

    // Every child is sparse → accepted.
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("child", 3)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let seen = RefCell::new(Vec::new());
    let report = Spider::new(&client, 50)
        .on_progress(|p| seen.borrow_mut().push(p))
        .run(&[origin], 1000.0)
        .await
        .unwrap();

    // 1 root + 4 children.
    assert_eq!(report.requests_used, 5);
    assert!(!report.budget_exhausted);
    // A split region's own (truncated) results are discarded; the four
    // children each return the same 3 places, collapsed by dedup.
    assert_eq!(report.places.len(), 3);

    // Each accepted quadrant credits a quarter of the bounding square.
    let progress = seen.borrow();
    assert_eq!(progress.len(), 4);
    assert!(progress.windows(2).all(|w| w[1] >= w[0]));
    assert!((progress[0] - 25.0).abs() < 1e-9);
    assert!((progress[3] - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn accepts_full_region_at_radius_floor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("p", 20)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let report = Spider::new(&client, 10)
        .run(&[Coordinate::new(10.0, 10.0)], 10.0)
        .await
        .unwrap();

    // Full page, but radius is already at the floor: accepted, never split.
    assert_eq!(report.requests_used, 1);
    assert_eq!(report.places.len(), 20);
    assert!(!report.budget_exhausted);
}

#[tokio::test]
async fn stops_at_request_ceiling() {
    let server = MockServer::start().await;
    // Dense everywhere: every probe is full, so the tree would fan out
    // indefinitely without the ceiling.
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("p", 20)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stop_notices = Cell::new(0u32);
    let report = Spider::new(&client, 3)
        .on_budget_exhausted(|| stop_notices.set(stop_notices.get() + 1))
        .run(&[Coordinate::new(48.8566, 2.3522)], 5000.0)
        .await
        .unwrap();

    assert_eq!(report.requests_used, 3);
    assert!(report.budget_exhausted);
    assert_eq!(stop_notices.get(), 1);
}

#[tokio::test]
async fn terminates_naturally_when_dense_down_to_floor() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("p", 20)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let report = Spider::new(&client, 200)
        .run(&[Coordinate::new(40.0, -3.7)], 50.0)
        .await
        .unwrap();

    // Radius 50 splits three times before the child radius drops under the
    // floor: 1 + 4 + 16 + 64 probes, well inside the budget.
    assert_eq!(report.requests_used, 85);
    assert!(!report.budget_exhausted);
}

#[tokio::test]
async fn failed_region_does_not_disturb_siblings() {
    let server = MockServer::start().await;
    let origin = Coordinate::new(0.0, 0.0);
    let broken_child = SearchRegion::root(origin, 1000.0).split()[0].center;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(centered_on(origin))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("root", 20)))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(centered_on(broken_child))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("ok", 2)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let report = Spider::new(&client, 50).run(&[origin], 1000.0).await.unwrap();

    // The failing quadrant degrades to empty; its three siblings still land.
    assert_eq!(report.requests_used, 5);
    assert!(!report.budget_exhausted);
    assert_eq!(report.places.len(), 2);
}

#[tokio::test]
async fn scans_multiple_origins_and_dedups_across_them() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("shared", 1)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let seen = RefCell::new(Vec::new());
    let report = Spider::new(&client, 10)
        .on_progress(|p| seen.borrow_mut().push(p))
        .run(
            &[Coordinate::new(51.5074, -0.1278), Coordinate::new(51.52, -0.10)],
            500.0,
        )
        .await
        .unwrap();

    assert_eq!(report.requests_used, 2);
    // Both origins returned the same place; one survives.
    assert_eq!(report.places.len(), 1);
    // Area accounting restarts per origin.
    assert_eq!(*seen.borrow(), vec![100.0, 100.0]);
}

#[tokio::test]
async fn forwards_place_type_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(body_partial_json(serde_json::json!({
            "includedTypes": ["cafe"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(places_body("p", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let report = Spider::new(&client, 10)
        .place_type(Some("cafe".to_owned()))
        .run(&[Coordinate::new(52.52, 13.405)], 800.0)
        .await
        .unwrap();

    assert_eq!(report.places.len(), 1);
}

#[tokio::test]
async fn rejects_polar_origin() {
    let client = test_client("http://localhost:9");
    let err = Spider::new(&client, 10)
        .run(&[Coordinate::new(89.5, 0.0)], 1000.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::PolarOrigin { .. }));
    assert_eq!(client.requests_issued(), 0);
}

#[tokio::test]
async fn rejects_non_positive_radius() {
    let client = test_client("http://localhost:9");
    let err = Spider::new(&client, 10)
        .run(&[Coordinate::new(0.0, 0.0)], 0.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::NonPositiveRadius(_)));
}
