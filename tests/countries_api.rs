//! HTTP tests for the country routes, served from the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use worlder::{app, AppState, MemoryCountryStore, BODY_LIMIT_BYTES};

fn test_router() -> Router {
    app(AppState::new(Arc::new(MemoryCountryStore::new())))
}

async fn request(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(router, req).await
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, parsed)
}

fn country(name: &str, iso: &str, continent: &str, population: i64, area: f64) -> Value {
    json!({
        "name": name,
        "isoCode": iso,
        "capital": format!("Capital of {}", name),
        "continent": continent,
        "population": population,
        "area": area,
        "currency": "Euro",
        "officialLanguage": "English"
    })
}

async fn seed(router: &Router) {
    for body in [
        country("France", "FRA", "Europe", 67_000_000, 551_695.0),
        country("Japan", "JPN", "Asia", 125_000_000, 377_975.0),
        country("Malta", "MLT", "Europe", 520_000, 316.0),
        country("Kenya", "KEN", "Africa", 54_000_000, 580_367.0),
    ] {
        let (status, _) = request(router, Method::POST, "/api/countries", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

fn names(list: &Value) -> Vec<&str> {
    list.as_array().unwrap().iter().map(|c| c["name"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn create_read_update_delete_lifecycle() {
    let router = test_router();

    let (status, created) = request(
        &router,
        Method::POST,
        "/api/countries",
        Some(json!({"name": "France", "isoCode": "FRA", "population": 5_000_000})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);

    let (status, body) = request(&router, Method::GET, "/api/countries/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "France");
    assert_eq!(body["population"], 5_000_000);

    let (status, body) = request(
        &router,
        Method::PUT,
        "/api/countries/1",
        Some(json!({"name": "Francia", "isoCode": "FRA"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Francia");
    assert_eq!(body["id"], 1);
    // Full replacement: fields absent from the body are cleared.
    assert_eq!(body["population"], Value::Null);

    let (status, _) = request(&router, Method::DELETE, "/api/countries/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(&router, Method::GET, "/api/countries/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_iso_code_is_rejected_and_not_persisted() {
    let router = test_router();
    let (first, _) = request(
        &router,
        Method::POST,
        "/api/countries",
        Some(json!({"name": "France", "isoCode": "FRA"})),
    )
    .await;
    let (second, _) = request(
        &router,
        Method::POST,
        "/api/countries",
        Some(json!({"name": "Francia", "isoCode": "FRA"})),
    )
    .await;
    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);

    let (status, count) = request(&router, Method::GET, "/api/countries/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, json!(1));
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let router = test_router();
    seed(&router).await;
    let (status, _) = request(
        &router,
        Method::POST,
        "/api/countries",
        Some(json!({"name": "France", "isoCode": "FRX"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn created_ids_are_distinct_and_client_ids_ignored() {
    let router = test_router();
    let (_, a) = request(
        &router,
        Method::POST,
        "/api/countries",
        Some(json!({"id": 77, "name": "France", "isoCode": "FRA"})),
    )
    .await;
    let (_, b) = request(
        &router,
        Method::POST,
        "/api/countries",
        Some(json!({"id": 77, "name": "Spain", "isoCode": "ESP"})),
    )
    .await;
    assert_eq!(a["id"], 1);
    assert_eq!(b["id"], 2);

    let (status, _) = request(&router, Method::GET, "/api/countries/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_create_bodies_are_bad_requests() {
    let router = test_router();

    let (status, _) = request(&router, Method::POST, "/api/countries", Some(json!({"isoCode": "FRA"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &router,
        Method::POST,
        "/api/countries",
        Some(json!({"name": "France", "isoCode": "FRA", "population": "lots"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/countries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &router,
        Method::POST,
        "/api/countries",
        Some(json!({"name": "France", "isoCode": "FRAN"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, count) = request(&router, Method::GET, "/api/countries/count", None).await;
    assert_eq!(count, json!(0));
}

#[tokio::test]
async fn lookups_by_name_and_code() {
    let router = test_router();
    seed(&router).await;

    let (status, body) = request(&router, Method::GET, "/api/countries/name/Japan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isoCode"], "JPN");

    let (status, body) = request(&router, Method::GET, "/api/countries/code/KEN", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Kenya");
    assert_eq!(body["officialLanguage"], "English");

    let (status, _) = request(&router, Method::GET, "/api/countries/name/WilliamLand", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&router, Method::GET, "/api/countries/code/XXX", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_all_returns_every_record_in_id_order() {
    let router = test_router();

    let (status, body) = request(&router, Method::GET, "/api/countries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    seed(&router).await;
    let (_, body) = request(&router, Method::GET, "/api/countries", None).await;
    assert_eq!(names(&body), ["France", "Japan", "Malta", "Kenya"]);
}

#[tokio::test]
async fn continent_filter_is_exact_and_may_be_empty() {
    let router = test_router();
    seed(&router).await;

    let (status, body) = request(&router, Method::GET, "/api/countries/continent/Europe", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["France", "Malta"]);

    let (status, body) = request(&router, Method::GET, "/api/countries/continent/europe", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = request(&router, Method::GET, "/api/countries/continent/Antarctica", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn threshold_filters_are_strict() {
    let router = test_router();
    seed(&router).await;

    let (status, body) = request(&router, Method::GET, "/api/countries/population/min/54000000", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["France", "Japan"]);

    let (status, body) = request(&router, Method::GET, "/api/countries/area/min/377975", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["France", "Kenya"]);

    let (status, body) = request(&router, Method::GET, "/api/countries/area/min/100.5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn continents_and_count() {
    let router = test_router();
    seed(&router).await;

    let (status, body) = request(&router, Method::GET, "/api/countries/continents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Africa", "Asia", "Europe"]));

    let (status, body) = request(&router, Method::GET, "/api/countries/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(4));
}

#[tokio::test]
async fn update_of_missing_id_is_not_found_and_writes_nothing() {
    let router = test_router();
    seed(&router).await;

    let (status, _) = request(
        &router,
        Method::PUT,
        "/api/countries/999",
        Some(json!({"name": "Atlantis", "isoCode": "ATL"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&router, Method::GET, "/api/countries/name/Atlantis", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, count) = request(&router, Method::GET, "/api/countries/count", None).await;
    assert_eq!(count, json!(4));
}

#[tokio::test]
async fn update_keeps_path_id_over_body_id() {
    let router = test_router();
    seed(&router).await;

    let (status, body) = request(
        &router,
        Method::PUT,
        "/api/countries/2",
        Some(json!({"id": 3, "name": "Nippon", "isoCode": "JPN", "continent": "Asia"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);

    let (_, malta) = request(&router, Method::GET, "/api/countries/3", None).await;
    assert_eq!(malta["name"], "Malta");
    let (_, nippon) = request(&router, Method::GET, "/api/countries/2", None).await;
    assert_eq!(nippon["name"], "Nippon");
}

#[tokio::test]
async fn update_into_existing_unique_value_is_bad_request() {
    let router = test_router();
    seed(&router).await;

    let (status, _) = request(
        &router,
        Method::PUT,
        "/api/countries/2",
        Some(json!({"name": "Japan", "isoCode": "FRA"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, japan) = request(&router, Method::GET, "/api/countries/2", None).await;
    assert_eq!(japan["isoCode"], "JPN");
}

#[tokio::test]
async fn delete_missing_id_is_not_found() {
    let router = test_router();
    seed(&router).await;

    let (status, _) = request(&router, Method::DELETE, "/api/countries/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&router, Method::DELETE, "/api/countries/4", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = request(&router, Method::DELETE, "/api/countries/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, count) = request(&router, Method::GET, "/api/countries/count", None).await;
    assert_eq!(count, json!(3));
}

#[tokio::test]
async fn non_numeric_path_parameters_are_bad_requests() {
    let router = test_router();

    let (status, body) = request(&router, Method::GET, "/api/countries/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, body) = request(&router, Method::GET, "/api/countries/population/min/many", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, body) = request(&router, Method::DELETE, "/api/countries/1.5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].is_string());
}

fn oversized_country() -> Vec<u8> {
    let mut body = country("France", "FRA", "Europe", 67_000_000, 551_695.0);
    body["capital"] = json!("x".repeat(BODY_LIMIT_BYTES + 1));
    serde_json::to_vec(&body).unwrap()
}

#[tokio::test]
async fn bodies_over_the_limit_are_rejected_and_not_stored() {
    let router = test_router();
    let payload = oversized_country();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/countries")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload.clone()))
        .unwrap();
    let (status, _) = send(&router, req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // No declared length: the limit trips while the body is read.
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/countries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload))
        .unwrap();
    let (status, body) = send(&router, req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");

    let (_, count) = request(&router, Method::GET, "/api/countries/count", None).await;
    assert_eq!(count, json!(0));
}

#[tokio::test]
async fn health_ready_and_version() {
    let router = test_router();

    let (status, body) = request(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = request(&router, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "ok");

    let (status, body) = request(&router, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "worlder");
}
