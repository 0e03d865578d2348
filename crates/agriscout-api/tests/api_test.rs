use std::sync::Arc;
use std::time::Duration;

use agriscout_api::services::{spawn_lookup, PlaceholderInsights};
use agriscout_api::{create_router, AppState, FieldSession};
use agriscout_core::error::{AgriError, Result};
use agriscout_core::models::Coordinate;
use agriscout_core::ports::Geocoder;
use agriscout_draw::{ClickOutcome, DrawingSession};
use agriscout_geo::GeodesicAreaEstimator;
use agriscout_llm::{ChatRelay, ChatRequest, ChatResponder};
use agriscout_store::MemoryFieldStore;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Geocoder that answers slowly for latitude 1.0
struct DelayedGeocoder;

#[async_trait]
impl Geocoder for DelayedGeocoder {
    async fn reverse(&self, coordinate: Coordinate) -> String {
        let delay = if coordinate.lat == 1.0 { 200 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        format!("Address near {}", coordinate.display_short())
    }
}

struct Scripted(Option<&'static str>);

#[async_trait]
impl ChatResponder for Scripted {
    async fn respond(&self, _request: &ChatRequest) -> Result<String> {
        self.0.map(str::to_string).ok_or_else(|| AgriError::upstream("scripted", "down"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn state() -> Arc<AppState> {
    let session: FieldSession =
        DrawingSession::new(MemoryFieldStore::new(), GeodesicAreaEstimator::new());
    let primary: Box<dyn ChatResponder> = Box::new(Scripted(None));
    let fallback: Box<dyn ChatResponder> = Box::new(Scripted(Some("Water in the evening")));
    let insights =
        PlaceholderInsights::new().with_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

    Arc::new(AppState::new(
        session,
        Arc::new(DelayedGeocoder),
        ChatRelay::new(primary, fallback),
        Arc::new(insights),
    ))
}

fn app() -> (Router, Arc<AppState>) {
    let state = state();
    (create_router(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn draw(app: &Router, points: &[[f64; 2]], name: Option<&str>) -> Value {
    let (status, _) = send(app, Method::POST, "/api/v1/session/draw/start", None).await;
    assert_eq!(status, StatusCode::OK);

    for [lat, lng] in points {
        let (status, body) =
            post(app, "/api/v1/session/draw/click", json!({ "lat": lat, "lng": lng })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "drawing");
    }

    let (status, body) = post(app, "/api/v1/session/draw/finish", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn set_phase(app: &Router, phase: &str) {
    let (status, body) =
        send(app, Method::PUT, "/api/v1/session/phase", Some(json!({ "phase": phase }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], phase);
}

const LAND: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 0.01], [0.01, 0.01], [0.01, 0.0]];
const INSIDE: [[f64; 2]; 3] = [[0.002, 0.002], [0.002, 0.004], [0.004, 0.004]];
const OUTSIDE: [[f64; 2]; 3] = [[0.02, 0.02], [0.02, 0.03], [0.03, 0.03]];

#[tokio::test]
async fn test_health_and_service_info() {
    let (app, _) = app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["ai"], "/api/ai/*");
}

#[tokio::test]
async fn test_ai_chat_requires_query() {
    let (app, _) = app();

    let (status, body) = post(&app, "/api/ai/chat", json!({ "query": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "Query is required" }));

    let (status, body) = post(&app, "/api/ai/chat", json!({ "query": "When to irrigate?" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["serviceType"], "general");
    assert_eq!(body["data"]["confidence"], 0.85);
    assert_eq!(body["data"]["relatedServices"][0], "crop_analysis");
}

#[tokio::test]
async fn test_ai_insight_endpoints() {
    let (app, _) = app();

    let (_, body) = post(&app, "/api/ai/weather/forecast", json!({ "days": 3 })).await;
    assert_eq!(body["weather"]["forecast"].as_array().unwrap().len(), 3);
    assert_eq!(body["weather"]["forecast"][0]["date"], "2024-06-01");
    assert_eq!(body["weather"]["alerts"][0]["type"], "heatwave");

    let (_, body) = post(&app, "/api/ai/crop/analyze", json!({ "fieldId": "land-9" })).await;
    assert_eq!(body["analysis"]["heatmapUrl"], "/api/heatmaps/land-9");
    assert_eq!(body["analysis"]["ndvi"]["average"], 0.72);

    let (_, body) = post(&app, "/api/ai/soil/analyze", json!({})).await;
    assert_eq!(body["soilAnalysis"]["ph"]["range"], "6.0-7.5");

    let (_, body) = post(&app, "/api/ai/interventions", json!({ "severity": "high" })).await;
    assert_eq!(body["interventions"]["severity"], "high");

    let (status, body) = get(&app, "/api/ai/services").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalServices"], 6);
    assert_eq!(body["services"]["soil_analysis"]["name"], "Soil Health Analysis");
}

#[tokio::test]
async fn test_land_and_partition_flow() {
    let (app, _) = app();

    let (_, snapshot) = post(&app, "/api/v1/session/advance", json!({})).await;
    assert_eq!(snapshot["phase"], "land-selection");

    let committed = draw(&app, &LAND, None).await;
    assert_eq!(committed["outcome"], "land-committed");
    assert_eq!(committed["land"]["name"], "Land 1");
    assert!(committed["land"]["area"].as_f64().unwrap() > 0.0);
    let land_id = committed["land"]["id"].as_str().unwrap().to_string();

    set_phase(&app, "partitioning").await;
    let (status, selection) =
        send(&app, Method::PUT, "/api/v1/selection", Some(json!({ "landId": land_id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(selection["selectedLandId"], land_id.as_str());

    let committed = draw(&app, &INSIDE, Some("Wheat")).await;
    assert_eq!(committed["outcome"], "partition-committed");
    assert_eq!(committed["partition"]["name"], "Wheat");
    assert_eq!(committed["partition"]["parentLandId"], land_id.as_str());

    let (_, partitions) = get(&app, &format!("/api/v1/partitions?landId={}", land_id)).await;
    assert_eq!(partitions.as_array().unwrap().len(), 1);

    let (_, collection) = get(&app, "/api/v1/lands/geojson").await;
    assert_eq!(collection["type"], "FeatureCollection");
    assert_eq!(collection["features"].as_array().unwrap().len(), 2);
    assert_eq!(collection["features"][1]["properties"]["kind"], "partition");

    let (_, snapshot) = get(&app, "/api/v1/session").await;
    assert_eq!(snapshot["landCount"], 1);
    assert_eq!(snapshot["partitionCount"], 1);
    assert_eq!(snapshot["state"]["kind"], "idle");
}

#[tokio::test]
async fn test_partition_outside_land_is_rejected() {
    let (app, _) = app();
    set_phase(&app, "land-selection").await;
    let land = draw(&app, &LAND, None).await;
    set_phase(&app, "partitioning").await;

    let rejected = draw(&app, &OUTSIDE, None).await;
    assert_eq!(rejected["outcome"], "rejected");
    assert_eq!(rejected["reason"]["reason"], "outside-parent-land");
    assert_eq!(rejected["reason"]["parentLandId"], land["land"]["id"]);

    let (_, partitions) = get(&app, "/api/v1/partitions").await;
    assert!(partitions.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_selection_change_while_drawing_retargets_partition() {
    let (app, _) = app();
    set_phase(&app, "land-selection").await;
    let first = draw(&app, &LAND, Some("North")).await;
    let second =
        draw(&app, &[[0.02, 0.02], [0.02, 0.03], [0.03, 0.03], [0.03, 0.02]], Some("South")).await;
    let first_id = first["land"]["id"].as_str().unwrap().to_string();
    let second_id = second["land"]["id"].as_str().unwrap().to_string();
    set_phase(&app, "partitioning").await;

    let (_, snapshot) = get(&app, "/api/v1/session").await;
    assert_eq!(snapshot["target"]["landId"], first_id.as_str());

    let (status, _) = send(&app, Method::POST, "/api/v1/session/draw/start", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) =
        send(&app, Method::PUT, "/api/v1/selection", Some(json!({ "landId": second_id }))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, snapshot) = get(&app, "/api/v1/session").await;
    assert_eq!(snapshot["target"]["landId"], second_id.as_str());
    assert_eq!(snapshot["target"]["center"]["lat"], 0.025);

    for [lat, lng] in [[0.022, 0.022], [0.022, 0.024], [0.024, 0.024]] {
        post(&app, "/api/v1/session/draw/click", json!({ "lat": lat, "lng": lng })).await;
    }
    let (_, committed) = post(&app, "/api/v1/session/draw/finish", json!({})).await;
    assert_eq!(committed["outcome"], "partition-committed");
    assert_eq!(committed["partition"]["parentLandId"], second_id.as_str());
}

#[tokio::test]
async fn test_draw_errors_are_conflicts() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::POST, "/api/v1/session/draw/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    set_phase(&app, "partitioning").await;
    let (status, body) = send(&app, Method::POST, "/api/v1/session/draw/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Draw a land before adding partitions");

    let (status, _) = post(&app, "/api/v1/session/draw/finish", json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_two_point_finish_keeps_drawing() {
    let (app, _) = app();
    set_phase(&app, "land-selection").await;

    send(&app, Method::POST, "/api/v1/session/draw/start", None).await;
    post(&app, "/api/v1/session/draw/click", json!({ "lat": 0.0, "lng": 0.0 })).await;
    post(&app, "/api/v1/session/draw/click", json!({ "lat": 0.0, "lng": 1.0 })).await;

    let (_, body) = post(&app, "/api/v1/session/draw/finish", json!({})).await;
    assert_eq!(body, json!({ "outcome": "need-more-points", "have": 2 }));

    let (_, body) = send(&app, Method::POST, "/api/v1/session/draw/undo", None).await;
    assert_eq!(body["preview"]["points"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::POST, "/api/v1/session/draw/cancel", None).await;
    assert_eq!(body["cancelled"], true);

    let (_, lands) = get(&app, "/api/v1/lands").await;
    assert!(lands.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_delete_fields() {
    let (app, _) = app();
    set_phase(&app, "land-selection").await;
    let land = draw(&app, &LAND, None).await;
    let land_id = land["land"]["id"].as_str().unwrap().to_string();
    set_phase(&app, "partitioning").await;
    draw(&app, &INSIDE, None).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/lands/{}", land_id),
        Some(json!({ "name": "  ", "crop": "Wheat" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Land 1");
    assert_eq!(body["crop"], "Wheat");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/lands/land-missing",
        Some(json!({ "crop": "Rice" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Land not found: land-missing");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/lands/{}", land_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, partitions) = get(&app, "/api/v1/partitions").await;
    assert!(partitions.as_array().unwrap().is_empty());

    let (status, _) = get(&app, &format!("/api/v1/lands/{}", land_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_selection_rules() {
    let (app, _) = app();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/selection",
        Some(json!({ "landId": "a", "partitionId": "b" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send(&app, Method::PUT, "/api/v1/selection", Some(json!({ "landId": "ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::PUT, "/api/v1/selection", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["selectedLandId"].is_null());
}

#[tokio::test]
async fn test_location_requires_location_phase() {
    let (app, _) = app();
    set_phase(&app, "dashboard").await;

    let (status, _) =
        post(&app, "/api/v1/session/location", json!({ "lat": 2.0, "lng": 3.0 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_location_is_geocoded_in_background() {
    let (app, _) = app();

    let (status, body) =
        post(&app, "/api/v1/session/location", json!({ "lat": 2.0, "lng": 3.0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "location-chosen");
    assert_eq!(body["lookupPending"], true);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let (_, snapshot) = get(&app, "/api/v1/session").await;
    assert_eq!(snapshot["location"]["address"], "Address near 2.0000, 3.0000");
}

#[tokio::test]
async fn test_stale_geocode_result_is_ignored() {
    let state = state();

    let first = state.session.write().await.click(Coordinate::new(1.0, 1.0));
    let second = state.session.write().await.click(Coordinate::new(5.0, 5.0));
    let ticket = |outcome: ClickOutcome| match outcome {
        ClickOutcome::LocationChosen { ticket, .. } => ticket,
        other => panic!("expected a location pick, got {:?}", other),
    };
    let (slow, fast) = (ticket(first), ticket(second));

    let slow_lookup = spawn_lookup(state.clone(), Coordinate::new(1.0, 1.0), slow);
    let fast_lookup = spawn_lookup(state.clone(), Coordinate::new(5.0, 5.0), fast);

    assert!(fast_lookup.await.unwrap());
    assert!(!slow_lookup.await.unwrap());

    let session = state.session.read().await;
    let location = session.location().current().unwrap();
    assert_eq!(location.coordinate, Coordinate::new(5.0, 5.0));
    assert_eq!(location.address.as_deref(), Some("Address near 5.0000, 5.0000"));
}

#[tokio::test]
async fn test_assistant_chat_uses_fallback() {
    let (app, _) = app();

    let (status, body) = post(
        &app,
        "/api/v1/assistant/chat",
        json!({ "query": "When should I water?", "sessionId": "s-1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "text": "Water in the evening", "source": "fallback" }));

    let (status, _) = post(&app, "/api/v1/assistant/chat", json!({ "query": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
