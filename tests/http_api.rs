// HTTP surface tests: a real server on 127.0.0.1:0 driven with reqwest.

mod helpers;

use helpers::{create_schemaless_state, create_test_state, seed_route, TestServer};
use lead_relay::storage::count_lead_audits;
use lead_relay::IntakeFormat;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn post_lead(server: &TestServer, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(server.url("/lead"))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .expect("request should reach the server")
}

/// A CMS that fails the test if it is ever called.
async fn untouchable_cms() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_success_passes_cms_status_and_body_through() {
    let mock_server = MockServer::start().await;
    let cms_body = r#"{"code":"201","leadReference":"L123","status":"Created","message":"ok"}"#;
    Mock::given(method("POST"))
        .and(path("/leads"))
        .respond_with(ResponseTemplate::new(201).set_body_raw(cms_body, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (state, _dir) =
        create_test_state(format!("{}/leads", mock_server.uri()), IntakeFormat::Flat).await;
    seed_route(&state.pipeline.pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;
    let server = TestServer::start(state).await;

    let response = post_lead(
        &server,
        r#"{"Source":"WEB","Dealership":"ABC Motors","Our cars":"Used vehicles"}"#,
    )
    .await;
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(response.text().await.unwrap(), cms_body);

    server.stop().await;
}

#[tokio::test]
async fn test_cms_rejection_status_is_passed_through() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "missing contact"})),
        )
        .mount(&mock_server)
        .await;

    let (state, _dir) =
        create_test_state(format!("{}/leads", mock_server.uri()), IntakeFormat::Flat).await;
    seed_route(&state.pipeline.pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;
    let server = TestServer::start(state).await;

    let response = post_lead(&server, r#"{"Source":"WEB","Dealership":"ABC Motors"}"#).await;
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "missing contact");

    server.stop().await;
}

#[tokio::test]
async fn test_cms_rejection_with_null_reference_is_passed_through() {
    let mock_server = MockServer::start().await;
    let cms_body =
        r#"{"code":"400","leadReference":null,"status":"error","message":"duplicate lead"}"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(cms_body, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (state, _dir) =
        create_test_state(format!("{}/leads", mock_server.uri()), IntakeFormat::Flat).await;
    seed_route(&state.pipeline.pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;
    let server = TestServer::start(state).await;

    let response = post_lead(&server, r#"{"Source":"WEB","Dealership":"ABC Motors"}"#).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.text().await.unwrap(), cms_body);

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_json_is_rejected_before_any_lookup() {
    let mock_server = untouchable_cms().await;
    // Any directory lookup against this state would fail with a 500
    let state = create_schemaless_state(format!("{}/leads", mock_server.uri())).await;
    let stats = state.pipeline.stats.clone();
    let server = TestServer::start(state).await;

    let response = post_lead(&server, r#"{"Source":"WEB","Dealership":"#).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "validation_error");
    assert_eq!(
        stats.get_count(lead_relay::OutcomeType::RejectedInvalidPayload),
        1
    );

    // Well-formed input does reach the directory, which is what fails here
    let response = post_lead(&server, r#"{"Source":"WEB","Dealership":"ABC Motors"}"#).await;
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "directory_error");

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_dealer_is_client_error_without_side_effects() {
    let mock_server = untouchable_cms().await;
    let (state, _dir) =
        create_test_state(format!("{}/leads", mock_server.uri()), IntakeFormat::Flat).await;
    seed_route(&state.pipeline.pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;
    let pool = state.pipeline.pool.clone();
    let server = TestServer::start(state).await;

    // Right source, wrong dealership
    let response = post_lead(&server, r#"{"Source":"WEB","Dealership":"XYZ Motors"}"#).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "dealer_not_found");
    assert!(body["error"].as_str().unwrap().contains("XYZ Motors"));

    server.stop().await;
    assert_eq!(count_lead_audits(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_bad_appointment_is_client_error() {
    let mock_server = untouchable_cms().await;
    let (state, _dir) =
        create_test_state(format!("{}/leads", mock_server.uri()), IntakeFormat::Flat).await;
    seed_route(&state.pipeline.pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;
    let server = TestServer::start(state).await;

    let response = post_lead(
        &server,
        r#"{"Source":"WEB","Dealership":"ABC Motors","Appointment date":"2024-12-25","Appointment time":"2:00pm - 3:00pm"}"#,
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "appointment_parse_error");

    // The service is still up
    let status = reqwest::get(server.url("/status")).await.unwrap();
    assert_eq!(status.status().as_u16(), 200);

    server.stop().await;
}

#[tokio::test]
async fn test_undecodable_cms_response_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let (state, _dir) =
        create_test_state(format!("{}/leads", mock_server.uri()), IntakeFormat::Flat).await;
    seed_route(&state.pipeline.pool, "WEB", "ABC Motors", "D1", "F1", "F2").await;
    let pool = state.pipeline.pool.clone();
    let server = TestServer::start(state).await;

    let response = post_lead(&server, r#"{"Source":"WEB","Dealership":"ABC Motors"}"#).await;
    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "response_decode_error");

    server.stop().await;
    assert_eq!(count_lead_audits(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_status_reports_outcome_counters() {
    let mock_server = untouchable_cms().await;
    let (state, _dir) =
        create_test_state(format!("{}/leads", mock_server.uri()), IntakeFormat::Wrapped).await;
    let server = TestServer::start(state).await;

    post_lead(&server, "not json").await;
    post_lead(&server, r#"{"source":"WEB","fields":{"Dealership":"Nobody"}}"#).await;

    let status: Value = reqwest::get(server.url("/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["total_processed"], 2);
    assert_eq!(status["outcomes"]["rejected_invalid_payload"], 1);
    assert_eq!(status["outcomes"]["rejected_no_dealer"], 1);
    assert_eq!(status["outcomes"]["forwarded"], 0);

    server.stop().await;
}
