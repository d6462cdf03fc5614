//! Protocol-level tests for the WebDriver session client against a mock
//! HTTP server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cvfill_driver::{DriverError, Session};

async fn attached_session(server: &MockServer) -> Session {
    Session::attach(&server.uri(), "sess-1", 5).expect("client should build")
}

#[tokio::test]
async fn start_parses_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": { "sessionId": "abc-123", "capabilities": {} }
        })))
        .mount(&server)
        .await;

    let session = Session::start(&server.uri(), 5).await.unwrap();
    assert_eq!(session.session_id(), "abc-123");
}

#[tokio::test]
async fn current_url_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/sess-1/url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": "https://jobs.lever.co/acme/1/apply"
        })))
        .mount(&server)
        .await;

    let session = attached_session(&server).await;
    let url = session.current_url().await.unwrap();
    assert_eq!(url, "https://jobs.lever.co/acme/1/apply");

    let loc = session.page_location().await.unwrap();
    assert_eq!(loc.hostname, "jobs.lever.co");
    assert_eq!(loc.path, "/acme/1/apply");
}

#[tokio::test]
async fn find_returns_element_reference() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/sess-1/element"))
        .and(body_partial_json(json!({
            "using": "css selector",
            "value": "input#first_name"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": { "element-6066-11e4-a52e-4f735466cecf": "el-9" }
        })))
        .mount(&server)
        .await;

    let session = attached_session(&server).await;
    let element = session.find("input#first_name").await.unwrap().unwrap();
    assert_eq!(element.id(), "el-9");
}

#[tokio::test]
async fn find_maps_no_such_element_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/sess-1/element"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "value": {
                "error": "no such element",
                "message": "Unable to locate element"
            }
        })))
        .mount(&server)
        .await;

    let session = attached_session(&server).await;
    let found = session.find("input#missing").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn other_webdriver_errors_are_typed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/sess-1/element"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "value": {
                "error": "invalid selector",
                "message": "bad css"
            }
        })))
        .mount(&server)
        .await;

    let session = attached_session(&server).await;
    let result = session.find("((").await;
    assert!(
        matches!(result, Err(DriverError::WebDriver { ref error, .. }) if error == "invalid selector"),
        "expected WebDriver(invalid selector), got: {result:?}"
    );
}

#[tokio::test]
async fn non_json_error_body_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/sess-1/url"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let session = attached_session(&server).await;
    let result = session.current_url().await;
    assert!(
        matches!(result, Err(DriverError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn find_all_collects_references_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/sess-1/elements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                { "element-6066-11e4-a52e-4f735466cecf": "el-1" },
                { "element-6066-11e4-a52e-4f735466cecf": "el-2" }
            ]
        })))
        .mount(&server)
        .await;

    let session = attached_session(&server).await;
    let elements = session.find_all("input").await.unwrap();
    let ids: Vec<&str> = elements.iter().map(cvfill_driver::Element::id).collect();
    assert_eq!(ids, vec!["el-1", "el-2"]);
}

#[tokio::test]
async fn click_posts_to_element_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/sess-1/element/el-5/click"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/session/sess-1/element"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": { "element-6066-11e4-a52e-4f735466cecf": "el-5" }
        })))
        .mount(&server)
        .await;

    let session = attached_session(&server).await;
    let element = session.find("button").await.unwrap().unwrap();
    session.click(&element).await.unwrap();
}

#[tokio::test]
async fn fill_field_runs_write_and_event_sequence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/sess-1/element"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": { "element-6066-11e4-a52e-4f735466cecf": "el-7" }
        })))
        .mount(&server)
        .await;
    // focus, native write, change, blur
    Mock::given(method("POST"))
        .and(path("/session/sess-1/execute/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
        .expect(4)
        .mount(&server)
        .await;

    let session = attached_session(&server).await;
    let element = session.find("input#email").await.unwrap().unwrap();
    session.fill_field(&element, "anna@example.com").await.unwrap();
}

#[tokio::test]
async fn storage_helpers_round_trip_strings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/sess-1/execute/sync"))
        .and(body_partial_json(json!({ "args": ["cvfill_form_filled"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": "filled" })))
        .mount(&server)
        .await;

    let session = attached_session(&server).await;
    let stored = session.session_storage_get("cvfill_form_filled").await.unwrap();
    assert_eq!(stored.as_deref(), Some("filled"));
}
