//! End-to-end pipeline tests against a local mock server.
//!
//! These cover the full cycle: pre-request scripting, variable resolution,
//! auth compilation, query encoding, dispatch, and outcome capture.

use request_pilot::classifier::{classify_body, BodyFormat};
use request_pilot::models::{BodyKind, HttpMethod, RequestDefinition, RequestOutcome};
use request_pilot::pipeline::execute;
use request_pilot::{ApiKeyPlacement, AuthConfig};
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn vars(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn get_with_variables_query_and_cookies() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("q", "hello world"))
        .respond_with(
            // set_body_string would force a text/plain content-type in
            // wiremock 0.6, overriding insert_header; set_body_raw carries
            // the intended mime through.
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"items":[]}"#.as_bytes(), "application/json")
                .insert_header("set-cookie", "session=s1; Path=/"),
        )
        .mount(&server)
        .await;

    let mut definition = RequestDefinition::new(HttpMethod::GET, "{{base}}/items");
    definition.add_query_param("q", "hello world");

    let outcome = execute(&definition, vars(&[("base", &server.uri())]), None).await;

    match outcome {
        RequestOutcome::Success {
            status_code,
            status_text,
            headers,
            cookies,
            body,
            duration_ms: _,
            size,
        } => {
            assert_eq!(status_code, 200);
            assert_eq!(status_text, "OK");
            assert_eq!(body, r#"{"items":[]}"#);
            assert_eq!(size, body.len());
            assert_eq!(
                headers.get("content-type").map(String::as_str),
                Some("application/json")
            );
            assert_eq!(cookies, "session=s1; Path=/");
            assert_eq!(classify_body(&body), BodyFormat::Json);
        }
        RequestOutcome::Failure { error, .. } => panic!("expected success, got: {}", error),
    }
}

#[tokio::test]
async fn multiple_set_cookie_values_are_joined() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("ok")
                .append_header("set-cookie", "a=1; Path=/")
                .append_header("set-cookie", "b=2; HttpOnly"),
        )
        .mount(&server)
        .await;

    let definition = RequestDefinition::new(HttpMethod::GET, format!("{}/login", server.uri()));
    let outcome = execute(&definition, HashMap::new(), None).await;

    match outcome {
        RequestOutcome::Success { cookies, .. } => {
            assert_eq!(cookies, "a=1; Path=/, b=2; HttpOnly");
        }
        RequestOutcome::Failure { error, .. } => panic!("expected success, got: {}", error),
    }
}

#[tokio::test]
async fn post_json_defaults_content_type_and_resolves_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"name":"ada"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&server)
        .await;

    let mut definition = RequestDefinition::new(HttpMethod::POST, format!("{}/users", server.uri()));
    definition.set_body(r#"{"name":"{{name}}"}"#, BodyKind::Json);

    let outcome = execute(&definition, vars(&[("name", "ada")]), None).await;

    match outcome {
        RequestOutcome::Success {
            status_code,
            status_text,
            ..
        } => {
            assert_eq!(status_code, 201);
            assert_eq!(status_text, "Created");
        }
        RequestOutcome::Failure { error, .. } => panic!("expected success, got: {}", error),
    }
}

#[tokio::test]
async fn pre_request_script_feeds_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let mut definition =
        RequestDefinition::new(HttpMethod::GET, format!("{}/private", server.uri()));
    definition.auth = AuthConfig::Bearer {
        token: "{{token}}".to_string(),
    };
    definition.pre_request_script = "pm.environment.set('token', 'abc123');".to_string();

    let outcome = execute(&definition, HashMap::new(), None).await;
    assert!(outcome.is_success(), "got: {:?}", outcome);
}

#[tokio::test]
async fn api_key_query_auth_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("api_key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let mut definition = RequestDefinition::new(HttpMethod::GET, format!("{}/data", server.uri()));
    definition.auth = AuthConfig::ApiKey {
        name: "api_key".to_string(),
        value: "secret".to_string(),
        placement: ApiKeyPlacement::Query,
    };

    let outcome = execute(&definition, HashMap::new(), None).await;
    assert!(outcome.is_success(), "got: {:?}", outcome);
}

#[tokio::test]
async fn non_2xx_status_is_still_a_success_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let definition = RequestDefinition::new(HttpMethod::GET, format!("{}/missing", server.uri()));
    let outcome = execute(&definition, HashMap::new(), None).await;

    match outcome {
        RequestOutcome::Success {
            status_code,
            status_text,
            body,
            ..
        } => {
            assert_eq!(status_code, 404);
            assert_eq!(status_text, "Not Found");
            assert_eq!(body, "nope");
        }
        RequestOutcome::Failure { error, .. } => panic!("expected success, got: {}", error),
    }
}

#[tokio::test]
async fn script_error_short_circuits_without_dispatch() {
    let server = MockServer::start().await;
    // No mocks mounted: a dispatched request would 404 against wiremock, but
    // a failing script must never reach the network at all.

    let mut definition = RequestDefinition::new(HttpMethod::GET, server.uri());
    definition.pre_request_script =
        "pm.environment.set('x', '1'); throw new Error('boom');".to_string();

    let outcome = execute(&definition, HashMap::new(), None).await;
    match outcome {
        RequestOutcome::Failure { error, duration_ms } => {
            assert!(error.starts_with("Pre-request script error:"));
            assert!(error.contains("boom"));
            assert!(duration_ms < 5_000);
        }
        RequestOutcome::Success { .. } => panic!("expected failure"),
    }

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn timeout_is_bounded_and_distinguishable() {
    init_logging();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let definition = RequestDefinition::new(HttpMethod::GET, format!("{}/slow", server.uri()));
    let outcome = execute(
        &definition,
        HashMap::new(),
        Some(Duration::from_millis(50)),
    )
    .await;

    match outcome {
        RequestOutcome::Failure { error, duration_ms } => {
            assert!(error.contains("timed out"), "got: {}", error);
            assert!(duration_ms >= 40, "duration was {} ms", duration_ms);
            assert!(duration_ms < 2_000, "duration was {} ms", duration_ms);
        }
        RequestOutcome::Success { .. } => panic!("expected timeout failure"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_yields_failure() {
    // Nothing listens on the discard port.
    let definition = RequestDefinition::new(HttpMethod::GET, "http://127.0.0.1:9/");
    let outcome = execute(
        &definition,
        HashMap::new(),
        Some(Duration::from_secs(5)),
    )
    .await;

    match outcome {
        RequestOutcome::Failure { error, .. } => assert!(!error.is_empty()),
        RequestOutcome::Success { .. } => panic!("expected failure"),
    }
}

#[tokio::test]
async fn malformed_url_surfaces_as_dispatch_failure() {
    let definition = RequestDefinition::new(HttpMethod::GET, "not a url");
    let outcome = execute(&definition, HashMap::new(), None).await;
    assert!(!outcome.is_success());
}
