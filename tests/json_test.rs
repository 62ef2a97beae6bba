mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use adapter_chain::context::{keys, ContextKey};
use adapter_chain::middleware::{adapt, Adapter, JsonToContext};
use common::{counting_post, failing_post, get, json_echo, post_json, request, run};
use hyper::{Method, StatusCode};
use serde_json::{json, Value};

fn ingest(required: &[&str]) -> Adapter {
    Arc::new(JsonToContext::required(required))
}

fn body_json(body: String) -> Value {
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_required_properties_present() {
    let handler = adapt(json_echo(), &[ingest(&["a", "b"])]);

    let w = run(&handler, post_json("/", r#"{"a":1,"b":2}"#)).await;

    assert_eq!(w.status(), StatusCode::OK);
    assert_eq!(body_json(w.body_string()), json!({"a": 1, "b": 2}));
}

#[tokio::test]
async fn test_missing_required_property() {
    let handler = adapt(json_echo(), &[ingest(&["a", "b"])]);

    let w = run(&handler, post_json("/", r#"{"a":1}"#)).await;

    assert_eq!(w.status(), StatusCode::BAD_REQUEST);
    assert_eq!(w.body_string(), "Missing required JSON property=b\n");
}

#[tokio::test]
async fn test_second_ingestion_does_not_reread_body() {
    let handler = adapt(json_echo(), &[ingest(&["a"]), ingest(&["a", "b"])]);
    let (req, reads) = counting_post("/", r#"{"a":1,"b":2}"#);

    let w = run(&handler, req).await;

    assert_eq!(w.status(), StatusCode::OK);
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_second_ingestion_revalidates_cached_map() {
    let handler = adapt(json_echo(), &[ingest(&["a"]), ingest(&["c"])]);
    let (req, reads) = counting_post("/", r#"{"a":1,"b":2}"#);

    let w = run(&handler, req).await;

    assert_eq!(w.status(), StatusCode::BAD_REQUEST);
    assert_eq!(w.body_string(), "Missing required JSON property=c\n");
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_reset_reparses_from_cached_body() {
    const OTHER: ContextKey = ContextKey::new("otherJson");
    let adapters: Vec<Adapter> = vec![
        ingest(&["a"]),
        Arc::new(JsonToContext::new(keys::REQUEST_JSON, true, &["b"])),
        Arc::new(JsonToContext::new(OTHER, false, &[])),
    ];
    let handler = adapt(json_echo(), &adapters);
    let (req, reads) = counting_post("/", r#"{"a":1,"b":2}"#);

    let w = run(&handler, req).await;

    assert_eq!(w.status(), StatusCode::OK);
    assert_eq!(body_json(w.body_string()), json!({"a": 1, "b": 2}));
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_collects_query_parameters() {
    let handler = adapt(json_echo(), &[ingest(&["id"])]);

    let w = run(&handler, get("/items?id=42")).await;
    assert_eq!(w.status(), StatusCode::OK);
    assert_eq!(body_json(w.body_string()), json!({"id": "42"}));

    let w = run(&handler, get("/items")).await;
    assert_eq!(w.status(), StatusCode::BAD_REQUEST);
    assert_eq!(w.body_string(), "Missing required url parameter=id\n");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    for required in [&["a"][..], &[][..]] {
        let handler = adapt(json_echo(), &[ingest(required)]);

        let w = run(&handler, post_json("/", "{not json")).await;

        assert_eq!(w.status(), StatusCode::BAD_REQUEST);
        assert!(w.body_string().starts_with("error parsing json err="));
    }
}

#[tokio::test]
async fn test_trailing_data_after_object_is_ignored() {
    let handler = adapt(json_echo(), &[ingest(&["a"])]);

    let w = run(&handler, post_json("/", r#"{"a":1} x"#)).await;

    assert_eq!(w.status(), StatusCode::OK);
    assert_eq!(body_json(w.body_string()), json!({"a": 1}));
}

#[tokio::test]
async fn test_whitespace_body_is_malformed() {
    let handler = adapt(json_echo(), &[ingest(&[])]);

    let w = run(&handler, post_json("/", "  \n")).await;

    assert_eq!(w.status(), StatusCode::BAD_REQUEST);
    assert_eq!(w.body_string(), "error parsing json err=EOF\n");
}

#[tokio::test]
async fn test_json_array_is_not_an_object() {
    let handler = adapt(json_echo(), &[ingest(&[])]);

    let w = run(&handler, post_json("/", "[1,2,3]")).await;

    assert_eq!(w.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_body_policy() {
    let strict = adapt(json_echo(), &[ingest(&["a"])]);
    let w = run(&strict, post_json("/", "")).await;
    assert_eq!(w.status(), StatusCode::BAD_REQUEST);
    assert_eq!(w.body_string(), "Please send a request body\n");

    let lenient = adapt(json_echo(), &[ingest(&[])]);
    let w = run(&lenient, post_json("/", "")).await;
    assert_eq!(w.status(), StatusCode::OK);
    assert_eq!(w.body_string(), "{}");
}

#[tokio::test]
async fn test_body_read_failure_policy() {
    let strict = adapt(json_echo(), &[ingest(&["a"])]);
    let w = run(&strict, failing_post("/")).await;
    assert_eq!(w.status(), StatusCode::BAD_REQUEST);
    assert!(w.body_string().starts_with("Error getting request body err="));

    let lenient = adapt(json_echo(), &[ingest(&[])]);
    let w = run(&lenient, failing_post("/")).await;
    assert_eq!(w.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_other_methods_are_not_parsed() {
    let handler = adapt(json_echo(), &[ingest(&["a"])]);

    let w = run(&handler, request(Method::DELETE, "/", None, r#"{"b":1}"#)).await;

    assert_eq!(w.status(), StatusCode::OK);
    assert_eq!(w.body_string(), "{}");
}

#[tokio::test]
async fn test_existing_value_of_other_type_is_internal_error() {
    let handler = adapt(json_echo(), &[ingest(&["a"])]);
    let req = post_json("/", r#"{"a":1}"#).with_value(keys::REQUEST_JSON, "not a map");

    let w = run(&handler, req).await;

    assert_eq!(w.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
