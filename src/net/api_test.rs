use std::cell::RefCell;

use serde::Deserialize;
use serde_json::json;

use super::*;

/// Replays one canned outcome and records what it was asked to send.
struct ScriptedTransport {
    outcome: Result<HttpResponse, ApiError>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn respond(status: u16, body: &str) -> Self {
        Self { outcome: Ok(HttpResponse { status, body: body.to_owned() }), sent: RefCell::default() }
    }

    fn fail(err: ApiError) -> Self {
        Self { outcome: Err(err), sent: RefCell::default() }
    }

    fn last_request(&self) -> HttpRequest {
        self.sent.borrow().last().cloned().unwrap()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.outcome.clone()
    }
}

// =============================================================
// merge_headers / build_request
// =============================================================

#[test]
fn merge_headers_defaults_to_json_content_type() {
    assert_eq!(merge_headers(&[]), vec![("Content-Type".to_owned(), "application/json".to_owned())]);
}

#[test]
fn merge_headers_caller_wins_case_insensitively() {
    let merged = merge_headers(&[
        ("content-type".to_owned(), "text/plain".to_owned()),
        ("X-Requested-With".to_owned(), "fetch".to_owned()),
    ]);
    assert_eq!(
        merged,
        vec![
            ("content-type".to_owned(), "text/plain".to_owned()),
            ("X-Requested-With".to_owned(), "fetch".to_owned()),
        ]
    );
}

#[test]
fn build_request_serialises_body() {
    let req = build_request("/api/events", RequestOptions::post(json!({"title": "Meetup"})));
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "/api/events");
    assert_eq!(req.body.as_deref(), Some(r#"{"title":"Meetup"}"#));
}

#[test]
fn request_options_builder_accumulates() {
    let opts = RequestOptions::get().method(Method::Delete).header("X-A", "1").body(json!(null));
    assert_eq!(opts.method, Method::Delete);
    assert_eq!(opts.headers, vec![("X-A".to_owned(), "1".to_owned())]);
    assert_eq!(opts.body, Some(Value::Null));
}

// =============================================================
// error_message / HttpResponse
// =============================================================

#[test]
fn error_message_prefers_body_error_string() {
    assert_eq!(error_message(&json!({"error": "Event is full"})), "Event is full");
    assert_eq!(error_message(&json!({"message": "nope"})), "Request failed");
    assert_eq!(error_message(&json!({"error": 42})), "Request failed");
    assert_eq!(error_message(&json!([1, 2])), "Request failed");
}

#[test]
fn response_ok_matches_fetch_rule() {
    assert!(HttpResponse { status: 200, body: String::new() }.ok());
    assert!(HttpResponse { status: 204, body: String::new() }.ok());
    assert!(!HttpResponse { status: 302, body: String::new() }.ok());
    assert!(!HttpResponse { status: 404, body: String::new() }.ok());
}

// =============================================================
// api_request
// =============================================================

#[tokio::test]
async fn success_returns_parsed_body() {
    let transport = ScriptedTransport::respond(200, r#"{"x":1}"#);
    let data = api_request(&transport, "/api/x", RequestOptions::get()).await.unwrap();
    assert_eq!(data, json!({"x": 1}));

    let sent = transport.last_request();
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.headers[0], ("Content-Type".to_owned(), "application/json".to_owned()));
}

#[tokio::test]
async fn failure_status_uses_body_error() {
    let transport = ScriptedTransport::respond(400, r#"{"error":"bad"}"#);
    let err = api_request(&transport, "/api/x", RequestOptions::get()).await.unwrap_err();
    assert_eq!(err.to_string(), "bad");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn failure_status_without_error_field_is_generic() {
    let transport = ScriptedTransport::respond(500, "{}");
    let err = api_request(&transport, "/api/x", RequestOptions::get()).await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 500, message: "Request failed".to_owned() });
}

#[tokio::test]
async fn non_json_body_is_decode_error_even_on_success() {
    let transport = ScriptedTransport::respond(200, "<html>oops</html>");
    let err = api_request(&transport, "/api/x", RequestOptions::get()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn non_json_error_body_is_decode_error() {
    let transport = ScriptedTransport::respond(502, "Bad Gateway");
    let err = api_request(&transport, "/api/x", RequestOptions::get()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn transport_error_is_propagated() {
    let transport = ScriptedTransport::fail(ApiError::Transport("offline".to_owned()));
    let err = api_request(&transport, "/api/x", RequestOptions::get()).await.unwrap_err();
    assert_eq!(err, ApiError::Transport("offline".to_owned()));
}

#[tokio::test]
async fn works_through_trait_object() {
    let transport = ScriptedTransport::respond(201, r#"{"id":7}"#);
    let dyn_transport: &dyn Transport = &transport;
    let data = api_request(dyn_transport, "/api/events", RequestOptions::post(json!({}))).await.unwrap();
    assert_eq!(data["id"], 7);
}

#[derive(Debug, Deserialize, PartialEq)]
struct Created {
    id: u32,
}

#[tokio::test]
async fn typed_request_decodes_into_struct() {
    let transport = ScriptedTransport::respond(200, r#"{"id":3}"#);
    let created: Created = api_request_as(&transport, "/api/events", RequestOptions::get()).await.unwrap();
    assert_eq!(created, Created { id: 3 });
}

#[tokio::test]
async fn typed_request_reports_shape_mismatch() {
    let transport = ScriptedTransport::respond(200, r#"{"id":"three"}"#);
    let err = api_request_as::<Created, _>(&transport, "/api/events", RequestOptions::get()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
