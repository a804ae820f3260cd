use super::*;

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse { status, content_type: Some("application/json".to_owned()), body: body.to_owned() }
}

#[test]
fn is_success_covers_2xx_only() {
    assert!(response(200, "").is_success());
    assert!(response(201, "").is_success());
    assert!(response(299, "").is_success());
    assert!(!response(199, "").is_success());
    assert!(!response(301, "").is_success());
    assert!(!response(401, "").is_success());
    assert!(!response(500, "").is_success());
}

#[test]
fn json_decodes_body() {
    let value: serde_json::Value = response(200, r#"{"ok":true}"#).json().unwrap();
    assert_eq!(value, serde_json::json!({ "ok": true }));
}

#[test]
fn json_reports_malformed_body() {
    assert!(response(200, "not json").json::<serde_json::Value>().is_err());
}

#[test]
fn request_builders_set_method_and_body() {
    let get = HttpRequest::get("https://a.test/x");
    assert_eq!(get.method, HttpMethod::Get);
    assert!(get.body.is_none());
    assert!(get.bearer.is_none());

    let post = HttpRequest::post_json("https://a.test/y", serde_json::json!({ "k": 1 }))
        .with_bearer(Some("tok".to_owned()));
    assert_eq!(post.method, HttpMethod::Post);
    assert_eq!(post.body, Some(serde_json::json!({ "k": 1 })));
    assert_eq!(post.bearer.as_deref(), Some("tok"));
}

#[test]
fn bearer_header_formats_token() {
    assert_eq!(bearer_header("abc"), "Bearer abc");
}

#[tokio::test]
async fn offline_transport_is_unavailable() {
    let err = OfflineTransport.send(HttpRequest::get("https://a.test")).await.unwrap_err();
    assert_eq!(err, TransportError::Unavailable);
}
