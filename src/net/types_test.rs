use super::*;

// =============================================================
// RecordId
// =============================================================

#[test]
fn record_id_accepts_numbers_and_strings() {
    let int: RecordId = serde_json::from_str("42").unwrap();
    let text: RecordId = serde_json::from_str("\"65f0c1\"").unwrap();
    assert_eq!(int, RecordId::Int(42));
    assert_eq!(text, RecordId::Text("65f0c1".to_owned()));
    assert_eq!(int.to_string(), "42");
    assert_eq!(text.to_string(), "65f0c1");
}

// =============================================================
// User
// =============================================================

#[test]
fn user_decode_drops_echoed_password() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 7,
        "email": "a@b.com",
        "password": "secret1",
        "name": "Ann",
        "avatar": "https://img.test/a.png",
        "role": "customer",
        "creationAt": "2024-01-01T00:00:00.000Z"
    }))
    .unwrap();
    assert_eq!(user.id, RecordId::Int(7));
    assert_eq!(user.role, CUSTOMER_ROLE);

    let cached = serde_json::to_value(&user).unwrap();
    assert!(cached.get("password").is_none());
}

#[test]
fn new_user_serializes_without_confirmation() {
    let body = serde_json::to_value(NewUser {
        email: "a@b.com".to_owned(),
        password: "secret1".to_owned(),
        name: "Ann".to_owned(),
        avatar: String::new(),
        role: CUSTOMER_ROLE.to_owned(),
    })
    .unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "email": "a@b.com",
            "password": "secret1",
            "name": "Ann",
            "avatar": "",
            "role": "customer"
        })
    );
}

// =============================================================
// Product
// =============================================================

#[test]
fn product_price_accepts_number_or_numeric_string() {
    let a: Product = serde_json::from_str(r#"{"id":1,"name":"X","price":9.99,"description":"d"}"#).unwrap();
    let b: Product = serde_json::from_str(r#"{"id":"p2","name":"Y","price":"4.50","description":"d"}"#).unwrap();
    assert!((a.price - 9.99).abs() < f64::EPSILON);
    assert!((b.price - 4.5).abs() < f64::EPSILON);
}

#[test]
fn product_price_rejects_non_numeric() {
    let result = serde_json::from_str::<Product>(r#"{"id":1,"name":"X","price":"cheap","description":"d"}"#);
    assert!(result.is_err());
}

#[test]
fn product_description_defaults_to_empty() {
    let p: Product = serde_json::from_str(r#"{"id":1,"name":"X","price":1}"#).unwrap();
    assert_eq!(p.description, "");
}

#[test]
fn new_product_price_serializes_as_number() {
    let body = serde_json::to_value(NewProduct {
        name: "X".to_owned(),
        price: 9.99,
        description: "d".to_owned(),
    })
    .unwrap();
    assert_eq!(body["price"], serde_json::json!(9.99));
    assert!(body["price"].is_number());
}

// =============================================================
// LoginResponse
// =============================================================

#[test]
fn login_response_tolerates_missing_token() {
    let resp: LoginResponse = serde_json::from_str("{}").unwrap();
    assert!(resp.access_token.is_none());

    let resp: LoginResponse = serde_json::from_str(r#"{"access_token":"abc","refresh_token":"r"}"#).unwrap();
    assert_eq!(resp.access_token.as_deref(), Some("abc"));
}

#[test]
fn login_response_ignores_refresh_token() {
    let resp: LoginResponse = serde_json::from_str(r#"{"refresh_token":"r"}"#).unwrap();
    assert_eq!(resp, LoginResponse::default());
}

// =============================================================
// error_message
// =============================================================

#[test]
fn error_message_reads_string_message() {
    assert_eq!(error_message(r#"{"message":"Unauthorized","statusCode":401}"#).as_deref(), Some("Unauthorized"));
}

#[test]
fn error_message_joins_message_list() {
    assert_eq!(
        error_message(r#"{"message":["email must be an email","avatar must be a URL address"]}"#).as_deref(),
        Some("email must be an email; avatar must be a URL address")
    );
}

#[test]
fn error_message_is_none_for_missing_blank_or_invalid_body() {
    assert_eq!(error_message("{}"), None);
    assert_eq!(error_message(r#"{"message":"   "}"#), None);
    assert_eq!(error_message(r#"{"message":42}"#), None);
    assert_eq!(error_message("<html>bad gateway</html>"), None);
}
