use super::*;
use crate::net::stub::StubTransport;
use crate::net::transport::HttpMethod;
use crate::net::types::RecordId;
use crate::session::MemoryStorage;

fn auth_client(transport: StubTransport) -> (AuthClient<StubTransport, MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let session = SessionStore::new(storage.clone());
    (AuthClient::new(transport, session, ApiConfig::default()), storage)
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials { email: email.to_owned(), password: password.to_owned() }
}

fn registration(avatar: &str) -> RegistrationForm {
    RegistrationForm {
        email: "new@shop.test".to_owned(),
        password: "secret1".to_owned(),
        repassword: "secret1".to_owned(),
        name: "Neo".to_owned(),
        avatar: avatar.to_owned(),
    }
}

fn user_json(id: i64, email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "email": email,
        "password": "secret1",
        "name": "Neo",
        "avatar": "",
        "role": "customer"
    })
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_success_persists_token() {
    let transport = StubTransport::new().respond_json(201, serde_json::json!({ "access_token": "abc", "refresh_token": "r" }));
    let (client, storage) = auth_client(transport);

    let token = client.login(&credentials("a@b.com", "secret1")).await.unwrap();

    assert_eq!(token, "abc");
    assert_eq!(SessionStore::new(storage).get_token().as_deref(), Some("abc"));
}

#[tokio::test]
async fn login_posts_credentials_as_json() {
    let transport = StubTransport::new().respond_json(201, serde_json::json!({ "access_token": "abc" }));
    let (client, _) = auth_client(transport);

    client.login(&credentials("a@b.com", "secret1")).await.unwrap();

    let requests = client.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, "https://api.escuelajs.co/api/v1/auth/login");
    assert_eq!(
        requests[0].body,
        Some(serde_json::json!({ "email": "a@b.com", "password": "secret1" }))
    );
}

#[tokio::test]
async fn login_401_surfaces_server_message_and_stores_nothing() {
    let transport = StubTransport::new().respond_json(401, serde_json::json!({ "message": "Unauthorized", "statusCode": 401 }));
    let (client, storage) = auth_client(transport);

    let err = client.login(&credentials("a@b.com", "secret1")).await.unwrap_err();

    assert_eq!(err.to_string(), "Unauthorized");
    assert_eq!(err, AuthError::Rejected { status: 401, message: "Unauthorized".to_owned() });
    assert_eq!(storage.get(crate::session::TOKEN_KEY), None);
}

#[tokio::test]
async fn login_rejection_without_message_uses_fallback() {
    let transport = StubTransport::new().respond(500, Some("text/html"), "<h1>oops</h1>");
    let (client, _) = auth_client(transport);

    let err = client.login(&credentials("a@b.com", "secret1")).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[tokio::test]
async fn login_success_without_token_is_logical_failure() {
    let transport = StubTransport::new().respond_json(201, serde_json::json!({ "refresh_token": "r" }));
    let (client, storage) = auth_client(transport);

    let err = client.login(&credentials("a@b.com", "secret1")).await.unwrap_err();

    assert_eq!(err, AuthError::MissingToken);
    assert_eq!(err.to_string(), "Invalid login credentials");
    assert_eq!(storage.get(crate::session::TOKEN_KEY), None);
}

#[tokio::test]
async fn login_success_with_empty_token_is_logical_failure() {
    let transport = StubTransport::new().respond_json(200, serde_json::json!({ "access_token": "" }));
    let (client, _) = auth_client(transport);

    assert_eq!(client.login(&credentials("a@b.com", "secret1")).await, Err(AuthError::MissingToken));
}

#[tokio::test]
async fn login_invalid_input_skips_network() {
    let (client, _) = auth_client(StubTransport::new());

    let err = client.login(&credentials("a@b.com", "abc")).await.unwrap_err();

    assert_eq!(err, AuthError::Invalid(ValidationError::PasswordTooShort));
    assert!(client.transport.requests().is_empty());
}

#[tokio::test]
async fn login_transport_failure_is_generic() {
    let transport = StubTransport::new().fail(TransportError::Network("connection reset".to_owned()));
    let (client, _) = auth_client(transport);

    let err = client.login(&credentials("a@b.com", "secret1")).await.unwrap_err();

    assert!(matches!(err, AuthError::Transport(_)));
    assert_eq!(err.to_string(), "Something went wrong. Please try again later.");
}

/// Storage that refuses every write.
struct ReadOnlyStorage;

impl KeyValueStore for ReadOnlyStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[tokio::test]
async fn login_storage_failure_returns_no_token() {
    let transport = StubTransport::new().respond_json(201, serde_json::json!({ "access_token": "abc" }));
    let client = AuthClient::new(transport, SessionStore::new(ReadOnlyStorage), ApiConfig::default());

    let result = client.login(&credentials("a@b.com", "secret1")).await;

    assert_eq!(result, Err(AuthError::Storage(StorageError::Unavailable)));
    assert!(client.session().get_token().is_none());
}

// =============================================================
// register
// =============================================================

#[tokio::test]
async fn register_sends_fixed_role_without_confirmation() {
    let transport = StubTransport::new().respond_json(201, user_json(9, "new@shop.test"));
    let (client, _) = auth_client(transport);

    let user = client.register(&registration("")).await.unwrap();

    assert_eq!(user.id, RecordId::Int(9));
    let requests = client.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://api.escuelajs.co/api/v1/users/");
    assert_eq!(
        requests[0].body,
        Some(serde_json::json!({
            "email": "new@shop.test",
            "password": "secret1",
            "name": "Neo",
            "avatar": "",
            "role": "customer"
        }))
    );
}

#[tokio::test]
async fn register_password_mismatch_makes_no_request() {
    let (client, _) = auth_client(StubTransport::new());
    let mut form = registration("https://img.test/a.png");
    form.password = "abcdef".to_owned();
    form.repassword = "abcxyz".to_owned();

    let err = client.register(&form).await.unwrap_err();

    assert_eq!(err, AuthError::InvalidRegistration(vec![ValidationError::PasswordMismatch]));
    assert!(client.transport.requests().is_empty());
}

#[tokio::test]
async fn register_probes_avatar_before_posting() {
    let transport = StubTransport::new()
        .respond(200, Some("image/png"), "")
        .respond_json(201, user_json(10, "new@shop.test"));
    let (client, _) = auth_client(transport);

    client.register(&registration("https://img.test/a.png")).await.unwrap();

    let requests = client.transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[1].method, HttpMethod::Post);
}

#[tokio::test]
async fn register_rejection_surfaces_message_list() {
    let transport = StubTransport::new().respond_json(
        400,
        serde_json::json!({ "message": ["email must be an email"], "error": "Bad Request" }),
    );
    let (client, _) = auth_client(transport);

    let err = client.register(&registration("")).await.unwrap_err();

    assert_eq!(err.to_string(), "email must be an email");
}

#[tokio::test]
async fn register_rejection_without_message_uses_fallback() {
    let transport = StubTransport::new().respond(502, None, "");
    let (client, _) = auth_client(transport);

    let err = client.register(&registration("")).await.unwrap_err();

    assert_eq!(err.to_string(), "Something went wrong");
}

#[tokio::test]
async fn register_appends_to_existing_user_cache() {
    let transport = StubTransport::new().respond_json(201, user_json(2, "new@shop.test"));
    let (client, _) = auth_client(transport);
    let existing: User = serde_json::from_value(user_json(1, "old@shop.test")).unwrap();
    client.session().set_cached_users(std::slice::from_ref(&existing)).unwrap();

    client.register(&registration("")).await.unwrap();

    let cached = client.session().get_cached_users().unwrap();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0], existing);
    assert_eq!(cached[1].email, "new@shop.test");
}

#[tokio::test]
async fn register_does_not_seed_missing_cache() {
    let transport = StubTransport::new().respond_json(201, user_json(2, "new@shop.test"));
    let (client, _) = auth_client(transport);

    client.register(&registration("")).await.unwrap();

    assert!(client.session().get_cached_users().is_none());
}

// =============================================================
// users (read-through cache)
// =============================================================

#[tokio::test]
async fn users_fetches_once_then_reads_cache() {
    let transport = StubTransport::new().respond_json(
        200,
        serde_json::json!([user_json(1, "a@shop.test"), user_json(2, "b@shop.test")]),
    );
    let (client, _) = auth_client(transport);

    let first = client.users().await.unwrap();
    let second = client.users().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(client.transport.requests().len(), 1);
}

#[tokio::test]
async fn refresh_users_overwrites_cache() {
    let transport = StubTransport::new().respond_json(200, serde_json::json!([user_json(3, "c@shop.test")]));
    let (client, _) = auth_client(transport);
    let stale: User = serde_json::from_value(user_json(1, "a@shop.test")).unwrap();
    client.session().set_cached_users(&[stale]).unwrap();

    let users = client.refresh_users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(client.session().get_cached_users(), Some(users));
}

#[tokio::test]
async fn users_fetch_failure_leaves_cache_empty() {
    let transport = StubTransport::new().respond(503, None, "");
    let (client, _) = auth_client(transport);

    assert!(client.users().await.is_err());
    assert!(client.session().get_cached_users().is_none());
}

// =============================================================
// logout
// =============================================================

#[tokio::test]
async fn logout_clears_token() {
    let transport = StubTransport::new().respond_json(201, serde_json::json!({ "access_token": "abc" }));
    let (client, _) = auth_client(transport);
    client.login(&credentials("a@b.com", "secret1")).await.unwrap();
    assert!(client.session().is_authenticated());

    client.logout().unwrap();

    assert!(!client.session().is_authenticated());
}
