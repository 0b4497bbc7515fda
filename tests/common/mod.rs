#![allow(dead_code)]

use icebreaker_assistant::auth::Session;
use icebreaker_assistant::BackendClient;
use jsonwebtoken::{EncodingKey, Header};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

pub const ANON_KEY: &str = "anon-key";

pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// An access token for `user_id`, expiring `ttl` seconds from now
pub fn access_token(user_id: &str, ttl: i64) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &json!({ "sub": user_id, "exp": now() + ttl, "role": "authenticated" }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

pub fn anonymous_client(uri: &str) -> BackendClient {
    BackendClient::new(uri, ANON_KEY)
}

/// A client holding a valid session for `user_id`
pub fn signed_in_client(uri: &str, user_id: &str) -> (BackendClient, String) {
    let client = BackendClient::new(uri, ANON_KEY);
    let token = access_token(user_id, 3600);
    client
        .auth()
        .set_session(Session::from_tokens(&token, "refresh-token").unwrap());
    (client, token)
}

pub fn user_json(user_id: &str) -> serde_json::Value {
    json!({
        "id": user_id,
        "email": format!("{}@example.com", user_id),
        "role": "authenticated",
        "created_at": "2024-01-01T00:00:00Z",
        "app_metadata": {},
        "user_metadata": {}
    })
}
