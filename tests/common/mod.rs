//! Shared wiremock scaffolding for array API tests

#![allow(dead_code)]

use flasharray_client::{ArrayClient, ArrayConfig};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_BASE: &str = "/api/1.12";

/// Client pointed at a mock array, authenticating with an API token
pub fn token_client(server: &MockServer) -> ArrayClient {
    ArrayClient::new(ArrayConfig {
        host: server.uri(),
        api_token: Some("test-token".into()),
        ..Default::default()
    })
}

/// Client pointed at a mock array, authenticating with credentials
pub fn credential_client(server: &MockServer) -> ArrayClient {
    ArrayClient::new(ArrayConfig {
        host: server.uri(),
        username: Some("pureuser".into()),
        password: Some("pureuser".into()),
        ..Default::default()
    })
}

/// Session endpoint accepting any token as `pureuser`
pub fn session_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "username": "pureuser" }))
}

pub async fn mount_session_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("{API_BASE}/auth/session")))
        .respond_with(session_ok())
        .mount(server)
        .await;
}

/// Token endpoint answering with a fresh token
pub async fn mount_apitoken_ok(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(format!("{API_BASE}/auth/apitoken")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "api_token": token })))
        .mount(server)
        .await;
}

/// Canned v1.12 `GET array` payload
pub fn array_body() -> serde_json::Value {
    json!({
        "array_name": "pure01",
        "id": "b75f8356-604b-431d-af5c-64c3ca303749",
        "revision": "201712160033+517009f",
        "version": "4.10.9"
    })
}

pub async fn mount_array_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("{API_BASE}/array")))
        .respond_with(ResponseTemplate::new(200).set_body_json(array_body()))
        .mount(server)
        .await;
}
