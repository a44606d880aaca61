//! Shared setup for integration tests against a mock Keycloak server.

#![allow(dead_code)]

use keycloak_admin::{ClientConfig, Keycloak};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";
pub const REALM: &str = "acme";

/// Start a mock server and a client pointing at it with a bearer token.
pub async fn setup() -> (MockServer, Keycloak) {
    let server = MockServer::start().await;
    let kc = Keycloak::new(ClientConfig::new(server.uri()).with_token(TOKEN))
        .expect("Failed to build test client");
    (server, kc)
}

/// Mount an `admin/serverinfo` response reporting the given version.
pub async fn mount_server_version(server: &MockServer, version: &str) {
    Mock::given(method("GET"))
        .and(path("/admin/serverinfo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"systemInfo": {"version": version}})),
        )
        .mount(server)
        .await;
}

pub fn user_json(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "enabled": true,
        "emailVerified": false,
        "createdTimestamp": 1700000000000i64,
        "requiredActions": [],
        "access": {"view": true}
    })
}

pub fn role_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "composite": false,
        "clientRole": false,
        "containerId": REALM
    })
}

/// `201 Created` with a `Location` header for the given resource path.
pub fn created(server: &MockServer, resource_path: &str) -> ResponseTemplate {
    ResponseTemplate::new(201)
        .insert_header("Location", format!("{}{}", server.uri(), resource_path).as_str())
}
