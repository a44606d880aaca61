mod common;

use common::{created, role_json, setup, user_json, REALM};
use keycloak_admin::{Role, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_create_realm_role() {
    let (server, kc) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/roles"))
        .and(body_json(json!({"name": "auditor", "description": "Read-only access"})))
        .respond_with(created(&server, "/admin/realms/acme/roles/auditor"))
        .expect(1)
        .mount(&server)
        .await;

    let role = Role {
        description: Some("Read-only access".to_string()),
        ..Role::new("auditor")
    };
    let resp = kc.roles().create(REALM, &role).await.expect("create");
    assert_eq!(resp.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_and_get_roles() {
    let (server, kc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            role_json("r-1", "auditor"),
            role_json("r-2", "offline_access")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/roles/auditor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(role_json("r-1", "auditor")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/roles-by-id/r-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(role_json("r-2", "offline_access")))
        .mount(&server)
        .await;

    let roles = kc.roles();
    let (all, _) = roles.list(REALM).await.expect("list");
    assert_eq!(all.len(), 2);

    let (by_name, _) = roles.get_by_name(REALM, "auditor").await.expect("by name");
    assert_eq!(by_name.id.as_deref(), Some("r-1"));

    let (by_id, _) = roles.get_by_id(REALM, "r-2").await.expect("by id");
    assert_eq!(by_id.name.as_deref(), Some("offline_access"));
}

#[tokio::test]
async fn test_role_name_is_path_escaped() {
    let (server, kc) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/admin/realms/acme/roles/billing%2Fadmin"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    kc.roles().delete(REALM, "billing/admin").await.expect("delete");
}

#[tokio::test]
async fn test_update_role_and_list_users() {
    let (server, kc) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/admin/realms/acme/roles/auditor"))
        .and(body_json(json!({"name": "auditor", "description": "updated"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/roles/auditor/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_json("u1", "alice")])))
        .expect(1)
        .mount(&server)
        .await;

    let role = Role {
        description: Some("updated".to_string()),
        ..Role::new("auditor")
    };
    kc.roles().update(REALM, &role).await.expect("update");

    let (holders, _) = kc.roles().list_users(REALM, "auditor").await.expect("users");
    assert_eq!(holders[0].username.as_deref(), Some("alice"));
}
