mod common;

use common::{created, role_json, setup, user_json, REALM};
use keycloak_admin::{Client, Error, Role};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const CLIENT_UUID: &str = "7d3a4b52-0000-4c1e-9d1f-2b7d0c3e8a11";

fn client_json() -> serde_json::Value {
    json!({
        "id": CLIENT_UUID,
        "clientId": "billing-app",
        "enabled": true,
        "publicClient": false,
        "serviceAccountsEnabled": true
    })
}

#[tokio::test]
async fn test_create_client() {
    let (server, kc) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/realms/acme/clients"))
        .and(body_json(json!({
            "clientId": "billing-app",
            "enabled": true,
            "protocol": "openid-connect",
            "redirectUris": ["https://billing.example.com/*"]
        })))
        .respond_with(created(&server, &format!("/admin/realms/acme/clients/{}", CLIENT_UUID)))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client {
        redirect_uris: vec!["https://billing.example.com/*".to_string()],
        ..Client::new("billing-app")
    };
    let resp = kc.clients().create(REALM, &client).await.expect("create");
    assert_eq!(resp.created_id().as_deref(), Some(CLIENT_UUID));
}

#[tokio::test]
async fn test_list_and_lookup_clients() {
    let (server, kc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/clients"))
        .and(query_param("clientId", "billing-app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([client_json()])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/admin/realms/acme/clients/{}", CLIENT_UUID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(client_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (found, _) = kc
        .clients()
        .get_by_client_id(REALM, "billing-app")
        .await
        .expect("lookup");
    let id = found[0].id.clone().expect("client uuid");

    let (client, _) = kc.clients().get(REALM, &id).await.expect("get");
    assert_eq!(client.client_id.as_deref(), Some("billing-app"));
}

#[tokio::test]
async fn test_list_clients() {
    let (server, kc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/acme/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            client_json(),
            {"id": "c-2", "clientId": "account", "publicClient": true}
        ])))
        .mount(&server)
        .await;

    let (clients, _) = kc.clients().list(REALM).await.expect("list");
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[1].public_client, Some(true));
}

#[tokio::test]
async fn test_update_and_delete_client() {
    let (server, kc) = setup().await;
    let client_path = format!("/admin/realms/acme/clients/{}", CLIENT_UUID);

    Mock::given(method("PUT"))
        .and(path(client_path.as_str()))
        .and(body_json(json!({"id": CLIENT_UUID, "description": "Billing"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(client_path.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let update = Client {
        id: Some(CLIENT_UUID.to_string()),
        description: Some("Billing".to_string()),
        ..Client::default()
    };
    kc.clients().update(REALM, &update).await.expect("update");
    kc.clients().delete(REALM, CLIENT_UUID).await.expect("delete");

    let err = kc.clients().update(REALM, &Client::new("x")).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_client_secret() {
    let (server, kc) = setup().await;
    let secret_path = format!("/admin/realms/acme/clients/{}/client-secret", CLIENT_UUID);

    Mock::given(method("GET"))
        .and(path(secret_path.as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"type": "secret", "value": "old"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(secret_path.as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"type": "secret", "value": "new"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (secret, _) = kc.clients().get_secret(REALM, CLIENT_UUID).await.expect("secret");
    assert_eq!(secret.credential_type.as_deref(), Some("secret"));
    assert_eq!(secret.value.as_deref(), Some("old"));

    let (secret, _) = kc
        .clients()
        .regenerate_secret(REALM, CLIENT_UUID)
        .await
        .expect("regenerate");
    assert_eq!(secret.value.as_deref(), Some("new"));
}

#[tokio::test]
async fn test_service_account_user() {
    let (server, kc) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/admin/realms/acme/clients/{}/service-account-user",
            CLIENT_UUID
        )))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_json("sa-1", "service-account-billing-app")),
        )
        .mount(&server)
        .await;

    let (user, _) = kc
        .clients()
        .get_service_account_user(REALM, CLIENT_UUID)
        .await
        .expect("service account");
    assert_eq!(user.username.as_deref(), Some("service-account-billing-app"));
}

#[tokio::test]
async fn test_client_roles() {
    let (server, kc) = setup().await;
    let roles_path = format!("/admin/realms/acme/clients/{}/roles", CLIENT_UUID);
    let role_path = format!("{}/invoice-reader", roles_path);

    Mock::given(method("POST"))
        .and(path(roles_path.as_str()))
        .and(body_json(json!({"name": "invoice-reader"})))
        .respond_with(created(&server, &role_path))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(roles_path.as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([role_json("r-9", "invoice-reader")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(role_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(role_json("r-9", "invoice-reader")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(role_path.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let clients = kc.clients();
    clients
        .create_role(REALM, CLIENT_UUID, &Role::new("invoice-reader"))
        .await
        .expect("create role");
    let (roles, _) = clients.list_roles(REALM, CLIENT_UUID).await.expect("list roles");
    assert_eq!(roles.len(), 1);
    let (role, _) = clients
        .get_role(REALM, CLIENT_UUID, "invoice-reader")
        .await
        .expect("get role");
    assert_eq!(role.id.as_deref(), Some("r-9"));
    clients
        .delete_role(REALM, CLIENT_UUID, "invoice-reader")
        .await
        .expect("delete role");
}
