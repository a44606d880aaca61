use reqwest::Method;

use crate::client::{ApiResponse, Keycloak};
use crate::error::{Error, Result};
use crate::models::{Client, Credential, Role, User};

/// Client administration (`admin/realms/{realm}/clients`).
///
/// Methods taking `id` expect the client's UUID, not its `clientId`;
/// use [`get_by_client_id`](Self::get_by_client_id) to resolve one.
#[derive(Debug, Clone, Copy)]
pub struct ClientsService<'a> {
    keycloak: &'a Keycloak,
}

impl<'a> ClientsService<'a> {
    pub(crate) fn new(keycloak: &'a Keycloak) -> Self {
        Self { keycloak }
    }

    /// Register a new client.
    pub async fn create(&self, realm: &str, client: &Client) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::POST, &["admin", "realms", realm, "clients"])?
            .json(client);
        self.keycloak.send(req).await
    }

    /// List all clients in the realm.
    pub async fn list(&self, realm: &str) -> Result<(Vec<Client>, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "clients"])?;
        self.keycloak.send_json(req).await
    }

    /// Look up clients by their OAuth2 `clientId`.
    pub async fn get_by_client_id(
        &self,
        realm: &str,
        client_id: &str,
    ) -> Result<(Vec<Client>, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "clients"])?
            .query(&[("clientId", client_id)]);
        self.keycloak.send_json(req).await
    }

    /// Get a client by UUID.
    pub async fn get(&self, realm: &str, id: &str) -> Result<(Client, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "clients", id])?;
        self.keycloak.send_json(req).await
    }

    /// Update a client; the target is taken from `client.id`.
    pub async fn update(&self, realm: &str, client: &Client) -> Result<ApiResponse> {
        let id = client
            .id
            .as_deref()
            .ok_or_else(|| Error::InvalidInput("client id is required for update".to_string()))?;
        let req = self
            .keycloak
            .request(Method::PUT, &["admin", "realms", realm, "clients", id])?
            .json(client);
        self.keycloak.send(req).await
    }

    /// Delete a client.
    pub async fn delete(&self, realm: &str, id: &str) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::DELETE, &["admin", "realms", realm, "clients", id])?;
        self.keycloak.send(req).await
    }

    /// Get the current client secret.
    pub async fn get_secret(&self, realm: &str, id: &str) -> Result<(Credential, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &["admin", "realms", realm, "clients", id, "client-secret"],
        )?;
        self.keycloak.send_json(req).await
    }

    /// Generate a new client secret, invalidating the old one.
    pub async fn regenerate_secret(
        &self,
        realm: &str,
        id: &str,
    ) -> Result<(Credential, ApiResponse)> {
        let req = self.keycloak.request(
            Method::POST,
            &["admin", "realms", realm, "clients", id, "client-secret"],
        )?;
        self.keycloak.send_json(req).await
    }

    /// Get the service-account user backing a confidential client.
    pub async fn get_service_account_user(
        &self,
        realm: &str,
        id: &str,
    ) -> Result<(User, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &["admin", "realms", realm, "clients", id, "service-account-user"],
        )?;
        self.keycloak.send_json(req).await
    }

    // ===== Client roles =====

    /// Create a role owned by the client.
    pub async fn create_role(&self, realm: &str, id: &str, role: &Role) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::POST,
                &["admin", "realms", realm, "clients", id, "roles"],
            )?
            .json(role);
        self.keycloak.send(req).await
    }

    /// List roles owned by the client.
    pub async fn list_roles(&self, realm: &str, id: &str) -> Result<(Vec<Role>, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &["admin", "realms", realm, "clients", id, "roles"],
        )?;
        self.keycloak.send_json(req).await
    }

    /// Get a client role by name.
    pub async fn get_role(
        &self,
        realm: &str,
        id: &str,
        name: &str,
    ) -> Result<(Role, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &["admin", "realms", realm, "clients", id, "roles", name],
        )?;
        self.keycloak.send_json(req).await
    }

    /// Delete a client role by name.
    pub async fn delete_role(&self, realm: &str, id: &str, name: &str) -> Result<ApiResponse> {
        let req = self.keycloak.request(
            Method::DELETE,
            &["admin", "realms", realm, "clients", id, "roles", name],
        )?;
        self.keycloak.send(req).await
    }
}
