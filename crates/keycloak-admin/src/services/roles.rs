use reqwest::Method;

use crate::client::{ApiResponse, Keycloak};
use crate::error::{Error, Result};
use crate::models::{Role, User};

/// Realm-level roles (`admin/realms/{realm}/roles`).
///
/// Client roles live on [`ClientsService`](crate::ClientsService).
#[derive(Debug, Clone, Copy)]
pub struct RolesService<'a> {
    keycloak: &'a Keycloak,
}

impl<'a> RolesService<'a> {
    pub(crate) fn new(keycloak: &'a Keycloak) -> Self {
        Self { keycloak }
    }

    /// Create a realm role.
    pub async fn create(&self, realm: &str, role: &Role) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::POST, &["admin", "realms", realm, "roles"])?
            .json(role);
        self.keycloak.send(req).await
    }

    /// List realm roles.
    pub async fn list(&self, realm: &str) -> Result<(Vec<Role>, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "roles"])?;
        self.keycloak.send_json(req).await
    }

    /// Get a realm role by name.
    pub async fn get_by_name(&self, realm: &str, name: &str) -> Result<(Role, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "roles", name])?;
        self.keycloak.send_json(req).await
    }

    /// Get any role (realm or client) by its ID.
    pub async fn get_by_id(&self, realm: &str, id: &str) -> Result<(Role, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "roles-by-id", id])?;
        self.keycloak.send_json(req).await
    }

    /// Update a realm role; the target is taken from `role.name`.
    pub async fn update(&self, realm: &str, role: &Role) -> Result<ApiResponse> {
        let name = role
            .name
            .as_deref()
            .ok_or_else(|| Error::InvalidInput("role name is required for update".to_string()))?;
        let req = self
            .keycloak
            .request(Method::PUT, &["admin", "realms", realm, "roles", name])?
            .json(role);
        self.keycloak.send(req).await
    }

    /// Delete a realm role.
    pub async fn delete(&self, realm: &str, name: &str) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::DELETE, &["admin", "realms", realm, "roles", name])?;
        self.keycloak.send(req).await
    }

    /// List users that hold the role directly.
    pub async fn list_users(&self, realm: &str, name: &str) -> Result<(Vec<User>, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &["admin", "realms", realm, "roles", name, "users"],
        )?;
        self.keycloak.send_json(req).await
    }
}
