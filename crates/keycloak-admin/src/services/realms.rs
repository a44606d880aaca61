use reqwest::Method;

use crate::client::{ApiResponse, Keycloak};
use crate::error::{Error, Result};
use crate::models::Realm;

/// Realm administration (`admin/realms`).
#[derive(Debug, Clone, Copy)]
pub struct RealmsService<'a> {
    keycloak: &'a Keycloak,
}

impl<'a> RealmsService<'a> {
    pub(crate) fn new(keycloak: &'a Keycloak) -> Self {
        Self { keycloak }
    }

    /// Create a new realm.
    pub async fn create(&self, realm: &Realm) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::POST, &["admin", "realms"])?
            .json(realm);
        self.keycloak.send(req).await
    }

    /// List all realms visible to the token.
    pub async fn list(&self) -> Result<(Vec<Realm>, ApiResponse)> {
        let req = self.keycloak.request(Method::GET, &["admin", "realms"])?;
        self.keycloak.send_json(req).await
    }

    /// Get a realm by name.
    pub async fn get(&self, realm: &str) -> Result<(Realm, ApiResponse)> {
        let req = self.keycloak.request(Method::GET, &["admin", "realms", realm])?;
        self.keycloak.send_json(req).await
    }

    /// Update a realm; the target is taken from `realm.realm`.
    pub async fn update(&self, realm: &Realm) -> Result<ApiResponse> {
        let name = realm
            .realm
            .as_deref()
            .ok_or_else(|| Error::InvalidInput("realm name is required for update".to_string()))?;
        let req = self
            .keycloak
            .request(Method::PUT, &["admin", "realms", name])?
            .json(realm);
        self.keycloak.send(req).await
    }

    /// Delete a realm and everything in it.
    pub async fn delete(&self, realm: &str) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::DELETE, &["admin", "realms", realm])?;
        self.keycloak.send(req).await
    }
}
