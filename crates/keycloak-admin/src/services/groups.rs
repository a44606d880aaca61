use reqwest::Method;

use crate::client::{ApiResponse, Keycloak};
use crate::error::{Error, Result};
use crate::models::{Group, Role, User};

/// Group administration (`admin/realms/{realm}/groups`).
#[derive(Debug, Clone, Copy)]
pub struct GroupsService<'a> {
    keycloak: &'a Keycloak,
}

impl<'a> GroupsService<'a> {
    pub(crate) fn new(keycloak: &'a Keycloak) -> Self {
        Self { keycloak }
    }

    /// Create a top-level group.
    pub async fn create(&self, realm: &str, group: &Group) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::POST, &["admin", "realms", realm, "groups"])?
            .json(group);
        self.keycloak.send(req).await
    }

    /// List top-level groups with their subgroup trees.
    pub async fn list(&self, realm: &str) -> Result<(Vec<Group>, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "groups"])?;
        self.keycloak.send_json(req).await
    }

    /// Get a single group by ID.
    pub async fn get(&self, realm: &str, group_id: &str) -> Result<(Group, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "groups", group_id])?;
        self.keycloak.send_json(req).await
    }

    /// Update a group; the target is taken from `group.id`.
    pub async fn update(&self, realm: &str, group: &Group) -> Result<ApiResponse> {
        let id = group
            .id
            .as_deref()
            .ok_or_else(|| Error::InvalidInput("group id is required for update".to_string()))?;
        let req = self
            .keycloak
            .request(Method::PUT, &["admin", "realms", realm, "groups", id])?
            .json(group);
        self.keycloak.send(req).await
    }

    /// Delete a group and its subgroups.
    pub async fn delete(&self, realm: &str, group_id: &str) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::DELETE, &["admin", "realms", realm, "groups", group_id])?;
        self.keycloak.send(req).await
    }

    /// Create a child group under `parent_id`.
    pub async fn create_subgroup(
        &self,
        realm: &str,
        parent_id: &str,
        group: &Group,
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::POST,
                &["admin", "realms", realm, "groups", parent_id, "children"],
            )?
            .json(group);
        self.keycloak.send(req).await
    }

    /// List direct members of a group.
    pub async fn list_members(
        &self,
        realm: &str,
        group_id: &str,
    ) -> Result<(Vec<User>, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &["admin", "realms", realm, "groups", group_id, "members"],
        )?;
        self.keycloak.send_json(req).await
    }

    /// Grant realm roles to every member of the group.
    pub async fn add_realm_roles(
        &self,
        realm: &str,
        group_id: &str,
        roles: &[Role],
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::POST,
                &["admin", "realms", realm, "groups", group_id, "role-mappings", "realm"],
            )?
            .json(roles);
        self.keycloak.send(req).await
    }

    /// Revoke realm roles from the group.
    pub async fn remove_realm_roles(
        &self,
        realm: &str,
        group_id: &str,
        roles: &[Role],
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::DELETE,
                &["admin", "realms", realm, "groups", group_id, "role-mappings", "realm"],
            )?
            .json(roles);
        self.keycloak.send(req).await
    }

    /// List realm roles mapped to the group.
    pub async fn list_realm_roles(
        &self,
        realm: &str,
        group_id: &str,
    ) -> Result<(Vec<Role>, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &["admin", "realms", realm, "groups", group_id, "role-mappings", "realm"],
        )?;
        self.keycloak.send_json(req).await
    }
}
