//! User administration (`admin/realms/{realm}/users`).

use reqwest::Method;
use tracing::{debug, warn};

use crate::client::{ApiResponse, Keycloak};
use crate::error::{Error, Result};
use crate::models::{
    Credential, ExecuteActionsEmailOptions, Group, Role, User, UserQuery, VerifyEmailOptions,
};

/// First Keycloak major version that understands `q=name:value` attribute search.
/// Older servers only accept `filter=name=value`.
const ATTRIBUTE_QUERY_MIN_MAJOR: u32 = 20;

/// Build the query parameter for an attribute search against a server of
/// the given major version. An unknown version is treated as modern.
pub(crate) fn attribute_query(
    major_version: Option<u32>,
    name: &str,
    value: &str,
) -> (&'static str, String) {
    match major_version {
        Some(major) if major < ATTRIBUTE_QUERY_MIN_MAJOR => {
            ("filter", format!("{}={}", name, value))
        }
        _ => ("q", format!("{}:\"{}\"", name, value)),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UsersService<'a> {
    keycloak: &'a Keycloak,
}

impl<'a> UsersService<'a> {
    pub(crate) fn new(keycloak: &'a Keycloak) -> Self {
        Self { keycloak }
    }

    /// Create a new user. The new ID is available via [`ApiResponse::created_id`].
    pub async fn create(&self, realm: &str, user: &User) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::POST, &["admin", "realms", realm, "users"])?
            .json(user);
        self.keycloak.send(req).await
    }

    /// List users.
    pub async fn list(&self, realm: &str) -> Result<(Vec<User>, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "users"])?;
        self.keycloak.send_json(req).await
    }

    /// Search users with arbitrary query parameters, including `first`/`max` paging.
    pub async fn search(&self, realm: &str, query: &UserQuery) -> Result<(Vec<User>, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "users"])?
            .query(query);
        self.keycloak.send_json(req).await
    }

    /// Number of users in the realm.
    pub async fn count(&self, realm: &str) -> Result<(i64, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "users", "count"])?;
        self.keycloak.send_json(req).await
    }

    /// Get a single user by ID.
    pub async fn get_by_id(&self, realm: &str, id: &str) -> Result<(User, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "users", id])?;
        self.keycloak.send_json(req).await
    }

    /// Get users matching a username. Keycloak matches substrings here, so
    /// the result may hold more than one user.
    pub async fn get_by_username(
        &self,
        realm: &str,
        username: &str,
    ) -> Result<(Vec<User>, ApiResponse)> {
        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "users"])?
            .query(&[("username", username)]);
        self.keycloak.send_json(req).await
    }

    /// Get users whose custom attribute `name` equals `value`.
    ///
    /// The query syntax depends on the server version, which is looked up
    /// via `admin/serverinfo` first. If that lookup fails the server is
    /// assumed to be modern.
    pub async fn get_by_attribute(
        &self,
        realm: &str,
        name: &str,
        value: &str,
    ) -> Result<(Vec<User>, ApiResponse)> {
        let major_version = match self.keycloak.server_info().await {
            Ok((info, _)) => {
                let major = info.major_version();
                if major.is_none() {
                    warn!(version = %info.system_info.version, "Unrecognised server version, assuming modern");
                }
                major
            }
            Err(e) => {
                warn!(error = %e, "Server info unavailable, assuming modern attribute search");
                None
            }
        };

        let (param, query) = attribute_query(major_version, name, value);
        debug!(?major_version, param, "Searching users by attribute");

        let req = self
            .keycloak
            .request(Method::GET, &["admin", "realms", realm, "users"])?
            .query(&[(param, query)]);
        self.keycloak.send_json(req).await
    }

    /// Update a user; the target is taken from `user.id`.
    pub async fn update(&self, realm: &str, user: &User) -> Result<ApiResponse> {
        let id = user
            .id
            .as_deref()
            .ok_or_else(|| Error::InvalidInput("user id is required for update".to_string()))?;
        let req = self
            .keycloak
            .request(Method::PUT, &["admin", "realms", realm, "users", id])?
            .json(user);
        self.keycloak.send(req).await
    }

    /// Delete a user.
    pub async fn delete(&self, realm: &str, user_id: &str) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(Method::DELETE, &["admin", "realms", realm, "users", user_id])?;
        self.keycloak.send(req).await
    }

    /// Set or reset the user's password.
    pub async fn reset_password(
        &self,
        realm: &str,
        user_id: &str,
        credential: &Credential,
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::PUT,
                &["admin", "realms", realm, "users", user_id, "reset-password"],
            )?
            .json(credential);
        self.keycloak.send(req).await
    }

    // ===== Group membership =====

    /// Add the user to a group.
    pub async fn join_group(&self, realm: &str, user_id: &str, group_id: &str) -> Result<ApiResponse> {
        let req = self.keycloak.request(
            Method::PUT,
            &["admin", "realms", realm, "users", user_id, "groups", group_id],
        )?;
        self.keycloak.send(req).await
    }

    /// Remove the user from a group.
    pub async fn leave_group(&self, realm: &str, user_id: &str, group_id: &str) -> Result<ApiResponse> {
        let req = self.keycloak.request(
            Method::DELETE,
            &["admin", "realms", realm, "users", user_id, "groups", group_id],
        )?;
        self.keycloak.send(req).await
    }

    /// List groups the user belongs to.
    pub async fn list_groups(&self, realm: &str, user_id: &str) -> Result<(Vec<Group>, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &["admin", "realms", realm, "users", user_id, "groups"],
        )?;
        self.keycloak.send_json(req).await
    }

    // ===== Role mappings =====

    /// Add realm roles to the user.
    pub async fn add_realm_roles(
        &self,
        realm: &str,
        user_id: &str,
        roles: &[Role],
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::POST,
                &["admin", "realms", realm, "users", user_id, "role-mappings", "realm"],
            )?
            .json(roles);
        self.keycloak.send(req).await
    }

    /// Remove assigned realm roles from the user.
    pub async fn remove_realm_roles(
        &self,
        realm: &str,
        user_id: &str,
        roles: &[Role],
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::DELETE,
                &["admin", "realms", realm, "users", user_id, "role-mappings", "realm"],
            )?
            .json(roles);
        self.keycloak.send(req).await
    }

    /// List realm roles assigned to the user.
    pub async fn list_realm_roles(
        &self,
        realm: &str,
        user_id: &str,
    ) -> Result<(Vec<Role>, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &["admin", "realms", realm, "users", user_id, "role-mappings", "realm"],
        )?;
        self.keycloak.send_json(req).await
    }

    /// Add client roles to the user. `client_id` is the client's UUID.
    pub async fn add_client_roles(
        &self,
        realm: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::POST,
                &[
                    "admin", "realms", realm, "users", user_id, "role-mappings", "clients",
                    client_id,
                ],
            )?
            .json(roles);
        self.keycloak.send(req).await
    }

    /// Remove assigned client roles from the user.
    pub async fn remove_client_roles(
        &self,
        realm: &str,
        user_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::DELETE,
                &[
                    "admin", "realms", realm, "users", user_id, "role-mappings", "clients",
                    client_id,
                ],
            )?
            .json(roles);
        self.keycloak.send(req).await
    }

    /// List client roles assigned to the user.
    pub async fn list_client_roles(
        &self,
        realm: &str,
        user_id: &str,
        client_id: &str,
    ) -> Result<(Vec<Role>, ApiResponse)> {
        let req = self.keycloak.request(
            Method::GET,
            &[
                "admin", "realms", realm, "users", user_id, "role-mappings", "clients", client_id,
            ],
        )?;
        self.keycloak.send_json(req).await
    }

    // ===== Emails =====

    /// Send an email-verification email to the user.
    /// The email contains a link the user can click to verify their address.
    pub async fn send_verify_email(
        &self,
        realm: &str,
        user_id: &str,
        opts: &VerifyEmailOptions,
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::PUT,
                &["admin", "realms", realm, "users", user_id, "send-verify-email"],
            )?
            .query(opts);
        self.keycloak.send(req).await
    }

    /// Send an update-account email to the user.
    /// The email contains a link the user can click to perform `actions`
    /// (e.g. `UPDATE_PASSWORD`, `VERIFY_EMAIL`).
    pub async fn execute_actions_email(
        &self,
        realm: &str,
        user_id: &str,
        opts: &ExecuteActionsEmailOptions,
        actions: &[String],
    ) -> Result<ApiResponse> {
        let req = self
            .keycloak
            .request(
                Method::PUT,
                &["admin", "realms", realm, "users", user_id, "execute-actions-email"],
            )?
            .query(opts)
            .json(actions);
        self.keycloak.send(req).await
    }
}
