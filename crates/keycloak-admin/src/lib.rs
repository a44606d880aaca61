//! Typed client for the Keycloak admin REST API.
//!
//! A [`Keycloak`] value holds the HTTP client, the server root and the
//! caller-supplied bearer token. Resource services borrow it:
//!
//! - [`UsersService`]: accounts, passwords, group membership, role mappings, emails
//! - [`RealmsService`]: realm lifecycle
//! - [`RolesService`]: realm-level roles
//! - [`GroupsService`]: groups, subgroups, members, group role mappings
//! - [`ClientsService`]: clients, secrets, client roles
//!
//! Every method issues exactly one HTTP request and returns the decoded body
//! together with an [`ApiResponse`] (status, headers, URL). Obtaining the
//! token is left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use keycloak_admin::{ClientConfig, Keycloak, User};
//!
//! # async fn example() -> keycloak_admin::Result<()> {
//! let kc = Keycloak::new(
//!     ClientConfig::new("https://sso.example.com").with_token("eyJhbGciOi..."),
//! )?;
//!
//! let created = kc.users().create("acme", &User::new("jdoe")).await?;
//! let id = created.created_id().unwrap_or_default();
//!
//! let (user, _) = kc.users().get_by_id("acme", &id).await?;
//! println!("{}", user.display_name());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use client::{ApiResponse, Keycloak};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{
    Client, Composites, Credential, ExecuteActionsEmailOptions, Group, Realm, Role, ServerInfo,
    SystemInfo, User, UserQuery, VerifyEmailOptions,
};
pub use services::{ClientsService, GroupsService, RealmsService, RolesService, UsersService};

/// Re-exported so callers can inspect [`ApiResponse`] without depending on reqwest directly.
pub use reqwest::StatusCode;
