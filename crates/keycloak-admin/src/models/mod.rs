//! Data models mirroring the Keycloak admin API's JSON representations.
//!
//! Every field is optional and omitted from request bodies when unset, so a
//! partially filled struct can be sent as an update without clobbering
//! server-side values.
//!
//! - `User`, `Credential`: user accounts and their passwords
//! - `Role`, `Group`, `Realm`, `Client`: the remaining admin resources
//! - `ServerInfo`: server version detection
//! - Query option types: `UserQuery`, `VerifyEmailOptions`, `ExecuteActionsEmailOptions`

pub mod client;
pub mod group;
pub mod realm;
pub mod role;
pub mod server_info;
pub mod user;

pub use client::Client;
pub use group::Group;
pub use realm::Realm;
pub use role::{Composites, Role};
pub use server_info::{ServerInfo, SystemInfo};
pub use user::{Credential, ExecuteActionsEmailOptions, User, UserQuery, VerifyEmailOptions};
