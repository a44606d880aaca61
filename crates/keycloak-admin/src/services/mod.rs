//! One thin service per admin resource type.
//!
//! Each service borrows the shared [`Keycloak`](crate::Keycloak) transport
//! and maps every method onto exactly one HTTP call.

pub mod clients;
pub mod groups;
pub mod realms;
pub mod roles;
pub mod users;

pub use clients::ClientsService;
pub use groups::GroupsService;
pub use realms::RealmsService;
pub use roles::RolesService;
pub use users::UsersService;
