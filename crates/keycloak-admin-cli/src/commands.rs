//! Command-line parsing and dispatch.

use anyhow::{bail, Context, Result};
use keycloak_admin::{ClientConfig, Keycloak};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;

pub const USAGE: &str = "\
Usage: kcadm [--realm <realm>] <command>

Commands:
  users list                      List users
  users get <id>                  Show a user
  users count                     Count users
  users find <username>           Find users by username
  users find-attr <name> <value>  Find users by custom attribute
  users delete <id>               Delete a user
  realms list                     List realms
  realms get <name>               Show a realm
  roles list                      List realm roles
  roles get <name>                Show a realm role
  groups list                     List groups
  groups members <id>             List group members
  clients list                    List clients
  clients get <clientId>          Find a client by clientId
  clients secret <id>             Show a client's secret
  server-info                     Show server version info
  config show                     Show saved configuration
  config set-url <url>            Save the server URL
  config set-realm <realm>        Save the default realm

Environment:
  KEYCLOAK_URL           Server URL (overrides saved config)
  KEYCLOAK_TOKEN         Bearer token for the admin API
  KEYCLOAK_TIMEOUT_SECS  Request timeout in seconds
  RUST_LOG               Log filter, e.g. debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ListUsers,
    GetUser(String),
    CountUsers,
    FindUsers(String),
    FindUsersByAttribute { name: String, value: String },
    DeleteUser(String),
    ListRealms,
    GetRealm(String),
    ListRoles,
    GetRole(String),
    ListGroups,
    GroupMembers(String),
    ListClients,
    GetClient(String),
    ClientSecret(String),
    ServerInfo,
    ShowConfig,
    SetUrl(String),
    SetRealm(String),
    Help,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub realm: Option<String>,
    pub command: Command,
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut realm = None;
    let mut rest: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--realm" | "-r" => {
                let value = iter.next().context("--realm requires a value")?;
                realm = Some(value.clone());
            }
            "--help" | "-h" => {
                return Ok(Invocation {
                    realm,
                    command: Command::Help,
                })
            }
            other => rest.push(other),
        }
    }

    let command = match rest.as_slice() {
        [] | ["help"] => Command::Help,
        ["users", "list"] => Command::ListUsers,
        ["users", "get", id] => Command::GetUser(id.to_string()),
        ["users", "count"] => Command::CountUsers,
        ["users", "find", username] => Command::FindUsers(username.to_string()),
        ["users", "find-attr", name, value] => Command::FindUsersByAttribute {
            name: name.to_string(),
            value: value.to_string(),
        },
        ["users", "delete", id] => Command::DeleteUser(id.to_string()),
        ["realms", "list"] => Command::ListRealms,
        ["realms", "get", name] => Command::GetRealm(name.to_string()),
        ["roles", "list"] => Command::ListRoles,
        ["roles", "get", name] => Command::GetRole(name.to_string()),
        ["groups", "list"] => Command::ListGroups,
        ["groups", "members", id] => Command::GroupMembers(id.to_string()),
        ["clients", "list"] => Command::ListClients,
        ["clients", "get", client_id] => Command::GetClient(client_id.to_string()),
        ["clients", "secret", id] => Command::ClientSecret(id.to_string()),
        ["server-info"] => Command::ServerInfo,
        ["config", "show"] => Command::ShowConfig,
        ["config", "set-url", url] => Command::SetUrl(url.to_string()),
        ["config", "set-realm", name] => Command::SetRealm(name.to_string()),
        other => bail!("Unknown command: {}\n\n{}", other.join(" "), USAGE),
    };

    Ok(Invocation { realm, command })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn connect(config: &Config) -> Result<Keycloak> {
    let mut client_config = ClientConfig::from_env()?;
    if let Some(url) = config.resolve_base_url(std::env::var("KEYCLOAK_URL").ok()) {
        client_config = client_config.with_base_url(url);
    }
    if client_config.token.is_none() {
        bail!("KEYCLOAK_TOKEN is not set; obtain an admin access token first");
    }
    debug!(base_url = %client_config.base_url, "Connecting to Keycloak");
    Ok(Keycloak::new(client_config)?)
}

/// Execute a parsed command, printing results as JSON on stdout.
pub async fn run(invocation: Invocation, config: &mut Config) -> Result<()> {
    let realm_flag = invocation.realm.as_deref();

    match invocation.command {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::ShowConfig => return print_json(&*config),
        Command::SetUrl(url) => {
            config.base_url = Some(url);
            config.save()?;
            return print_json(&*config);
        }
        Command::SetRealm(name) => {
            config.default_realm = Some(name);
            config.save()?;
            return print_json(&*config);
        }
        _ => {}
    }

    let kc = connect(config)?;

    match invocation.command {
        Command::ListUsers => {
            let (users, _) = kc.users().list(&config.resolve_realm(realm_flag)?).await?;
            print_json(&users)
        }
        Command::GetUser(id) => {
            let (user, _) = kc
                .users()
                .get_by_id(&config.resolve_realm(realm_flag)?, &id)
                .await?;
            print_json(&user)
        }
        Command::CountUsers => {
            let (count, _) = kc.users().count(&config.resolve_realm(realm_flag)?).await?;
            println!("{}", count);
            Ok(())
        }
        Command::FindUsers(username) => {
            let (users, _) = kc
                .users()
                .get_by_username(&config.resolve_realm(realm_flag)?, &username)
                .await?;
            print_json(&users)
        }
        Command::FindUsersByAttribute { name, value } => {
            let (users, _) = kc
                .users()
                .get_by_attribute(&config.resolve_realm(realm_flag)?, &name, &value)
                .await?;
            print_json(&users)
        }
        Command::DeleteUser(id) => {
            let resp = kc
                .users()
                .delete(&config.resolve_realm(realm_flag)?, &id)
                .await?;
            println!("Deleted user {} ({})", id, resp.status);
            Ok(())
        }
        Command::ListRealms => {
            let (realms, _) = kc.realms().list().await?;
            print_json(&realms)
        }
        Command::GetRealm(name) => {
            let (realm, _) = kc.realms().get(&name).await?;
            print_json(&realm)
        }
        Command::ListRoles => {
            let (roles, _) = kc.roles().list(&config.resolve_realm(realm_flag)?).await?;
            print_json(&roles)
        }
        Command::GetRole(name) => {
            let (role, _) = kc
                .roles()
                .get_by_name(&config.resolve_realm(realm_flag)?, &name)
                .await?;
            print_json(&role)
        }
        Command::ListGroups => {
            let (groups, _) = kc.groups().list(&config.resolve_realm(realm_flag)?).await?;
            print_json(&groups)
        }
        Command::GroupMembers(id) => {
            let (members, _) = kc
                .groups()
                .list_members(&config.resolve_realm(realm_flag)?, &id)
                .await?;
            print_json(&members)
        }
        Command::ListClients => {
            let (clients, _) = kc.clients().list(&config.resolve_realm(realm_flag)?).await?;
            print_json(&clients)
        }
        Command::GetClient(client_id) => {
            let (clients, _) = kc
                .clients()
                .get_by_client_id(&config.resolve_realm(realm_flag)?, &client_id)
                .await?;
            print_json(&clients)
        }
        Command::ClientSecret(id) => {
            let (secret, _) = kc
                .clients()
                .get_secret(&config.resolve_realm(realm_flag)?, &id)
                .await?;
            print_json(&secret)
        }
        Command::ServerInfo => {
            let (info, _) = kc.server_info().await?;
            print_json(&info)
        }
        Command::Help | Command::ShowConfig | Command::SetUrl(_) | Command::SetRealm(_) => Ok(()),
    }
}
