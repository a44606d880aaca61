//! CLI configuration management.
//!
//! Holds the server URL and default realm between runs. Stored at
//! `~/.config/keycloak-admin/config.json`. Tokens are never written here;
//! they come from `KEYCLOAK_TOKEN`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "keycloak-admin";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub base_url: Option<String>,
    pub default_realm: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Server URL, with `KEYCLOAK_URL` taking precedence over the file.
    pub fn resolve_base_url(&self, env_url: Option<String>) -> Option<String> {
        env_url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| self.base_url.clone())
    }

    /// Realm for a command: the `--realm` flag wins over the saved default.
    pub fn resolve_realm(&self, flag: Option<&str>) -> Result<String> {
        flag.map(str::to_string)
            .or_else(|| self.default_realm.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("No realm given. Pass --realm or run `kcadm config set-realm <realm>`")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_url_overrides_file() {
        let config = Config {
            base_url: Some("http://file:8080".to_string()),
            default_realm: None,
        };
        assert_eq!(
            config.resolve_base_url(Some("https://env.example.com".to_string())).as_deref(),
            Some("https://env.example.com")
        );
        assert_eq!(
            config.resolve_base_url(Some("  ".to_string())).as_deref(),
            Some("http://file:8080")
        );
        assert_eq!(config.resolve_base_url(None).as_deref(), Some("http://file:8080"));
    }

    #[test]
    fn test_realm_flag_wins() {
        let config = Config {
            base_url: None,
            default_realm: Some("acme".to_string()),
        };
        assert_eq!(config.resolve_realm(Some("other")).unwrap(), "other");
        assert_eq!(config.resolve_realm(None).unwrap(), "acme");
        assert!(Config::default().resolve_realm(None).is_err());
    }

    #[test]
    fn test_parse_partial_config_file() {
        let config: Config = serde_json::from_str(r#"{"default_realm":"acme"}"#)
            .expect("Failed to parse config JSON");
        assert_eq!(config.default_realm.as_deref(), Some("acme"));
        assert!(config.base_url.is_none());
    }
}
