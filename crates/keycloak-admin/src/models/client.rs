use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Keycloak `ClientRepresentation`.
///
/// Note the two identifiers: `id` is the server-assigned UUID used in admin
/// URLs, `client_id` is the human-chosen OAuth2 client identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_client: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_authenticator_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirect_uris: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub web_origins: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_flow_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_flow_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_access_grants_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_accounts_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_scope_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_client_scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_client_scopes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<HashMap<String, String>>,
}

impl Client {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            enabled: Some(true),
            protocol: Some("openid-connect".to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_client_response() {
        let json = r#"{"id":"7d3a4b52-0000-4c1e-9d1f-2b7d0c3e8a11","clientId":"billing-app","enabled":true,"publicClient":false,"protocol":"openid-connect","redirectUris":["https://billing.example.com/*"],"webOrigins":["+"],"serviceAccountsEnabled":true,"attributes":{"pkce.code.challenge.method":"S256"},"protocolMappers":[]}"#;

        let client: Client = serde_json::from_str(json).expect("Failed to parse client test JSON");
        assert_eq!(client.client_id.as_deref(), Some("billing-app"));
        assert_eq!(client.redirect_uris, vec!["https://billing.example.com/*"]);
        assert_eq!(client.service_accounts_enabled, Some(true));
        assert_eq!(
            client
                .attributes
                .as_ref()
                .and_then(|a| a.get("pkce.code.challenge.method"))
                .map(String::as_str),
            Some("S256")
        );
    }
}
