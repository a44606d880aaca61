//! Shared HTTP transport for the Keycloak admin API.
//!
//! `Keycloak` owns the HTTP client, the server root and the bearer token.
//! The per-resource services borrow it and only decide method, path, query
//! and body; everything about sending, status checking and decoding lives
//! here.

use reqwest::{header, Client as HttpClient, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::ServerInfo;
use crate::services::{ClientsService, GroupsService, RealmsService, RolesService, UsersService};

/// Metadata of a completed HTTP exchange.
///
/// Returned next to every decoded value (and on its own for calls with no
/// response body) so callers can inspect status and headers.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: header::HeaderMap,
    pub url: Url,
}

impl ApiResponse {
    fn from_response(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }

    /// The `Location` header, set by Keycloak on `201 Created`.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// ID of a newly created resource, taken from the last segment of `Location`.
    pub fn created_id(&self) -> Option<String> {
        self.location()?
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}

/// Client for the Keycloak admin API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct Keycloak {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for Keycloak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keycloak")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Keycloak {
    /// Create a new client from the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let http = HttpClient::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: config.token,
        })
    }

    /// Create a client configured from `KEYCLOAK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Create a new client with the given token, sharing the connection pool.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    pub fn realms(&self) -> RealmsService<'_> {
        RealmsService::new(self)
    }

    pub fn roles(&self) -> RolesService<'_> {
        RolesService::new(self)
    }

    pub fn groups(&self) -> GroupsService<'_> {
        GroupsService::new(self)
    }

    pub fn clients(&self) -> ClientsService<'_> {
        ClientsService::new(self)
    }

    /// Fetch server information, including the Keycloak version.
    pub async fn server_info(&self) -> Result<(ServerInfo, ApiResponse)> {
        let req = self.request(Method::GET, &["admin", "serverinfo"])?;
        self.send_json(req).await
    }

    // ===== Request plumbing used by the services =====

    /// Resolve path segments against the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidInput(format!(
                "empty path segment in {}",
                segments.join("/")
            )));
        }

        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request with the JSON accept header and bearer token applied.
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        let mut builder = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send the request, turning non-2xx statuses into errors.
    async fn execute(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "Sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(%method, %url, status = %status, "Response received");

        if status.is_success() {
            Ok(response)
        } else {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(%method, %url, error = %e, "Failed to read error response body");
                    String::new()
                }
            };
            if status.is_server_error() {
                warn!(%method, %url, status = %status, "Request failed");
            } else {
                debug!(%method, %url, status = %status, "Request rejected");
            }
            Err(Error::from_status(status, &body))
        }
    }

    /// Send a request whose response body is not decoded.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<ApiResponse> {
        let response = self.execute(builder).await?;
        Ok(ApiResponse::from_response(&response))
    }

    /// Send a request and decode its JSON response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<(T, ApiResponse)> {
        let response = self.execute(builder).await?;
        let meta = ApiResponse::from_response(&response);
        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body).map_err(|source| Error::Decode {
            url: meta.url.to_string(),
            source,
        })?;
        Ok((value, meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> Keycloak {
        Keycloak::new(ClientConfig::new(base)).expect("valid test config")
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let kc = client("http://localhost:8080");
        let url = kc.endpoint(&["admin", "realms", "acme", "users"]).expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:8080/admin/realms/acme/users");
    }

    #[test]
    fn test_endpoint_keeps_context_path() {
        for base in ["https://sso.example.com/auth", "https://sso.example.com/auth/"] {
            let url = client(base).endpoint(&["admin", "realms"]).expect("endpoint");
            assert_eq!(url.as_str(), "https://sso.example.com/auth/admin/realms");
        }
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let kc = client("http://localhost:8080");
        let url = kc
            .endpoint(&["admin", "realms", "acme", "roles", "a/b c?"])
            .expect("endpoint");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/admin/realms/acme/roles/a%2Fb%20c%3F"
        );
    }

    #[test]
    fn test_endpoint_rejects_empty_segment() {
        let kc = client("http://localhost:8080");
        let err = kc.endpoint(&["admin", "realms", "", "users"]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            Keycloak::new(ClientConfig::new("not a url")),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Keycloak::new(ClientConfig::new("mailto:admin@example.com")),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_created_id_from_location() {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::LOCATION,
            header::HeaderValue::from_static(
                "http://localhost:8080/admin/realms/acme/users/5e2c9b1a-1111-2222-3333-444455556666",
            ),
        );
        let resp = ApiResponse {
            status: StatusCode::CREATED,
            headers,
            url: Url::parse("http://localhost:8080/admin/realms/acme/users").expect("url"),
        };
        assert_eq!(
            resp.created_id().as_deref(),
            Some("5e2c9b1a-1111-2222-3333-444455556666")
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let kc = client("http://localhost:8080").with_token("super-secret");
        let debug = format!("{:?}", kc);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
