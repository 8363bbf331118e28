//! HTTP server configuration settings.

use std::net::SocketAddr;

use secrecy::SecretString;
use serde::Deserialize;

/// HTTP server configuration settings.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// The socket address the server should listen on.
    pub listen_address: Option<SocketAddr>,
    /// Health endpoint configuration.
    pub health: HealthConfig,
    /// Bearer token verification for the protected client routes.
    pub auth: Option<AuthConfig>,
}

impl ServerConfig {
    /// Returns whether the authentication gate is configured for this server.
    pub fn uses_auth(&self) -> bool {
        self.auth.is_some()
    }
}

/// Health endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    /// Whether the health endpoint is mounted.
    pub enabled: bool,
    /// The path of the health endpoint.
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/health".to_string(),
        }
    }
}

/// HS256 JWT verification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Shared secret the tokens are signed with.
    pub jwt_secret: SecretString,
    /// Expected `iss` claim, if any.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Audience that must be present in the `aud` claim, if any.
    #[serde(default)]
    pub audience: Option<String>,
}
