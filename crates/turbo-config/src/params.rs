//! Connection parameters consumed by the client's session builder.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Default base path of the Turbonomic REST API.
pub const DEFAULT_BASE_PATH: &str = "/api/v3";

/// Timeout applied to every call made through one transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ─────────────────────────────────────────────────────────────────────────────
// Supporting types
// ─────────────────────────────────────────────────────────────────────────────

/// URL scheme used to reach the instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Https,
    /// Plain-text HTTP, for local mock servers.
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth2 client-credentials for a registered API client.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthCredentials {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub role: Role,
}

impl OAuthCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>, role: Role) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            role,
        }
    }

    /// True when role, client id and secret are all present.
    pub fn is_complete(&self) -> bool {
        self.role.is_set() && !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("role", &self.role)
            .finish()
    }
}

/// Identity of the application embedding the client.
///
/// Sent as `User-Agent: <origin>/<version>` when `origin` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub version: String,
}

impl ApiInfo {
    pub fn new(origin: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            version: version.into(),
        }
    }

    /// The `User-Agent` value, if an origin is configured.
    pub fn user_agent(&self) -> Option<String> {
        if self.origin.is_empty() {
            None
        } else {
            Some(format!("{}/{}", self.origin, self.version))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Connection parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Everything needed to open an authenticated session against one instance.
///
/// Exactly one credential method must be usable: a non-empty username and
/// password, or a complete [`OAuthCredentials`] set. Username/password wins
/// when both are present.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParameters {
    /// Host name, optionally with a port (`turbo.example.com:8443`).
    pub hostname: String,

    /// API base path override; [`DEFAULT_BASE_PATH`] when unset.
    #[serde(default)]
    pub base_path: Option<String>,

    #[serde(default)]
    pub scheme: Scheme,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub oauth: Option<OAuthCredentials>,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub skip_verify: bool,

    #[serde(default)]
    pub api_info: Option<ApiInfo>,

    /// Request timeout in seconds; [`DEFAULT_TIMEOUT`] when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionParameters {
    /// Create parameters for a host with no credentials yet.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    /// Set username/password credentials.
    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set OAuth2 client credentials.
    pub fn with_oauth(mut self, credentials: OAuthCredentials) -> Self {
        self.oauth = Some(credentials);
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_skip_verify(mut self, skip_verify: bool) -> Self {
        self.skip_verify = skip_verify;
        self
    }

    pub fn with_api_info(mut self, api_info: ApiInfo) -> Self {
        self.api_info = Some(api_info);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Base path actually used for requests.
    pub fn effective_base_path(&self) -> &str {
        match self.base_path.as_deref() {
            Some(path) if !path.is_empty() => path,
            _ => DEFAULT_BASE_PATH,
        }
    }

    /// Timeout actually applied to the transport.
    pub fn effective_timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn has_login(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    pub fn has_complete_oauth(&self) -> bool {
        self.oauth.as_ref().is_some_and(OAuthCredentials::is_complete)
    }

    /// `User-Agent` value derived from [`ApiInfo`], if any.
    pub fn user_agent(&self) -> Option<String> {
        self.api_info.as_ref().and_then(ApiInfo::user_agent)
    }
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("hostname", &self.hostname)
            .field("base_path", &self.base_path)
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("oauth", &self.oauth)
            .field("skip_verify", &self.skip_verify)
            .field("api_info", &self.api_info)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}
