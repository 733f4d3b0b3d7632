//! Session builder.
//!
//! Turns [`ConnectionParameters`] into a [`Transport`] (TLS toggle, cookie
//! jar, timeout) and a [`HandshakePlan`] describing the login request(s) the
//! authenticator will send. Nothing here touches the network.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::cookie::Jar;
use turbo_config::{ConnectionParameters, OAuthCredentials};
use url::Url;

use crate::error::{Error, Result};

/// Content type of both handshake form posts.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ─────────────────────────────────────────────────────────────────────────────
// Transport
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP transport shared by the handshake and every later call.
#[derive(Debug, Clone)]
pub struct Transport {
    pub(crate) http: reqwest::Client,
    pub(crate) cookies: Arc<Jar>,
    pub(crate) timeout: Duration,
}

impl Transport {
    /// Build a transport with its own cookie jar.
    ///
    /// TLS certificates are verified unless `skip_verify` is set.
    pub fn new(skip_verify: bool, timeout: Duration) -> Result<Self> {
        let cookies = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .danger_accept_invalid_certs(skip_verify)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            cookies,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Credential selection
// ─────────────────────────────────────────────────────────────────────────────

/// How a handshake attempt presents its credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Form login against `<base>/login`; the session lives in cookies.
    UsernamePassword,
    /// OAuth2 client credentials in a Basic `Authorization` header.
    ClientSecretBasic,
    /// OAuth2 client credentials in the form body.
    ClientSecretPost,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::UsernamePassword => "username/password",
            AuthMethod::ClientSecretBasic => "client_secret_basic",
            AuthMethod::ClientSecretPost => "client_secret_post",
        }
    }

    pub fn is_oauth(&self) -> bool {
        !matches!(self, AuthMethod::UsernamePassword)
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The credential method chosen for a set of parameters.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialDescriptor {
    Login { username: String, password: String },
    OAuth(OAuthCredentials),
}

impl CredentialDescriptor {
    /// Pick the credential method.
    ///
    /// Username/password wins when both are usable; an incomplete OAuth set
    /// (missing id, secret or role) counts as absent.
    pub fn select(params: &ConnectionParameters) -> Result<Self> {
        if params.has_login() {
            return Ok(CredentialDescriptor::Login {
                username: params.username.clone(),
                password: params.password.clone(),
            });
        }
        match &params.oauth {
            Some(oauth) if oauth.is_complete() => Ok(CredentialDescriptor::OAuth(oauth.clone())),
            _ => Err(Error::Config(
                "provide valid credentials: username/password or oauth2".to_string(),
            )),
        }
    }
}

impl fmt::Debug for CredentialDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialDescriptor::Login { username, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .finish_non_exhaustive(),
            CredentialDescriptor::OAuth(oauth) => f.debug_tuple("OAuth").field(oauth).finish(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handshake plan
// ─────────────────────────────────────────────────────────────────────────────

/// One form post of the handshake.
#[derive(Clone)]
pub struct HandshakeAttempt {
    pub method: AuthMethod,
    pub url: Url,
    /// Form-encoded body.
    pub body: String,
    /// Complete `Authorization` header value, for client_secret_basic.
    pub basic_auth: Option<String>,
}

impl fmt::Debug for HandshakeAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandshakeAttempt")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

/// The unauthenticated request(s) the authenticator will send.
#[derive(Debug, Clone)]
pub struct HandshakePlan {
    /// `<scheme>://<host><base-path>`, without a trailing slash.
    pub base_url: String,
    /// `User-Agent` derived from the API identity, if any.
    pub user_agent: Option<String>,
    pub primary: HandshakeAttempt,
    /// Sent at most once, only when the primary attempt returns 401.
    pub fallback: Option<HandshakeAttempt>,
}

/// Prepare the transport and handshake for `params`.
///
/// Fails with [`Error::Config`] when no credential method applies.
pub fn build(params: &ConnectionParameters) -> Result<(Transport, HandshakePlan)> {
    let plan = plan(params)?;
    let transport = Transport::new(params.skip_verify, params.effective_timeout())?;
    Ok((transport, plan))
}

/// Build the handshake plan alone.
pub fn plan(params: &ConnectionParameters) -> Result<HandshakePlan> {
    if params.hostname.is_empty() {
        return Err(Error::Config("hostname is required".to_string()));
    }

    let credentials = CredentialDescriptor::select(params)?;
    let origin = format!("{}://{}", params.scheme, params.hostname);
    let base_url = format!("{}{}", origin, params.effective_base_path())
        .trim_end_matches('/')
        .to_string();
    Url::parse(&base_url)?;

    let (primary, fallback) = match credentials {
        CredentialDescriptor::Login { username, password } => {
            let primary = HandshakeAttempt {
                method: AuthMethod::UsernamePassword,
                url: Url::parse(&format!("{}/login", base_url))?,
                body: format!(
                    "username={}&password={}",
                    urlencoding::encode(&username),
                    urlencoding::encode(&password)
                ),
                basic_auth: None,
            };
            (primary, None)
        }
        CredentialDescriptor::OAuth(oauth) => {
            let url = Url::parse(&format!("{}/oauth2/token", origin))?;
            let scope = format!("grant_type=client_credentials&scope=role:{}", oauth.role);
            let basic = STANDARD.encode(format!("{}:{}", oauth.client_id, oauth.client_secret));

            let primary = HandshakeAttempt {
                method: AuthMethod::ClientSecretBasic,
                url: url.clone(),
                body: scope.clone(),
                basic_auth: Some(format!("Basic {}", basic)),
            };
            let fallback = HandshakeAttempt {
                method: AuthMethod::ClientSecretPost,
                url,
                body: format!(
                    "{}&client_id={}&client_secret={}",
                    scope,
                    urlencoding::encode(&oauth.client_id),
                    urlencoding::encode(&oauth.client_secret)
                ),
                basic_auth: None,
            };
            (primary, Some(fallback))
        }
    };

    Ok(HandshakePlan {
        base_url,
        user_agent: params.user_agent(),
        primary,
        fallback,
    })
}
