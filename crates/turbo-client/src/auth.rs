//! Authenticator.
//!
//! Runs the handshake from a [`HandshakePlan`] and turns the outcome into an
//! authenticated [`TurboClient`]:
//!
//! - username/password: one form post to `<base>/login`; the session lives
//!   in the cookie jar.
//! - OAuth2 client credentials: `client_secret_basic` first, then exactly one
//!   `client_secret_post` retry if the server answered 401. The token from the
//!   successful attempt becomes a default `Authorization: Bearer` header.
//!
//! Any status of 400 or above on the final attempt is terminal.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use turbo_config::ConnectionParameters;

use crate::client::TurboClient;
use crate::error::{Error, Result};
use crate::logging::{LogContext, Logger, default_logger};
use crate::session::{
    self, AuthMethod, FORM_CONTENT_TYPE, HandshakeAttempt, HandshakePlan, Transport,
};

/// Token endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    pub access_token: String,
    pub scope: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// How the session is carried after a successful handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Login set session cookies in the transport's jar.
    CookieSession,
    /// The token endpoint issued a token.
    BearerToken(TokenResponse),
}

/// Result of a successful handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// The method whose attempt succeeded.
    pub method: AuthMethod,
    pub outcome: AuthOutcome,
}

/// Authenticates against a Turbonomic instance.
///
/// ```no_run
/// use turbo_client::{Authenticator, ConnectionParameters};
///
/// # async fn example() -> turbo_client::Result<()> {
/// let params = ConnectionParameters::new("turbo.example.com").with_login("admin", "secret");
/// let client = Authenticator::new(params).authenticate().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Authenticator {
    params: ConnectionParameters,
    logger: Arc<dyn Logger>,
    context: LogContext,
}

impl Authenticator {
    pub fn new(params: ConnectionParameters) -> Self {
        Self {
            params,
            logger: default_logger(),
            context: LogContext::default(),
        }
    }

    /// Report progress through `logger` instead of `tracing`.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    /// Run the handshake and return an authenticated client.
    ///
    /// Configuration problems are reported before any request is sent.
    pub async fn authenticate(self) -> Result<TurboClient> {
        let (transport, plan) = session::build(&self.params)?;
        let result = self.run_handshake(&transport, &plan).await?;

        let mut headers = HeaderMap::new();
        if let AuthOutcome::BearerToken(token) = &result.outcome
            && !token.access_token.is_empty()
        {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.access_token))
                .map_err(|_| Error::InvalidHeader(AUTHORIZATION.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(agent) = &plan.user_agent {
            let value = HeaderValue::from_str(agent)
                .map_err(|_| Error::InvalidHeader(USER_AGENT.to_string()))?;
            headers.insert(USER_AGENT, value);
        }

        Ok(TurboClient::from_parts(
            transport,
            plan.base_url,
            headers,
            self.logger,
            self.context,
        ))
    }

    /// Send the planned attempt(s) and classify the final response.
    pub async fn run_handshake(
        &self,
        transport: &Transport,
        plan: &HandshakePlan,
    ) -> Result<AuthResult> {
        let ua = plan.user_agent.as_deref();
        let mut attempt = &plan.primary;
        let mut response = send_attempt(transport, attempt, ua).await?;

        if let Some(fallback) = fallback_for(response.status(), plan) {
            self.logger.debug(
                &self.context,
                &format!(
                    "authentication failed for {} method, trying {}",
                    attempt.method, fallback.method
                ),
            );
            attempt = fallback;
            response = send_attempt(transport, attempt, ua).await?;
        }

        let status = response.status();
        if status.as_u16() >= 400 {
            let status_line = status_line(status);
            self.logger.error_with(
                &self.context,
                "failed to establish a connection with the Turbonomic instance",
                &[("status", status_line.as_str())],
            );
            return Err(Error::AuthenticationRejected {
                status: status.as_u16(),
                status_line,
            });
        }

        let outcome = if attempt.method.is_oauth() {
            let body = response.bytes().await?;
            let token: TokenResponse = serde_json::from_slice(&body).inspect_err(|e| {
                self.logger.error(
                    &self.context,
                    &format!("failed to decode token response: {}", e),
                );
            })?;
            AuthOutcome::BearerToken(token)
        } else {
            AuthOutcome::CookieSession
        };

        self.logger.debug(
            &self.context,
            &format!(
                "successfully logged into Turbonomic using {} authentication method",
                attempt.method
            ),
        );

        Ok(AuthResult {
            method: attempt.method,
            outcome,
        })
    }
}

/// The fallback attempt to send after `status`, if any.
///
/// Only an exact 401 on the primary attempt triggers it. The fallback is
/// sent with the primary attempt's `User-Agent` too, whenever an API identity
/// is configured; only the credentials placement differs between the two.
pub(crate) fn fallback_for(status: StatusCode, plan: &HandshakePlan) -> Option<&HandshakeAttempt> {
    if status == StatusCode::UNAUTHORIZED {
        plan.fallback.as_ref()
    } else {
        None
    }
}

async fn send_attempt(
    transport: &Transport,
    attempt: &HandshakeAttempt,
    user_agent: Option<&str>,
) -> Result<reqwest::Response> {
    let mut request = transport
        .http
        .post(attempt.url.clone())
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(attempt.body.clone());
    if let Some(agent) = user_agent {
        request = request.header(USER_AGENT, agent);
    }
    if let Some(basic) = &attempt.basic_auth {
        request = request.header(AUTHORIZATION, basic.as_str());
    }
    Ok(request.send().await?)
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_config::{OAuthCredentials, Role};

    fn oauth_plan() -> HandshakePlan {
        let params = ConnectionParameters::new("turbo.local").with_oauth(OAuthCredentials::new(
            "id",
            "secret",
            Role::Administrator,
        ));
        session::plan(&params).unwrap()
    }

    #[test]
    fn test_fallback_only_on_exact_401() {
        let plan = oauth_plan();
        let fallback = fallback_for(StatusCode::UNAUTHORIZED, &plan).unwrap();
        assert_eq!(fallback.method, AuthMethod::ClientSecretPost);

        for status in [
            StatusCode::OK,
            StatusCode::BAD_REQUEST,
            StatusCode::FORBIDDEN,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert!(fallback_for(status, &plan).is_none());
        }
    }

    #[test]
    fn test_login_plan_never_falls_back() {
        let params = ConnectionParameters::new("turbo.local").with_login("u", "p");
        let plan = session::plan(&params).unwrap();
        assert!(fallback_for(StatusCode::UNAUTHORIZED, &plan).is_none());
    }

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(StatusCode::UNAUTHORIZED), "401 Unauthorized");
        assert_eq!(status_line(StatusCode::FORBIDDEN), "403 Forbidden");
    }

    #[test]
    fn test_token_response_defaults_missing_fields() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, 0);

        let full: TokenResponse = serde_json::from_str(
            r#"{"access_token":"admin_token","scope":"role:ADMINISTRATOR","token_type":"Bearer","expires_in":600}"#,
        )
        .unwrap();
        assert_eq!(full.token_type, "Bearer");
        assert_eq!(full.expires_in, 600);
    }

    #[tokio::test]
    async fn test_incomplete_credentials_fail_before_io() {
        let params = ConnectionParameters::new("127.0.0.1:1")
            .with_oauth(OAuthCredentials::new("id", "", Role::Observer));
        let err = Authenticator::new(params).authenticate().await.unwrap_err();
        assert!(err.is_config_error());
    }
}
