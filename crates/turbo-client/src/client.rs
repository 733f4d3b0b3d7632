//! Authenticated client and request dispatcher.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::CookieStore;
use reqwest::header::{
    AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use serde::de::DeserializeOwned;
use turbo_config::{ApiInfo, ConnectionParameters, DEFAULT_TIMEOUT};
use url::Url;

use crate::api::{ActionsApi, EntitiesApi, SearchApi, StatsApi, TagsApi};
use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::logging::{LogContext, Logger, default_logger};
use crate::request::RequestDescriptor;
use crate::session::Transport;

/// Authenticated Turbonomic API client.
///
/// Cloning is cheap; clones share the transport, cookie jar and default
/// headers, so concurrent calls reuse one session.
///
/// # Example
///
/// ```no_run
/// use turbo_client::{ConnectionParameters, EntityRequest, TurboClient};
///
/// # async fn example() -> turbo_client::Result<()> {
/// let params = ConnectionParameters::new("turbo.example.com").with_login("admin", "secret");
/// let client = TurboClient::connect(&params).await?;
///
/// let entity = client.entities().get(&EntityRequest::new("75941320319680")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TurboClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) cookies: Arc<reqwest::cookie::Jar>,
    /// `<scheme>://<host><base-path>` without a trailing slash.
    pub(crate) base_url: String,
    /// Headers sent on every call: `Authorization` and `User-Agent`.
    pub(crate) default_headers: HeaderMap,
    pub(crate) timeout: Duration,
    pub(crate) logger: Arc<dyn Logger>,
    pub(crate) log_context: LogContext,
}

impl fmt::Debug for TurboClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<&str> = self
            .inner
            .default_headers
            .keys()
            .map(HeaderName::as_str)
            .collect();
        f.debug_struct("TurboClient")
            .field("base_url", &self.inner.base_url)
            .field("default_headers", &headers)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl TurboClient {
    /// Authenticate with `params` using the default logger.
    pub async fn connect(params: &ConnectionParameters) -> Result<Self> {
        Authenticator::new(params.clone()).authenticate().await
    }

    /// Builder for a client around an already established session.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(
        transport: Transport,
        base_url: String,
        default_headers: HeaderMap,
        logger: Arc<dyn Logger>,
        log_context: LogContext,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: transport.http,
                cookies: transport.cookies,
                base_url,
                default_headers,
                timeout: transport.timeout,
                logger,
                log_context,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.inner.default_headers
    }

    /// Value of a default header, if set and printable.
    pub fn default_header(&self, name: &str) -> Option<&str> {
        self.inner
            .default_headers
            .get(name)
            .and_then(|v| v.to_str().ok())
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// The `Cookie` header the jar would send to the base URL.
    pub fn session_cookies(&self) -> Option<String> {
        let url = Url::parse(&self.inner.base_url).ok()?;
        self.inner
            .cookies
            .cookies(&url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the entities API.
    pub fn entities(&self) -> EntitiesApi {
        EntitiesApi::new(self.clone())
    }

    /// Access the tags API.
    pub fn tags(&self) -> TagsApi {
        TagsApi::new(self.clone())
    }

    /// Access the actions API.
    pub fn actions(&self) -> ActionsApi {
        ActionsApi::new(self.clone())
    }

    /// Access the search API.
    pub fn search(&self) -> SearchApi {
        SearchApi::new(self.clone())
    }

    /// Access the statistics API.
    pub fn stats(&self) -> StatsApi {
        StatsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Send one request over the session and return the full response body.
    ///
    /// Every call goes to the network; nothing is retried or cached. A status
    /// of 400 or above becomes [`Error::RequestFailed`] carrying the body.
    pub async fn dispatch(&self, request: RequestDescriptor) -> Result<Vec<u8>> {
        let url = build_url(&self.inner.base_url, &request.path, &request.query)?;
        let headers = self.merge_headers(&request.headers)?;

        let mut builder = self
            .inner
            .http
            .request(request.method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.inspect_err(|e| {
            self.inner.logger.error(
                &self.inner.log_context,
                &format!("{} {} failed: {}", request.method, url.path(), e),
            );
        })?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        self.inner.logger.debug(
            &self.inner.log_context,
            &format!("{} {} -> {}", request.method, url.path(), status.as_u16()),
        );

        if status.as_u16() >= 400 {
            return Err(Error::RequestFailed {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
                body,
            });
        }

        Ok(body)
    }

    /// Dispatch and decode the response body as JSON.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<T> {
        let body = self.dispatch(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `Content-Type: application/json`, then the defaults, then the
    /// per-call headers; later layers replace earlier ones.
    fn merge_headers(&self, overrides: &HashMap<String, String>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &self.inner.default_headers {
            headers.insert(name.clone(), value.clone());
        }
        for (name, value) in overrides {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidHeader(name.clone()))?;
            let value =
                HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(name.clone()))?;
            headers.insert(header, value);
        }
        Ok(headers)
    }
}

/// Append `path` to `base` and set each query key, in key order.
///
/// Keys already present in `path` are overwritten, so every key appears at
/// most once.
pub(crate) fn build_url(base: &str, path: &str, query: &HashMap<String, String>) -> Result<Url> {
    let mut url = Url::parse(&format!("{}{}", base, path))?;
    if !query.is_empty() {
        let mut merged: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
        merged.extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
        url.query_pairs_mut().clear().extend_pairs(merged);
    }
    Ok(url)
}

/// Builder for a [`TurboClient`] around an existing session.
///
/// Use this when a bearer token or session cookie was obtained elsewhere;
/// [`TurboClient::connect`] runs the full handshake instead.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    bearer_token: Option<String>,
    session_cookie: Option<String>,
    headers: Vec<(String, String)>,
    api_info: Option<ApiInfo>,
    skip_verify: bool,
    timeout: Duration,
    logger: Option<Arc<dyn Logger>>,
    log_context: LogContext,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            bearer_token: None,
            session_cookie: None,
            headers: Vec::new(),
            api_info: None,
            skip_verify: false,
            timeout: DEFAULT_TIMEOUT,
            logger: None,
            log_context: LogContext::default(),
        }
    }

    /// Full base URL, e.g. `https://turbo.example.com/api/v3`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Seed the cookie jar with a `name=value` session cookie.
    pub fn session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Add a default header sent on every call.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn api_info(mut self, info: ApiInfo) -> Self {
        self.api_info = Some(info);
        self
    }

    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn log_context(mut self, context: LogContext) -> Self {
        self.log_context = context;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<TurboClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)?;

        let transport = Transport::new(self.skip_verify, self.timeout)?;
        if let Some(cookie) = &self.session_cookie {
            transport.cookies.add_cookie_str(cookie, &parsed);
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = self.bearer_token.filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::InvalidHeader(AUTHORIZATION.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(agent) = self.api_info.as_ref().and_then(ApiInfo::user_agent) {
            let value = HeaderValue::from_str(&agent)
                .map_err(|_| Error::InvalidHeader(USER_AGENT.to_string()))?;
            headers.insert(USER_AGENT, value);
        }
        for (name, value) in &self.headers {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidHeader(name.clone()))?;
            let value =
                HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(name.clone()))?;
            headers.insert(header, value);
        }

        Ok(TurboClient::from_parts(
            transport,
            base_url,
            headers,
            self.logger.unwrap_or_else(default_logger),
            self.log_context,
        ))
    }
}
