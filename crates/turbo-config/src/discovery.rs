//! Config file discovery and environment overrides.
//!
//! Resolution order (later overrides earlier):
//! 1. `client.toml` in the config directory (`TURBO_CONFIG_DIR` or the
//!    platform default, e.g. `~/.config/turbo`)
//! 2. `TURBO_*` environment variables

use std::path::{Path, PathBuf};

use crate::params::{ConnectionParameters, Scheme};
use crate::{ConfigError, Result};

/// Default config filename within the config directory.
const CLIENT_CONFIG_FILE: &str = "client.toml";

/// Application name for config directory resolution.
const APP_NAME: &str = "turbo";

/// Environment variable to override the config directory.
pub const CONFIG_DIR_ENV: &str = "TURBO_CONFIG_DIR";

pub const HOSTNAME_ENV: &str = "TURBO_HOSTNAME";
pub const BASE_PATH_ENV: &str = "TURBO_BASE_PATH";
pub const SCHEME_ENV: &str = "TURBO_SCHEME";
pub const USERNAME_ENV: &str = "TURBO_USERNAME";
pub const PASSWORD_ENV: &str = "TURBO_PASSWORD";
pub const CLIENT_ID_ENV: &str = "TURBO_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "TURBO_CLIENT_SECRET";
pub const ROLE_ENV: &str = "TURBO_ROLE";
pub const SKIP_VERIFY_ENV: &str = "TURBO_SKIP_VERIFY";
pub const API_ORIGIN_ENV: &str = "TURBO_API_ORIGIN";
pub const API_VERSION_ENV: &str = "TURBO_API_VERSION";
pub const TIMEOUT_ENV: &str = "TURBO_TIMEOUT_SECS";

/// Result of config discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged parameters.
    pub params: ConnectionParameters,
    /// Config file that was read, if any.
    pub source: Option<PathBuf>,
    /// Warnings generated during loading (e.g. plaintext secrets in the file).
    pub warnings: Vec<String>,
}

/// Platform config directory for the client.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Default path of the client config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CLIENT_CONFIG_FILE))
}

/// Parse parameters from a TOML string.
pub fn from_toml(contents: &str) -> Result<ConnectionParameters> {
    Ok(toml::from_str(contents)?)
}

/// Load parameters from a specific file (no discovery, no env overrides).
pub fn load_config_file(path: &Path) -> Result<ConnectionParameters> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    from_toml(&contents)
}

/// Load parameters from the process environment only.
pub fn from_env() -> Result<ConnectionParameters> {
    apply_env_overrides(ConnectionParameters::default(), |key| std::env::var(key).ok())
}

/// Discover the config file, apply environment overrides and validate.
///
/// `path` overrides the default location. A missing file is not an error as
/// long as the environment supplies a hostname.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    load_config_with_lookup(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit variable lookup, so callers (and tests)
/// never have to mutate the process environment.
pub fn load_config_with_lookup<F>(path: Option<&Path>, lookup: F) -> Result<LoadedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();

    let path = path.map(Path::to_path_buf).or_else(config_path);
    let (params, source) = match path {
        Some(path) if path.exists() => {
            let params = load_config_file(&path)?;
            check_plaintext_secrets(&params, &path, &mut warnings);
            (params, Some(path))
        }
        _ => (ConnectionParameters::default(), None),
    };

    let params = apply_env_overrides(params, lookup)?;
    if params.hostname.is_empty() {
        return Err(ConfigError::MissingField {
            field: "hostname".to_string(),
            context: format!(
                "client config (set it in {} or {})",
                CLIENT_CONFIG_FILE, HOSTNAME_ENV
            ),
        });
    }

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    Ok(LoadedConfig {
        params,
        source,
        warnings,
    })
}

/// Overlay `TURBO_*` variables on top of `params`.
///
/// Empty variables are ignored.
pub fn apply_env_overrides<F>(
    mut params: ConnectionParameters,
    lookup: F,
) -> Result<ConnectionParameters>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(hostname) = get(HOSTNAME_ENV) {
        params.hostname = hostname;
    }
    if let Some(base_path) = get(BASE_PATH_ENV) {
        params.base_path = Some(base_path);
    }
    if let Some(scheme) = get(SCHEME_ENV) {
        params.scheme = parse_scheme(&scheme)?;
    }
    if let Some(username) = get(USERNAME_ENV) {
        params.username = username;
    }
    if let Some(password) = get(PASSWORD_ENV) {
        params.password = password;
    }

    let client_id = get(CLIENT_ID_ENV);
    let client_secret = get(CLIENT_SECRET_ENV);
    let role = get(ROLE_ENV);
    if client_id.is_some() || client_secret.is_some() || role.is_some() {
        let mut oauth = params.oauth.take().unwrap_or_default();
        if let Some(client_id) = client_id {
            oauth.client_id = client_id;
        }
        if let Some(client_secret) = client_secret {
            oauth.client_secret = client_secret;
        }
        if let Some(role) = role {
            oauth.role = role.parse()?;
        }
        params.oauth = Some(oauth);
    }

    if let Some(skip) = get(SKIP_VERIFY_ENV) {
        params.skip_verify = parse_bool(SKIP_VERIFY_ENV, &skip)?;
    }

    let origin = get(API_ORIGIN_ENV);
    let version = get(API_VERSION_ENV);
    if origin.is_some() || version.is_some() {
        let mut info = params.api_info.take().unwrap_or_default();
        if let Some(origin) = origin {
            info.origin = origin;
        }
        if let Some(version) = version {
            info.version = version;
        }
        params.api_info = Some(info);
    }

    if let Some(timeout) = get(TIMEOUT_ENV) {
        let secs = timeout.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
            field: TIMEOUT_ENV.to_string(),
            value: timeout.clone(),
        })?;
        params.timeout_secs = Some(secs);
    }

    Ok(params)
}

fn parse_scheme(value: &str) -> Result<Scheme> {
    match value.to_ascii_lowercase().as_str() {
        "https" => Ok(Scheme::Https),
        "http" => Ok(Scheme::Http),
        _ => Err(ConfigError::InvalidValue {
            field: SCHEME_ENV.to_string(),
            value: value.to_string(),
        }),
    }
}

pub(crate) fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

fn check_plaintext_secrets(params: &ConnectionParameters, path: &Path, warnings: &mut Vec<String>) {
    if !params.password.is_empty() {
        warnings.push(format!(
            "password stored in plaintext in {}; prefer {}",
            path.display(),
            PASSWORD_ENV
        ));
    }
    if params
        .oauth
        .as_ref()
        .is_some_and(|o| !o.client_secret.is_empty())
    {
        warnings.push(format!(
            "OAuth client secret stored in plaintext in {}; prefer {}",
            path.display(),
            CLIENT_SECRET_ENV
        ));
    }
}
