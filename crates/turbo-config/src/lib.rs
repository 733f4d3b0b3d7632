//! Connection configuration for the Turbonomic API client.
//!
//! Provides:
//! - [`ConnectionParameters`]: host, base path, credentials, TLS and identity
//!   settings consumed by the client's session builder
//! - [`Role`]: the platform roles an OAuth2 client can request
//! - TOML file loading with `TURBO_*` environment overrides
//! - [`IntegrationConfig`] for opt-in live test runs

pub mod discovery;
pub mod error;
pub mod integration;
pub mod params;
pub mod role;

pub use discovery::{
    LoadedConfig, apply_env_overrides, config_dir, config_path, from_env, from_toml, load_config,
    load_config_file, load_config_with_lookup,
};
pub use error::{ConfigError, Result};
pub use integration::IntegrationConfig;
pub use params::{
    ApiInfo, ConnectionParameters, DEFAULT_BASE_PATH, DEFAULT_TIMEOUT, OAuthCredentials, Scheme,
};
pub use role::Role;
