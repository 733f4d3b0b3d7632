//! Settings for tests that run against a live instance.
//!
//! Live tests are opt-in: they only run when `INTEGRATION` is set, and read
//! their connection and fixture data from the environment for that run.

use crate::Result;
use crate::discovery::{apply_env_overrides, parse_bool};
use crate::params::ConnectionParameters;

/// Gate variable for live tests.
pub const INTEGRATION_ENV: &str = "INTEGRATION";

/// UUID of an entity known to exist on the instance.
pub const ENTITY_UUID_ENV: &str = "TURBO_TEST_ENTITY_UUID";

/// Display name of that entity, used for search-by-name checks.
pub const ENTITY_NAME_ENV: &str = "TURBO_TEST_ENTITY_NAME";

/// Connection and fixture data for one live test run.
#[derive(Debug, Clone)]
pub struct IntegrationConfig {
    pub params: ConnectionParameters,
    pub entity_uuid: Option<String>,
    pub entity_name: Option<String>,
}

impl IntegrationConfig {
    /// Read from the process environment.
    ///
    /// Returns `Ok(None)` when `INTEGRATION` is unset, meaning live tests
    /// should be skipped.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(INTEGRATION_ENV).filter(|v| !v.is_empty()) {
            None => return Ok(None),
            Some(flag) if !parse_bool(INTEGRATION_ENV, &flag).unwrap_or(true) => return Ok(None),
            Some(_) => {}
        }

        // Live instances commonly use self-signed certificates.
        let defaults = ConnectionParameters::default().with_skip_verify(true);
        let params = apply_env_overrides(defaults, &lookup)?;

        Ok(Some(Self {
            params,
            entity_uuid: lookup(ENTITY_UUID_ENV).filter(|v| !v.is_empty()),
            entity_name: lookup(ENTITY_NAME_ENV).filter(|v| !v.is_empty()),
        }))
    }
}
