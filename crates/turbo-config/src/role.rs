//! Platform roles requested through the OAuth2 `scope=role:<ROLE>` parameter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// A Turbonomic user role.
///
/// `Unset` renders as an empty string, which the authenticator treats as an
/// incomplete OAuth credential set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Unset,
    Administrator,
    SiteAdmin,
    Automator,
    Deployer,
    Advisor,
    Observer,
    OperationalObserver,
    SharedAdvisor,
    SharedObserver,
    ReportEditor,
}

impl Role {
    /// All assignable roles, in platform order.
    pub const ALL: [Role; 10] = [
        Role::Administrator,
        Role::SiteAdmin,
        Role::Automator,
        Role::Deployer,
        Role::Advisor,
        Role::Observer,
        Role::OperationalObserver,
        Role::SharedAdvisor,
        Role::SharedObserver,
        Role::ReportEditor,
    ];

    /// Wire name of the role, as used in the OAuth2 scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Unset => "",
            Role::Administrator => "ADMINISTRATOR",
            Role::SiteAdmin => "SITE_ADMIN",
            Role::Automator => "AUTOMATOR",
            Role::Deployer => "DEPLOYER",
            Role::Advisor => "ADVISOR",
            Role::Observer => "OBSERVER",
            Role::OperationalObserver => "OPERATIONAL_OBSERVER",
            Role::SharedAdvisor => "SHARED_ADVISOR",
            Role::SharedObserver => "SHARED_OBSERVER",
            Role::ReportEditor => "REPORT_EDITOR",
        }
    }

    pub fn is_set(&self) -> bool {
        !self.as_str().is_empty()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ConfigError;

    /// Case-insensitive parse. Unknown names are an error, never a panic.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == upper)
            .ok_or_else(|| ConfigError::UnknownRole(s.to_string()))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(Role::Unset);
        }
        raw.parse().map_err(serde::de::Error::custom)
    }
}
