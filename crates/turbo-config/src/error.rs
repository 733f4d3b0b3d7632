//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or validating connection settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Role string does not name a known platform role.
    #[error("unrecognized Turbonomic role '{0}'")]
    UnknownRole(String),

    /// Missing required field.
    #[error("missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    /// A value was present but could not be interpreted.
    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },

    /// No default config location could be determined.
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
}
