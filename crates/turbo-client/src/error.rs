//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Network, DNS or TLS failure reaching the instance.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No usable credential combination, or otherwise unusable settings.
    /// Raised before any network I/O.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login or token endpoint answered with a terminal error status.
    #[error("Authentication rejected: {status_line}")]
    AuthenticationRejected {
        /// HTTP status code.
        status: u16,
        /// Status line, e.g. `401 Unauthorized`.
        status_line: String,
    },

    /// An authenticated call answered with status 400 or above.
    ///
    /// The message is the response body text; the raw bytes are kept so
    /// callers can decode structured error payloads.
    #[error("{message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        message: String,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// A header name or value supplied by the caller is not valid HTTP.
    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    /// Search-by-name does not know a filter for this entity type.
    #[error("entity type of {0} not supported")]
    UnsupportedEntityType(String),
}

impl From<turbo_config::ConfigError> for Error {
    fn from(e: turbo_config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

impl Error {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::AuthenticationRejected { status, .. } | Error::RequestFailed { status, .. } => {
                Some(*status)
            }
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body of a failed request.
    pub fn response_body(&self) -> Option<&[u8]> {
        match self {
            Error::RequestFailed { body, .. } => Some(body.as_slice()),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::RequestFailed { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::AuthenticationRejected { .. } | Error::RequestFailed { status: 401, .. }
        )
    }

    /// Check if this error was raised before any network I/O.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_displays_body_text() {
        let err = Error::RequestFailed {
            status: 400,
            message: r#"{"type":"Error","message":"bad uuid"}"#.to_string(),
            body: br#"{"type":"Error","message":"bad uuid"}"#.to_vec(),
        };
        assert_eq!(err.to_string(), r#"{"type":"Error","message":"bad uuid"}"#);
        assert_eq!(err.status(), Some(400));
        assert!(err.response_body().is_some());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_classification_helpers() {
        let rejected = Error::AuthenticationRejected {
            status: 401,
            status_line: "401 Unauthorized".to_string(),
        };
        assert!(rejected.is_auth_error());
        assert_eq!(rejected.to_string(), "Authentication rejected: 401 Unauthorized");

        let missing = Error::RequestFailed {
            status: 404,
            message: String::new(),
            body: Vec::new(),
        };
        assert!(missing.is_not_found());

        let config = Error::Config("no credentials".to_string());
        assert!(config.is_config_error());
        assert_eq!(config.status(), None);
    }

    #[test]
    fn test_unknown_role_converts_to_config_error() {
        let err: Error = "NOBODY".parse::<turbo_config::Role>().unwrap_err().into();
        assert!(err.is_config_error());
    }
}
