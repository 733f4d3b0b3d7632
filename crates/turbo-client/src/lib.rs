//! HTTP client for the Turbonomic REST API.
//!
//! Authenticates once (form login or OAuth2 client credentials) and then
//! dispatches typed requests over the resulting session.
//!
//! # Example
//!
//! ```no_run
//! use turbo_client::{ActionsRequest, ConnectionParameters, OAuthCredentials, Role, TurboClient};
//!
//! # async fn example() -> turbo_client::Result<()> {
//! let params = ConnectionParameters::new("turbo.example.com").with_oauth(OAuthCredentials::new(
//!     "client-id",
//!     "client-secret",
//!     Role::Observer,
//! ));
//! let client = TurboClient::connect(&params).await?;
//!
//! let actions = client
//!     .actions()
//!     .by_uuid(
//!         &ActionsRequest::new("75941320319680")
//!             .with_states(["READY"])
//!             .with_types(["RESIZE"]),
//!     )
//!     .await?;
//! for action in actions {
//!     println!("{}: {}", action.uuid, action.details);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Entities**: fetch an entity by UUID
//! - **Tags**: read and add entity tags
//! - **Actions**: list an entity's actions by state and type
//! - **Search**: arbitrary searches and lookup by name
//! - **Stats**: per-entity statistics over a time window
//!
//! Anything else is reachable through [`TurboClient::dispatch`].

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod logging;
pub mod request;
pub mod session;
pub mod types;

pub use api::{
    ActionsRequest, EntityRequest, SearchRequest, StatsRequest, TagEntityRequest, filter_type,
};
pub use auth::{AuthOutcome, AuthResult, Authenticator, TokenResponse};
pub use client::{ClientBuilder, TurboClient};
pub use error::{Error, Result};
pub use logging::{LogContext, LogField, Logger, NoopLogger, TracingLogger, init_logging};
pub use request::{CommonRequestParams, RequestDescriptor};
pub use reqwest::Method;
pub use session::AuthMethod;
pub use types::*;

pub use turbo_config::{ApiInfo, ConnectionParameters, OAuthCredentials, Role, Scheme};
