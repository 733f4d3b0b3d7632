//! Injectable logging capability.
//!
//! The client reports handshake and request progress through a [`Logger`]
//! supplied by the caller. The default, [`TracingLogger`], forwards to
//! `tracing`; [`init_logging`] installs a stderr subscriber whose verbosity
//! comes from `T8C_LOG`.

use std::fmt;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log level (`DEBUG|INFO|WARN|ERROR`).
pub const LOG_LEVEL_ENV: &str = "T8C_LOG";

/// Correlation handle passed with every log call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogContext {
    correlation_id: Option<String>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag every message logged under this context with an id.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

/// Key/value attribute attached to a log message.
pub type LogField<'a> = (&'static str, &'a str);

/// Logging capability used by the authenticator and dispatcher.
///
/// Implementations must be safe to call from concurrent requests.
pub trait Logger: Send + Sync + fmt::Debug {
    fn info(&self, ctx: &LogContext, msg: &str);
    fn debug(&self, ctx: &LogContext, msg: &str);
    fn error(&self, ctx: &LogContext, msg: &str);

    /// Log an error with key/value attributes such as `status`.
    ///
    /// The default appends the attributes to the message text.
    fn error_with(&self, ctx: &LogContext, msg: &str, fields: &[LogField<'_>]) {
        self.error(ctx, &with_fields(msg, fields));
    }
}

/// `msg` followed by ` key=value` for each field.
pub fn with_fields(msg: &str, fields: &[LogField<'_>]) -> String {
    fields
        .iter()
        .fold(msg.to_string(), |acc, (key, value)| format!("{acc} {key}={value}"))
}

fn field<'a>(fields: &[LogField<'a>], key: &str) -> Option<&'a str> {
    fields.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Forwards to `tracing` events under the `turbo_client` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, ctx: &LogContext, msg: &str) {
        tracing::info!(correlation_id = ctx.correlation_id(), "{}", msg);
    }

    fn debug(&self, ctx: &LogContext, msg: &str) {
        tracing::debug!(correlation_id = ctx.correlation_id(), "{}", msg);
    }

    fn error(&self, ctx: &LogContext, msg: &str) {
        tracing::error!(correlation_id = ctx.correlation_id(), "{}", msg);
    }

    /// `status` becomes its own event field; other attributes are kept
    /// together in `fields`.
    fn error_with(&self, ctx: &LogContext, msg: &str, fields: &[LogField<'_>]) {
        let rest: Vec<LogField<'_>> = fields
            .iter()
            .copied()
            .filter(|(k, _)| *k != "status")
            .collect();
        let rest = (!rest.is_empty()).then(|| with_fields("", &rest).trim_start().to_string());
        tracing::error!(
            correlation_id = ctx.correlation_id(),
            status = field(fields, "status").map(tracing::field::display),
            fields = rest.as_deref(),
            "{}",
            msg
        );
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _ctx: &LogContext, _msg: &str) {}
    fn debug(&self, _ctx: &LogContext, _msg: &str) {}
    fn error(&self, _ctx: &LogContext, _msg: &str) {}
}

/// The logger used when the caller supplies none.
pub fn default_logger() -> Arc<dyn Logger> {
    Arc::new(TracingLogger)
}

/// Map a `T8C_LOG` value to an `EnvFilter` level. Unknown or empty values
/// fall back to `info`.
pub fn level_directive(value: Option<&str>) -> &'static str {
    match value.map(|v| v.trim().to_ascii_uppercase()).as_deref() {
        Some("DEBUG") => "debug",
        Some("WARN") => "warn",
        Some("ERROR") => "error",
        _ => "info",
    }
}

/// Install a human-readable stderr subscriber filtered by `T8C_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging() -> bool {
    let level = level_directive(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    init_logging_with_level(level)
}

/// Install a stderr subscriber at an explicit level directive.
pub fn init_logging_with_level(level: &str) -> bool {
    let filter = EnvFilter::new(format!("turbo_client={level},turbo_config={level},warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
