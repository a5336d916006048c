//! Scoped `tracing` subscriber setup.
//!
//! [`LoggingConfig::install`] builds an `EnvFilter` + fmt subscriber and sets it as
//! the default for the calling thread. The returned [`LoggingGuard`] uninstalls it
//! on drop, so nothing is left registered globally.
//!
//! ```rust
//! use cobserve::LoggingConfig;
//!
//! let guard = LoggingConfig::new("warn").with_ansi(false).install();
//! assert!(guard.is_ok());
//!
//! let err = LoggingConfig::new("commandr=loud").install().err();
//! assert!(err.is_some());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveErrorKind {
    InvalidFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserveError {
    pub kind: ObserveErrorKind,
    pub message: String,
}

impl ObserveError {
    pub fn new(kind: ObserveErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::new(ObserveErrorKind::InvalidFilter, message)
    }
}

impl Display for ObserveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ObserveError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info` or `commandr=debug,reqwest=warn`.
    pub filter: String,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILTER)
    }
}

impl LoggingConfig {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ansi: true,
        }
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Installs a stderr subscriber for the current thread.
    pub fn install(&self) -> Result<LoggingGuard, ObserveError> {
        self.install_with_writer(io::stderr)
    }

    pub fn install_with_writer<W>(&self, writer: W) -> Result<LoggingGuard, ObserveError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_new(&self.filter).map_err(|error| {
            ObserveError::invalid_filter(format!("'{}': {error}", self.filter))
        })?;

        let subscriber = tracing_subscriber::registry().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_ansi(self.ansi)
                .with_target(true)
                .with_writer(writer),
        );

        Ok(LoggingGuard {
            _default: tracing::subscriber::set_default(subscriber),
        })
    }
}

/// Keeps the subscriber installed until dropped.
#[must_use = "dropping the guard uninstalls the subscriber"]
pub struct LoggingGuard {
    _default: DefaultGuard,
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard").finish_non_exhaustive()
    }
}
