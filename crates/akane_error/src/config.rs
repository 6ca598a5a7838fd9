//! Configuration error types.

/// What went wrong while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A source could not be read or merged
    #[display("Failed to read configuration: {}", _0)]
    Read(String),
    /// The merged sources do not match the expected shape
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
    /// A value parsed but cannot be used
    #[display("Invalid value for {}: {}", key, reason)]
    Invalid {
        /// Dotted key, e.g. `navigator.timeout_secs`
        key: &'static str,
        /// What the value must satisfy
        reason: &'static str,
    },
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use akane_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Invalid {
///     key: "cache.max_size",
///     reason: "must be at least 1",
/// });
/// assert!(err.to_string().contains("cache.max_size"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a value that parsed but cannot be used.
    #[track_caller]
    pub fn invalid(key: &'static str, reason: &'static str) -> Self {
        Self::new(ConfigErrorKind::Invalid { key, reason })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
