//! Top-level error wrapper types.

use crate::{ConfigError, NavigatorError};

/// Every error condition that can surface from the Akane crates.
///
/// # Examples
///
/// ```
/// use akane_error::{AkaneError, ConfigError, ConfigErrorKind};
///
/// let err: AkaneError = ConfigError::new(ConfigErrorKind::Read("akane.toml missing".into())).into();
/// assert!(format!("{}", err).contains("akane.toml missing"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AkaneErrorKind {
    /// Navigator session error
    #[from(NavigatorError)]
    Navigator(NavigatorError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Akane error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Akane Error: {}", _0)]
pub struct AkaneError(Box<AkaneErrorKind>);

impl AkaneError {
    /// Create a new error from a kind.
    pub fn new(kind: AkaneErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AkaneErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AkaneErrorKind
impl<T> From<T> for AkaneError
where
    T: Into<AkaneErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Akane operations.
pub type AkaneResult<T> = std::result::Result<T, AkaneError>;
