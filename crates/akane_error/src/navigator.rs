//! Navigator error types.

/// Specific error conditions for navigator sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum NavigatorErrorKind {
    /// A page store with no pages reached the render path
    #[display("Cannot render an empty page store")]
    EmptyStore,
    /// A rendered payload exceeds a platform limit
    #[display("{} exceeds limit: {} > {}", what, actual, limit)]
    RenderLimit {
        /// Which part of the payload overflowed
        what: String,
        /// The platform limit
        limit: usize,
        /// The measured size
        actual: usize,
    },
    /// A page is structurally unusable (e.g. an embed with no content)
    #[display("Malformed page: {}", _0)]
    MalformedPage(String),
    /// Preview source returned no pages
    #[display("Preview could not be found")]
    PreviewNotFound,
    /// Preview source failed upstream
    #[display("Preview fetch failed: {}", _0)]
    PreviewFailed(String),
    /// The chat platform rejected a send/edit/delete
    #[display("Message surface error: {}", _0)]
    Surface(String),
    /// Control set is invalid (duplicate slot, bad swap side, etc.)
    #[display("Invalid control: {}", _0)]
    InvalidControl(String),
    /// Navigator was started or bound twice
    #[display("Navigator already started")]
    AlreadyStarted,
    /// Navigator builder is missing a required part
    #[display("Navigator builder: {}", _0)]
    Builder(String),
}

/// Error type for navigator operations.
///
/// # Examples
///
/// ```
/// use akane_error::{NavigatorError, NavigatorErrorKind};
///
/// let err = NavigatorError::new(NavigatorErrorKind::PreviewNotFound);
/// assert!(format!("{}", err).contains("could not be found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Navigator Error: {} at line {} in {}", kind, line, file)]
pub struct NavigatorError {
    /// The specific error condition
    pub kind: NavigatorErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl NavigatorError {
    /// Create a new NavigatorError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NavigatorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a surface failure.
    #[track_caller]
    pub fn surface(message: impl Into<String>) -> Self {
        Self::new(NavigatorErrorKind::Surface(message.into()))
    }

    /// Whether the error came from an upstream preview fetch.
    pub fn is_preview_failure(&self) -> bool {
        matches!(
            self.kind,
            NavigatorErrorKind::PreviewNotFound | NavigatorErrorKind::PreviewFailed(_)
        )
    }
}

/// Result type for navigator operations.
pub type NavigatorResult<T> = Result<T, NavigatorError>;
