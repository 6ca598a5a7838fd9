//! Error types for Akane.
//!
//! This crate provides the foundation error types used throughout the Akane workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use akane_error::{AkaneResult, NavigatorError, NavigatorErrorKind};
//!
//! fn render() -> AkaneResult<()> {
//!     Err(NavigatorError::new(NavigatorErrorKind::EmptyStore))?
//! }
//!
//! assert!(render().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod navigator;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{AkaneError, AkaneErrorKind, AkaneResult};
pub use navigator::{NavigatorError, NavigatorErrorKind, NavigatorResult};
