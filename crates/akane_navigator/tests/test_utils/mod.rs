//! Test utilities for navigator tests.
//!
//! This module provides a recording message surface and preview helpers.

pub mod mock_surface;

#[allow(unused_imports)]
pub use mock_surface::{RecordingSurface, SurfaceCall, counting_preview, failing_preview, pages};
