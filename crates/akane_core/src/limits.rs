//! Payload limits enforced by the chat platform.
//!
//! A page or control layout that violates one of these is rejected before
//! any request is made, so a failed render never leaves a half-applied edit.

use akane_error::{NavigatorError, NavigatorErrorKind, NavigatorResult};

/// Maximum characters in plain message content.
pub const CONTENT_CHARS: usize = 2000;
/// Maximum characters in an embed title.
pub const EMBED_TITLE_CHARS: usize = 256;
/// Maximum characters in an embed description.
pub const EMBED_DESCRIPTION_CHARS: usize = 4096;
/// Maximum number of fields in one embed.
pub const EMBED_FIELDS: usize = 25;
/// Maximum characters in an embed field name.
pub const EMBED_FIELD_NAME_CHARS: usize = 256;
/// Maximum characters in an embed field value.
pub const EMBED_FIELD_VALUE_CHARS: usize = 1024;
/// Maximum characters in an embed footer.
pub const EMBED_FOOTER_CHARS: usize = 2048;
/// Maximum characters across all text in one embed.
pub const EMBED_TOTAL_CHARS: usize = 6000;
/// Maximum controls in one row.
pub const CONTROLS_PER_ROW: usize = 5;
/// Maximum rows of controls on one message.
pub const CONTROL_ROWS: usize = 5;
/// Maximum characters in a control label.
pub const CONTROL_LABEL_CHARS: usize = 80;
/// Maximum characters in a control's wire id.
pub const CONTROL_ID_CHARS: usize = 100;

/// Fails with [`NavigatorErrorKind::RenderLimit`] if `text` is longer than `limit` characters.
///
/// # Examples
///
/// ```
/// use akane_core::limits::{check_chars, EMBED_TITLE_CHARS};
///
/// assert!(check_chars("embed title", "Frieren", EMBED_TITLE_CHARS).is_ok());
/// assert!(check_chars("embed title", &"x".repeat(300), EMBED_TITLE_CHARS).is_err());
/// ```
#[track_caller]
pub fn check_chars(what: &str, text: &str, limit: usize) -> NavigatorResult<()> {
    check_count(what, text.chars().count(), limit)
}

/// Fails with [`NavigatorErrorKind::RenderLimit`] if `actual` exceeds `limit`.
#[track_caller]
pub fn check_count(what: &str, actual: usize, limit: usize) -> NavigatorResult<()> {
    if actual > limit {
        return Err(NavigatorError::new(NavigatorErrorKind::RenderLimit {
            what: what.to_string(),
            limit,
            actual,
        }));
    }
    Ok(())
}
