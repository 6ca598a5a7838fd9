//! Control primitives attached to a paginated message.

use crate::PreviewSource;
use akane_core::PageStore;
use akane_core::limits::{CONTROL_ROWS, CONTROLS_PER_ROW};
use akane_error::{NavigatorError, NavigatorErrorKind, NavigatorResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

const WIRE_PREFIX: &str = "akane";

/// Slots taken by the movement and dismiss controls of the preview layout.
const RESERVED_SLOTS: [&str; 3] = ["prev", "next", "kill"];

/// Visual style of a control.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ControlStyle {
    /// Blurple
    #[default]
    Primary,
    /// Grey
    Secondary,
    /// Green
    Success,
    /// Red
    Danger,
    /// Opens a URL
    Link,
}

/// What a control looks like: label, icon and style.
#[derive(Debug, Clone, PartialEq, Eq, Default, derive_getters::Getters)]
pub struct Face {
    label: Option<String>,
    emoji: Option<String>,
    style: ControlStyle,
}

impl Face {
    /// A face showing only a text label.
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// A face showing only an emoji.
    pub fn icon(emoji: impl Into<String>) -> Self {
        Self {
            emoji: Some(emoji.into()),
            ..Self::default()
        }
    }

    /// Adds an emoji next to the label.
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: ControlStyle) -> Self {
        self.style = style;
        self
    }
}

/// One half of a swap control: the face shown to reach it and the pages it installs.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct SwapSide {
    face: Face,
    pages: PageStore,
}

impl SwapSide {
    /// Creates a swap side.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorErrorKind::EmptyStore`] if `pages` is empty.
    pub fn new(face: Face, pages: PageStore) -> NavigatorResult<Self> {
        pages.ensure_renderable()?;
        Ok(Self { face, pages })
    }
}

/// Behaviour bound to a control.
#[derive(Clone)]
pub enum ControlKind {
    /// Move one page back, wrapping to the last page
    Previous,
    /// Move one page forward, wrapping to the first page
    Next,
    /// Delete the message and end the session
    Kill,
    /// Toggle between two page stores
    Swap {
        /// Side 0 is shown first
        sides: Arc<[SwapSide; 2]>,
    },
    /// Toggle an auxiliary, lazily fetched page store together with its own control set
    Preview {
        /// Face shown while the preview is open
        close: Face,
        /// Where the preview pages come from
        source: Arc<dyn PreviewSource>,
    },
    /// Open an external URL; handled by the platform, never routed back
    Link {
        /// Target URL
        url: String,
    },
}

impl std::fmt::Debug for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Previous => f.write_str("Previous"),
            Self::Next => f.write_str("Next"),
            Self::Kill => f.write_str("Kill"),
            Self::Swap { sides } => f.debug_struct("Swap").field("sides", sides).finish(),
            Self::Preview { close, .. } => f
                .debug_struct("Preview")
                .field("close", close)
                .finish_non_exhaustive(),
            Self::Link { url } => f.debug_struct("Link").field("url", url).finish(),
        }
    }
}

/// An interactive element attached to a message.
///
/// `slot` names the control within its set and is stable across renders;
/// the wire id sent to the platform adds the render generation, see [`ControlId`].
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct Control {
    slot: String,
    face: Face,
    kind: ControlKind,
}

impl Control {
    /// Creates a control with a custom slot name and face.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorErrorKind::InvalidControl`] if the slot is empty or contains `:`.
    pub fn new(slot: impl Into<String>, face: Face, kind: ControlKind) -> NavigatorResult<Self> {
        let slot = slot.into();
        if slot.is_empty() || slot.contains(':') {
            return Err(NavigatorError::new(NavigatorErrorKind::InvalidControl(
                format!("slot '{slot}' must be non-empty and must not contain ':'"),
            )));
        }
        Ok(Self { slot, face, kind })
    }

    /// The standard previous-page control.
    pub fn previous() -> Self {
        Self {
            slot: "prev".to_string(),
            face: Face::icon("⬅️").with_style(ControlStyle::Secondary),
            kind: ControlKind::Previous,
        }
    }

    /// The standard next-page control.
    pub fn next() -> Self {
        Self {
            slot: "next".to_string(),
            face: Face::icon("➡️").with_style(ControlStyle::Secondary),
            kind: ControlKind::Next,
        }
    }

    /// The standard dismiss control.
    pub fn kill() -> Self {
        Self {
            slot: "kill".to_string(),
            face: Face::icon("🗑️").with_style(ControlStyle::Danger),
            kind: ControlKind::Kill,
        }
    }

    /// A two-state toggle between `sides[0]` (shown first) and `sides[1]`.
    pub fn swap(slot: impl Into<String>, sides: [SwapSide; 2]) -> NavigatorResult<Self> {
        let face = sides[1].face.clone();
        Self::new(
            slot,
            face,
            ControlKind::Swap {
                sides: Arc::new(sides),
            },
        )
    }

    /// A preview toggle showing `open` while closed and `close` while open.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorErrorKind::InvalidControl`] for an invalid slot or one
    /// of `prev`, `next` and `kill`, which the open preview uses itself.
    pub fn preview(
        slot: impl Into<String>,
        open: Face,
        close: Face,
        source: Arc<dyn PreviewSource>,
    ) -> NavigatorResult<Self> {
        let slot = slot.into();
        if RESERVED_SLOTS.contains(&slot.as_str()) {
            return Err(NavigatorError::new(NavigatorErrorKind::InvalidControl(
                format!("slot '{slot}' is reserved for the preview layout"),
            )));
        }
        Self::new(slot, open, ControlKind::Preview { close, source })
    }

    /// A link-out control.
    pub fn link(slot: impl Into<String>, face: Face, url: impl Into<String>) -> NavigatorResult<Self> {
        Self::new(
            slot,
            face.with_style(ControlStyle::Link),
            ControlKind::Link { url: url.into() },
        )
    }

    /// Whether activations of this control are delivered to the navigator.
    pub fn is_routed(&self) -> bool {
        !matches!(self.kind, ControlKind::Link { .. })
    }
}

/// Ordered set of controls with unique slots.
///
/// # Examples
///
/// ```
/// use akane_navigator::ControlSet;
///
/// let controls = ControlSet::paginated();
/// let slots: Vec<_> = controls.iter().map(|c| c.slot().as_str()).collect();
/// assert_eq!(slots, vec!["prev", "next", "kill"]);
/// ```
#[derive(Debug, Clone)]
pub struct ControlSet {
    controls: Vec<Control>,
}

impl ControlSet {
    /// Builds a control set.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorErrorKind::InvalidControl`] on duplicate slots and
    /// [`NavigatorErrorKind::RenderLimit`] if the controls cannot fit on a message.
    pub fn new(controls: Vec<Control>) -> NavigatorResult<Self> {
        let mut seen = HashSet::new();
        for control in &controls {
            if !seen.insert(control.slot.as_str()) {
                return Err(NavigatorError::new(NavigatorErrorKind::InvalidControl(
                    format!("duplicate slot '{}'", control.slot),
                )));
            }
        }
        akane_core::limits::check_count(
            "controls per message",
            controls.len(),
            CONTROLS_PER_ROW * CONTROL_ROWS,
        )?;
        Ok(Self { controls })
    }

    /// An empty control set.
    pub fn empty() -> Self {
        Self {
            controls: Vec::new(),
        }
    }

    /// `[Previous, Next, Kill]`.
    pub fn paginated() -> Self {
        Self {
            controls: vec![Control::previous(), Control::next(), Control::kill()],
        }
    }

    /// The layout installed while a preview is open: `[Previous, Next, preview, Kill]`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorErrorKind::InvalidControl`] if `preview` uses a slot
    /// of the surrounding controls.
    pub fn preview_layout(preview: Control) -> NavigatorResult<Self> {
        Self::new(vec![
            Control::previous(),
            Control::next(),
            preview,
            Control::kill(),
        ])
    }

    /// Returns this set with `control` appended.
    pub fn with(mut self, control: Control) -> NavigatorResult<Self> {
        self.controls.push(control);
        Self::new(self.controls)
    }

    /// Control with the given slot.
    pub fn get(&self, slot: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.slot == slot)
    }

    /// Controls in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    /// Slots in display order.
    pub fn slots(&self) -> Vec<String> {
        self.controls.iter().map(|c| c.slot.clone()).collect()
    }

    /// Number of controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether there are no controls.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// Wire identity of a control within one render: `akane:<slot>:<generation>`.
///
/// # Examples
///
/// ```
/// use akane_navigator::ControlId;
///
/// let id = ControlId::new("next", 3);
/// assert_eq!(id.to_string(), "akane:next:3");
/// assert_eq!(ControlId::parse("akane:next:3"), Some(id));
/// assert_eq!(ControlId::parse("other:next:3"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct ControlId {
    slot: String,
    generation: u64,
}

impl ControlId {
    /// Creates a wire id.
    pub fn new(slot: impl Into<String>, generation: u64) -> Self {
        Self {
            slot: slot.into(),
            generation,
        }
    }

    /// Parses a wire id produced by [`ControlId::to_string`].
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(WIRE_PREFIX)?.strip_prefix(':')?;
        let (slot, generation) = rest.rsplit_once(':')?;
        if slot.is_empty() {
            return None;
        }
        Some(Self {
            slot: slot.to_string(),
            generation: generation.parse().ok()?,
        })
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", WIRE_PREFIX, self.slot, self.generation)
    }
}
