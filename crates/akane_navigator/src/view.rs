//! Fully resolved renders handed to the message surface.

use crate::ControlStyle;
use akane_core::Page;

/// What pressing a rendered control does on the platform side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlTarget {
    /// Deliver an event carrying this wire id back to the navigator
    Callback(String),
    /// Open this URL in the client
    Link(String),
}

/// One control as it appears in a render.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct RenderedControl {
    target: ControlTarget,
    label: Option<String>,
    emoji: Option<String>,
    style: ControlStyle,
    disabled: bool,
}

/// One page plus its control rows, drawn from a single session generation.
///
/// The page and the controls are produced by the same render call, so a
/// surface that applies a `RenderedView` in one request can never show
/// controls from one generation next to a page from another.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct RenderedView {
    page: Page,
    position: usize,
    total: usize,
    generation: u64,
    rows: Vec<Vec<RenderedControl>>,
}

impl RenderedControl {
    /// Creates a rendered control.
    pub fn new(
        target: ControlTarget,
        label: Option<String>,
        emoji: Option<String>,
        style: ControlStyle,
        disabled: bool,
    ) -> Self {
        Self {
            target,
            label,
            emoji,
            style,
            disabled,
        }
    }
}

impl RenderedView {
    /// Creates a rendered view.
    pub fn new(
        page: Page,
        position: usize,
        total: usize,
        generation: u64,
        rows: Vec<Vec<RenderedControl>>,
    ) -> Self {
        Self {
            page,
            position,
            total,
            generation,
            rows,
        }
    }

    /// All controls in display order, across rows.
    pub fn controls(&self) -> impl Iterator<Item = &RenderedControl> {
        self.rows.iter().flatten()
    }

    /// The callback id of the control in `slot`, if rendered.
    pub fn callback_id(&self, slot: &str) -> Option<&str> {
        self.controls().find_map(|control| match &control.target {
            ControlTarget::Callback(id) => crate::ControlId::parse(id)
                .filter(|parsed| parsed.slot() == slot)
                .map(|_| id.as_str()),
            ControlTarget::Link(_) => None,
        })
    }
}
