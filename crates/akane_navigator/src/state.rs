//! Session state, transitions and rendering.
//!
//! Everything here is synchronous and side-effect free. The navigator plans a
//! [`Transition`], applies it to a copy of the state, renders the copy and
//! only commits it once the platform accepted the render.

use crate::{
    Control, ControlId, ControlKind, ControlSet, ControlTarget, Face, RenderedControl,
    RenderedView,
};
use akane_core::limits::{
    CONTROL_ID_CHARS, CONTROL_LABEL_CHARS, CONTROL_ROWS, CONTROLS_PER_ROW, check_chars, check_count,
};
use akane_core::{MessageHandle, PageStore};
use akane_error::{NavigatorError, NavigatorErrorKind, NavigatorResult};
use std::collections::HashMap;
use tokio::time::Instant;

/// Whether a session still accepts activations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SessionStatus {
    /// Accepting activations
    #[display("active")]
    Active,
    /// Controls stripped or message deleted; nothing more happens
    #[display("terminated")]
    Terminated,
}

/// A page store shown with a particular control set at a particular position.
///
/// Store and controls always travel together, so installing a view swaps
/// both in one assignment.
#[derive(Debug, Clone)]
pub(crate) struct View {
    pub(crate) store: PageStore,
    pub(crate) controls: ControlSet,
    pub(crate) position: usize,
}

/// State change produced by one accepted activation.
#[derive(Debug, Clone)]
pub(crate) enum Transition {
    /// Show the page at `position`
    Move { position: usize },
    /// Install the store of swap side `side` for the swap control in `slot`
    Swap {
        slot: String,
        side: usize,
        store: PageStore,
    },
    /// Save the current view and install the preview view; `fetched` stores
    /// go into the cache once the render is accepted
    OpenPreview {
        store: PageStore,
        controls: ControlSet,
        fetched: bool,
    },
    /// Restore the view saved when the preview opened
    ClosePreview,
    /// End the session
    Terminate,
}

#[derive(Debug, Clone)]
pub(crate) struct SessionState {
    pub(crate) status: SessionStatus,
    pub(crate) message: Option<MessageHandle>,
    pub(crate) view: View,
    /// View to restore when the open preview closes; `Some` means a preview is open
    pub(crate) saved: Option<Box<View>>,
    /// Currently displayed side per swap slot (absent means side 0)
    pub(crate) swap_sides: HashMap<String, usize>,
    pub(crate) generation: u64,
    pub(crate) deadline: Option<Instant>,
}

impl SessionState {
    pub(crate) fn new(store: PageStore, controls: ControlSet) -> Self {
        Self {
            status: SessionStatus::Active,
            message: None,
            view: View {
                store,
                controls,
                position: 0,
            },
            saved: None,
            swap_sides: HashMap::new(),
            generation: 0,
            deadline: None,
        }
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.status == SessionStatus::Terminated
    }

    pub(crate) fn preview_open(&self) -> bool {
        self.saved.is_some()
    }

    pub(crate) fn swap_side(&self, slot: &str) -> usize {
        self.swap_sides.get(slot).copied().unwrap_or(0)
    }

    /// Plan the transition for a control that needs no I/O.
    ///
    /// Returns `None` for preview openings (which need a fetch) and for
    /// controls that are never routed.
    pub(crate) fn plan_local(&self, control: &Control) -> Option<Transition> {
        let len = self.view.store.len();
        let position = self.view.position;
        match control.kind() {
            ControlKind::Previous => Some(Transition::Move {
                position: (position + len - 1) % len,
            }),
            ControlKind::Next => Some(Transition::Move {
                position: (position + 1) % len,
            }),
            ControlKind::Kill => Some(Transition::Terminate),
            ControlKind::Swap { sides } => {
                let side = 1 - self.swap_side(control.slot());
                Some(Transition::Swap {
                    slot: control.slot().clone(),
                    side,
                    store: sides[side].pages().clone(),
                })
            }
            ControlKind::Preview { .. } if self.preview_open() => Some(Transition::ClosePreview),
            ControlKind::Preview { .. } | ControlKind::Link { .. } => None,
        }
    }

    /// Apply a transition, producing the next state.
    ///
    /// Every transition except `Terminate` advances the generation, which
    /// invalidates the control ids of the previous render.
    pub(crate) fn apply(&self, transition: Transition) -> SessionState {
        let mut next = self.clone();
        match transition {
            Transition::Move { position } => {
                next.view.position = position;
            }
            Transition::Swap { slot, side, store } => {
                next.swap_sides.insert(slot, side);
                next.view.store = store;
                next.view.position = 0;
            }
            Transition::OpenPreview {
                store, controls, ..
            } => {
                let original = std::mem::replace(
                    &mut next.view,
                    View {
                        store,
                        controls,
                        position: 0,
                    },
                );
                next.saved = Some(Box::new(original));
            }
            Transition::ClosePreview => {
                if let Some(saved) = next.saved.take() {
                    next.view = *saved;
                }
            }
            Transition::Terminate => {
                next.status = SessionStatus::Terminated;
                return next;
            }
        }
        next.generation += 1;
        next
    }

    fn face_for(&self, control: &Control) -> Face {
        match control.kind() {
            ControlKind::Swap { sides } => {
                let destination = 1 - self.swap_side(control.slot());
                sides[destination].face().clone()
            }
            ControlKind::Preview { close, .. } if self.preview_open() => close.clone(),
            _ => control.face().clone(),
        }
    }

    /// Render the current page and controls, checking platform limits.
    pub(crate) fn render(&self, show_page_counter: bool) -> NavigatorResult<RenderedView> {
        let store = &self.view.store;
        debug_assert!(!store.is_empty(), "rendering an empty page store");
        store.ensure_renderable()?;

        let total = store.len();
        let position = self.view.position;
        let page = store
            .get(position)
            .cloned()
            .ok_or_else(|| NavigatorError::new(NavigatorErrorKind::EmptyStore))?;
        let page = if show_page_counter && total > 1 {
            page.with_counter(position, total)
        } else {
            page
        };
        page.validate()?;

        let mut controls = Vec::with_capacity(self.view.controls.len());
        for control in self.view.controls.iter() {
            let face = self.face_for(control);
            let target = match control.kind() {
                ControlKind::Link { url } => ControlTarget::Link(url.clone()),
                _ => {
                    let id = ControlId::new(control.slot().clone(), self.generation).to_string();
                    check_chars("control id", &id, CONTROL_ID_CHARS)?;
                    ControlTarget::Callback(id)
                }
            };
            if let Some(label) = face.label() {
                check_chars("control label", label, CONTROL_LABEL_CHARS)?;
            }
            let disabled = matches!(control.kind(), ControlKind::Previous | ControlKind::Next)
                && total <= 1;
            controls.push(RenderedControl::new(
                target,
                face.label().clone(),
                face.emoji().clone(),
                *face.style(),
                disabled,
            ));
        }

        let rows: Vec<Vec<RenderedControl>> = controls
            .chunks(CONTROLS_PER_ROW)
            .map(<[RenderedControl]>::to_vec)
            .collect();
        check_count("control rows", rows.len(), CONTROL_ROWS)?;

        Ok(RenderedView::new(page, position, total, self.generation, rows))
    }
}
