//! Recording message surface for testing.

use akane_core::{ChannelId, MessageHandle, Page, PageStore};
use akane_error::{NavigatorError, NavigatorErrorKind, NavigatorResult};
use akane_navigator::{MessageSurface, PreviewSource, RenderedView, preview_fn};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One call made against the surface.
#[derive(Debug, Clone)]
pub enum SurfaceCall {
    Send(ChannelId, RenderedView),
    Edit(MessageHandle, RenderedView),
    Strip(MessageHandle),
    Delete(MessageHandle),
}

/// Surface that records every call and hands out sequential message ids.
///
/// Message ids start at 1000 so they never collide with user ids used in tests.
#[derive(Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
    next_message: AtomicU64,
    fail_next_edit: AtomicBool,
}

#[allow(dead_code)]
impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next edit fail with a surface error.
    pub fn fail_next_edit(&self) {
        self.fail_next_edit.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recently sent or edited view.
    pub fn last_view(&self) -> Option<RenderedView> {
        self.calls().into_iter().rev().find_map(|call| match call {
            SurfaceCall::Send(_, view) | SurfaceCall::Edit(_, view) => Some(view),
            _ => None,
        })
    }

    pub fn edits(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Edit(..)))
    }

    pub fn deletes(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Delete(_)))
    }

    pub fn strips(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Strip(_)))
    }

    fn count(&self, predicate: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MessageSurface for RecordingSurface {
    async fn send(&self, channel: ChannelId, view: &RenderedView) -> NavigatorResult<MessageHandle> {
        let message = 1000 + self.next_message.fetch_add(1, Ordering::SeqCst);
        self.record(SurfaceCall::Send(channel, view.clone()));
        Ok(MessageHandle::new(channel, message))
    }

    async fn edit(&self, message: &MessageHandle, view: &RenderedView) -> NavigatorResult<()> {
        if self.fail_next_edit.swap(false, Ordering::SeqCst) {
            return Err(NavigatorError::surface("edit rejected"));
        }
        self.record(SurfaceCall::Edit(*message, view.clone()));
        Ok(())
    }

    async fn strip_controls(&self, message: &MessageHandle) -> NavigatorResult<()> {
        self.record(SurfaceCall::Strip(*message));
        Ok(())
    }

    async fn delete(&self, message: &MessageHandle) -> NavigatorResult<()> {
        self.record(SurfaceCall::Delete(*message));
        Ok(())
    }
}

/// Text pages from labels.
pub fn pages(labels: &[&str]) -> PageStore {
    labels.iter().copied().map(Page::from).collect()
}

/// Preview source returning `labels`, counting how often it is fetched.
pub fn counting_preview(labels: &'static [&'static str]) -> (Arc<dyn PreviewSource>, Arc<AtomicUsize>) {
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fetches);
    let source = preview_fn(move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(pages(labels))
        }
    });
    (source, fetches)
}

/// Preview source that always fails with `kind`.
#[allow(dead_code)]
pub fn failing_preview(kind: NavigatorErrorKind) -> Arc<dyn PreviewSource> {
    preview_fn(move || {
        let kind = kind.clone();
        async move { Err(NavigatorError::new(kind)) }
    })
}
