//! Tests for the preview toggle and its cache.

mod test_utils;

use akane_core::{ChannelId, Page, PageStore, UserId};
use akane_error::NavigatorErrorKind;
use akane_navigator::{
    Activation, Control, ControlSet, ControlTarget, Face, Navigator, PreviewSource,
    PreviewStoreCache, preview_fn,
};
use akane_cache::PreviewCacheConfig;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use test_utils::{RecordingSurface, counting_preview, failing_preview, pages};

const OWNER: u64 = 1;

fn build(
    surface: &Arc<RecordingSurface>,
    source: Arc<dyn PreviewSource>,
    cache: PreviewStoreCache,
) -> Navigator {
    let preview = Control::preview(
        "preview",
        Face::text("Preview"),
        Face::text("Close preview"),
        source,
    )
    .unwrap();
    Navigator::builder()
        .owner(OWNER)
        .pages(pages(&["S"]))
        .controls(ControlSet::new(vec![preview, Control::kill()]).unwrap())
        .surface(surface.clone())
        .cache(cache)
        .timeout(None)
        .build()
        .unwrap()
}

async fn press(navigator: &Navigator, surface: &RecordingSurface, slot: &str) -> Activation {
    let id = surface
        .last_view()
        .and_then(|view| view.callback_id(slot).map(str::to_string))
        .unwrap();
    navigator.activate(UserId::from(OWNER), &id).await.unwrap()
}

fn labels(surface: &RecordingSurface) -> Vec<String> {
    surface
        .last_view()
        .unwrap()
        .controls()
        .filter_map(|c| c.label().clone())
        .collect()
}

#[tokio::test]
async fn test_preview_toggle() {
    let surface = RecordingSurface::new();
    let (source, fetches) = counting_preview(&["P1", "P2"]);
    let cache = PreviewStoreCache::new(PreviewCacheConfig::default());
    let navigator = build(&surface, source, cache.clone());
    let handle = navigator.start(ChannelId::from(5u64)).await.unwrap();

    assert_eq!(labels(&surface), vec!["Preview"]);

    // Open
    assert_eq!(press(&navigator, &surface, "preview").await, Activation::Updated);
    let view = surface.last_view().unwrap();
    assert_eq!(view.page(), &Page::from("P1"));
    assert_eq!(labels(&surface), vec!["Close preview"]);
    let snapshot = navigator.snapshot().await;
    assert!(*snapshot.preview_open());
    assert_eq!(snapshot.slots(), &vec!["prev", "next", "preview", "kill"]);
    assert!(cache.contains(handle.message()));

    // Page inside the preview
    assert_eq!(press(&navigator, &surface, "next").await, Activation::Updated);
    assert_eq!(surface.last_view().unwrap().page(), &Page::from("P2"));

    // Close restores the original view and controls
    assert_eq!(press(&navigator, &surface, "preview").await, Activation::Updated);
    let snapshot = navigator.snapshot().await;
    assert!(!*snapshot.preview_open());
    assert_eq!(snapshot.store(), &pages(&["S"]));
    assert_eq!(snapshot.slots(), &vec!["preview", "kill"]);
    assert_eq!(labels(&surface), vec!["Preview"]);

    // Reopening is served from the cache
    assert_eq!(press(&navigator, &surface, "preview").await, Activation::Updated);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(surface.last_view().unwrap().page(), &Page::from("P1"));
}

#[tokio::test]
async fn test_failed_fetch_reports_notice_and_keeps_state() {
    let surface = RecordingSurface::new();
    let cache = PreviewStoreCache::new(PreviewCacheConfig::default());
    let navigator = build(
        &surface,
        failing_preview(NavigatorErrorKind::PreviewFailed("upstream 503".into())),
        cache,
    );
    navigator.start(ChannelId::from(5u64)).await.unwrap();

    let outcome = press(&navigator, &surface, "preview").await;
    assert!(matches!(outcome, Activation::Failed(_)));
    assert!(outcome.notice().is_some());

    let snapshot = navigator.snapshot().await;
    assert!(!*snapshot.preview_open());
    assert_eq!(*snapshot.generation(), 0);
    assert_eq!(surface.edits(), 0);
}

#[tokio::test]
async fn test_empty_preview_counts_as_not_found() {
    let surface = RecordingSurface::new();
    let (source, _) = counting_preview(&[]);
    let cache = PreviewStoreCache::new(PreviewCacheConfig::default());
    let navigator = build(&surface, source, cache.clone());
    let handle = navigator.start(ChannelId::from(5u64)).await.unwrap();

    let outcome = press(&navigator, &surface, "preview").await;
    assert!(matches!(outcome, Activation::Failed(_)));
    assert!(!cache.contains(handle.message()));
}

#[tokio::test]
async fn test_teardown_releases_cache_slot() {
    let surface = RecordingSurface::new();
    let (source, _) = counting_preview(&["P1"]);
    let cache = PreviewStoreCache::new(PreviewCacheConfig::default());
    let navigator = build(&surface, source, cache.clone());
    let handle = navigator.start(ChannelId::from(5u64)).await.unwrap();

    assert!(cache.is_claimed(handle.message()));
    press(&navigator, &surface, "preview").await;
    assert!(cache.contains(handle.message()));

    assert_eq!(press(&navigator, &surface, "kill").await, Activation::Terminated);
    assert!(!cache.contains(handle.message()));
    assert!(!cache.is_claimed(handle.message()));
}

#[tokio::test]
async fn test_failed_open_edit_leaves_preview_closed() {
    let surface = RecordingSurface::new();
    let (source, _) = counting_preview(&["P1"]);
    let cache = PreviewStoreCache::new(PreviewCacheConfig::default());
    let navigator = build(&surface, source, cache);
    navigator.start(ChannelId::from(5u64)).await.unwrap();

    surface.fail_next_edit();
    let id = surface.last_view().unwrap().callback_id("preview").unwrap().to_string();
    let err = navigator.activate(UserId::from(OWNER), &id).await.unwrap_err();
    assert!(matches!(err.kind, NavigatorErrorKind::Surface(_)));
    assert!(!*navigator.snapshot().await.preview_open());
}

#[tokio::test]
async fn test_unrenderable_preview_is_not_cached() {
    let surface = RecordingSurface::new();
    let fetches = Arc::new(AtomicUsize::new(0));
    let counter = fetches.clone();
    let source = preview_fn(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(PageStore::single(Page::from("x".repeat(2500))))
        }
    });
    let cache = PreviewStoreCache::new(PreviewCacheConfig::default());
    let navigator = build(&surface, source, cache.clone());
    let handle = navigator.start(ChannelId::from(5u64)).await.unwrap();
    let id = surface.last_view().unwrap().callback_id("preview").unwrap().to_string();

    for attempt in 1..=2 {
        let err = navigator.activate(UserId::from(OWNER), &id).await.unwrap_err();
        assert!(matches!(err.kind, NavigatorErrorKind::RenderLimit { .. }));
        assert!(!cache.contains(handle.message()));
        assert_eq!(fetches.load(Ordering::SeqCst), attempt);
    }
    assert!(!*navigator.snapshot().await.preview_open());
    assert_eq!(surface.edits(), 0);
}

#[tokio::test]
async fn test_preview_closes_with_its_own_control() {
    let surface = RecordingSurface::new();
    let (source, _) = counting_preview(&["P1", "P2", "P3"]);
    let cache = PreviewStoreCache::new(PreviewCacheConfig::default());
    let navigator = build(&surface, source, cache);
    navigator.start(ChannelId::from(5u64)).await.unwrap();

    press(&navigator, &surface, "preview").await;
    let ids: Vec<String> = surface
        .last_view()
        .unwrap()
        .controls()
        .filter_map(|c| match c.target() {
            ControlTarget::Callback(id) => Some(id.clone()),
            ControlTarget::Link(_) => None,
        })
        .collect();
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());

    for _ in 0..3 {
        press(&navigator, &surface, "next").await;
    }
    assert!(*navigator.snapshot().await.preview_open());
    press(&navigator, &surface, "preview").await;
    assert!(!*navigator.snapshot().await.preview_open());
}
