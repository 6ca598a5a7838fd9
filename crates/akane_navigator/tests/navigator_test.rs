//! Tests for navigator pagination, ownership and failure handling.

mod test_utils;

use akane_core::{ChannelId, Page, PageStore, UserId};
use akane_error::NavigatorErrorKind;
use akane_navigator::{Activation, Control, ControlSet, Navigator, SessionStatus};
use std::sync::Arc;
use test_utils::{RecordingSurface, SurfaceCall, pages};

const OWNER: u64 = 1;
const STRANGER: u64 = 2;
const CHANNEL: u64 = 10;

fn navigator(surface: &Arc<RecordingSurface>, store: PageStore) -> Navigator {
    Navigator::builder()
        .owner(OWNER)
        .pages(store)
        .controls(ControlSet::paginated())
        .surface(surface.clone())
        .timeout(None)
        .build()
        .unwrap()
}

async fn press(navigator: &Navigator, surface: &RecordingSurface, actor: u64, slot: &str) -> Activation {
    let id = surface
        .last_view()
        .and_then(|view| view.callback_id(slot).map(str::to_string))
        .unwrap_or_else(|| format!("akane:{slot}:0"));
    navigator.activate(UserId::from(actor), &id).await.unwrap()
}

#[tokio::test]
async fn test_basic_pagination() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B", "C"]));
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();

    let first = surface.last_view().unwrap();
    assert_eq!(first.page(), &Page::from("A"));
    assert_eq!(*first.total(), 3);

    let mut seen = Vec::new();
    for _ in 0..3 {
        assert_eq!(press(&navigator, &surface, OWNER, "next").await, Activation::Updated);
        seen.push(surface.last_view().unwrap().page().clone());
    }
    assert_eq!(seen, vec![Page::from("B"), Page::from("C"), Page::from("A")]);

    assert_eq!(press(&navigator, &surface, OWNER, "prev").await, Activation::Updated);
    assert_eq!(surface.last_view().unwrap().page(), &Page::from("C"));
    assert_eq!(*navigator.snapshot().await.position(), 2);

    assert_eq!(press(&navigator, &surface, OWNER, "kill").await, Activation::Terminated);
    assert_eq!(surface.deletes(), 1);
    assert_eq!(*navigator.snapshot().await.status(), SessionStatus::Terminated);
}

#[tokio::test]
async fn test_non_owner_is_rejected_without_state_change() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B"]));
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();
    let before = navigator.snapshot().await;

    for slot in ["next", "prev", "kill"] {
        let outcome = press(&navigator, &surface, STRANGER, slot).await;
        assert!(matches!(outcome, Activation::Rejected(_)));
        assert!(outcome.notice().is_some());
    }

    let after = navigator.snapshot().await;
    assert_eq!(after.position(), before.position());
    assert_eq!(after.generation(), before.generation());
    assert_eq!(*after.status(), SessionStatus::Active);
    assert_eq!(surface.edits(), 0);
    assert_eq!(surface.deletes(), 0);
}

#[tokio::test]
async fn test_outdated_control_id_is_stale() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B", "C"]));
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();

    let old_next = surface.last_view().unwrap().callback_id("next").unwrap().to_string();
    let owner = UserId::from(OWNER);
    assert_eq!(navigator.activate(owner, &old_next).await.unwrap(), Activation::Updated);
    // Same id again belongs to the previous render
    assert_eq!(navigator.activate(owner, &old_next).await.unwrap(), Activation::Stale);
    assert_eq!(*navigator.snapshot().await.position(), 1);

    assert_eq!(navigator.activate(owner, "garbage").await.unwrap(), Activation::Stale);
    assert_eq!(navigator.activate(owner, "akane:missing:1").await.unwrap(), Activation::Stale);
}

#[tokio::test]
async fn test_events_after_kill_are_stale() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B"]));
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();

    let next = surface.last_view().unwrap().callback_id("next").unwrap().to_string();
    assert_eq!(press(&navigator, &surface, OWNER, "kill").await, Activation::Terminated);
    let owner = UserId::from(OWNER);
    assert_eq!(navigator.activate(owner, &next).await.unwrap(), Activation::Stale);
    assert!(!navigator.close().await);
    assert_eq!(surface.deletes(), 1);
    assert_eq!(surface.strips(), 0);
}

#[tokio::test]
async fn test_failed_edit_keeps_previous_state() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B"]));
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();

    surface.fail_next_edit();
    let next = surface.last_view().unwrap().callback_id("next").unwrap().to_string();
    let err = navigator.activate(UserId::from(OWNER), &next).await.unwrap_err();
    assert!(matches!(err.kind, NavigatorErrorKind::Surface(_)));

    let snapshot = navigator.snapshot().await;
    assert_eq!(*snapshot.position(), 0);
    assert_eq!(*snapshot.generation(), 0);

    // The old ids are still current, so the press can be retried
    assert_eq!(navigator.activate(UserId::from(OWNER), &next).await.unwrap(), Activation::Updated);
    assert_eq!(*navigator.snapshot().await.position(), 1);
}

#[tokio::test]
async fn test_oversized_page_fails_render_without_change() {
    let surface = RecordingSurface::new();
    let store = PageStore::new(vec![Page::from("A"), Page::from("x".repeat(2001))]);
    let navigator = navigator(&surface, store);
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();

    let err = navigator
        .activate(UserId::from(OWNER), "akane:next:0")
        .await
        .unwrap_err();
    assert!(matches!(err.kind, NavigatorErrorKind::RenderLimit { .. }));
    assert_eq!(*navigator.snapshot().await.position(), 0);
    assert_eq!(surface.edits(), 0);
}

#[tokio::test]
async fn test_single_page_defaults_to_kill_only() {
    let surface = RecordingSurface::new();
    let navigator = Navigator::builder()
        .owner(OWNER)
        .pages(pages(&["only"]))
        .surface(surface.clone())
        .timeout(None)
        .build()
        .unwrap();
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();
    assert_eq!(navigator.snapshot().await.slots(), &vec!["kill".to_string()]);
}

#[tokio::test]
async fn test_builder_rejects_missing_parts_and_empty_store() {
    let surface = RecordingSurface::new();
    let err = Navigator::builder()
        .pages(pages(&["A"]))
        .surface(surface.clone())
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, NavigatorErrorKind::Builder(_)));

    let err = Navigator::builder()
        .owner(OWNER)
        .pages(PageStore::new(Vec::<Page>::new()))
        .surface(surface.clone())
        .build()
        .unwrap_err();
    assert_eq!(err.kind, NavigatorErrorKind::EmptyStore);
}

#[tokio::test]
async fn test_start_twice_fails() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B"]));
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();
    let err = navigator.start(ChannelId::from(CHANNEL)).await.unwrap_err();
    assert_eq!(err.kind, NavigatorErrorKind::AlreadyStarted);
    assert_eq!(
        surface.calls().iter().filter(|c| matches!(c, SurfaceCall::Send(..))).count(),
        1
    );
}

#[tokio::test]
async fn test_activation_before_start_is_stale() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B"]));
    let outcome = navigator
        .activate(UserId::from(OWNER), "akane:next:0")
        .await
        .unwrap();
    assert_eq!(outcome, Activation::Stale);
}

#[tokio::test]
async fn test_bind_uses_host_sent_message() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B"]));
    let view = navigator.current_view().await.unwrap();
    assert_eq!(view.callback_id("next"), Some("akane:next:0"));

    navigator
        .bind(akane_core::MessageHandle::new(CHANNEL, 77u64))
        .await
        .unwrap();
    assert_eq!(press(&navigator, &surface, OWNER, "next").await, Activation::Updated);
    let Some(SurfaceCall::Edit(handle, _)) = surface.calls().last().cloned() else {
        panic!("expected an edit");
    };
    assert_eq!(handle.message().get(), 77);
}

#[tokio::test]
async fn test_presses_from_one_render_are_serialized() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B", "C"]));
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();
    let next = surface.last_view().unwrap().callback_id("next").unwrap().to_string();

    let owner = UserId::from(OWNER);
    let (a, b) = tokio::join!(navigator.activate(owner, &next), navigator.activate(owner, &next));
    let mut outcomes = vec![a.unwrap(), b.unwrap()];
    outcomes.sort_by_key(|o| o.to_string());
    assert_eq!(outcomes, vec![Activation::Stale, Activation::Updated]);
    assert_eq!(*navigator.snapshot().await.position(), 1);
}

#[tokio::test]
async fn test_close_strips_controls() {
    let surface = RecordingSurface::new();
    let navigator = navigator(&surface, pages(&["A", "B"]));
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();
    assert!(navigator.close().await);
    assert!(!navigator.close().await);
    assert_eq!(surface.strips(), 1);
    assert!(navigator.is_terminated().await);
}

#[tokio::test]
async fn test_swap_control_replaces_store() {
    use akane_navigator::{Face, SwapSide};

    let surface = RecordingSurface::new();
    let summary = SwapSide::new(Face::text("Summary"), pages(&["S1", "S2"])).unwrap();
    let changelog = SwapSide::new(Face::text("Changelog"), pages(&["C1"])).unwrap();
    let controls = ControlSet::paginated()
        .with(Control::swap("swap", [summary, changelog]).unwrap())
        .unwrap();
    let navigator = Navigator::builder()
        .owner(OWNER)
        .pages(pages(&["S1", "S2"]))
        .controls(controls)
        .surface(surface.clone())
        .timeout(None)
        .build()
        .unwrap();
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();

    assert_eq!(press(&navigator, &surface, OWNER, "next").await, Activation::Updated);
    assert_eq!(press(&navigator, &surface, OWNER, "swap").await, Activation::Updated);
    let view = surface.last_view().unwrap();
    assert_eq!(view.page(), &Page::from("C1"));
    assert_eq!(*view.position(), 0);
    assert_eq!(*view.total(), 1);
}

#[tokio::test]
async fn test_swap_must_start_on_initial_pages() {
    use akane_navigator::{Face, SwapSide};

    let surface = RecordingSurface::new();
    let summary = SwapSide::new(Face::text("Summary"), pages(&["S1", "S2"])).unwrap();
    let changelog = SwapSide::new(Face::text("Changelog"), pages(&["C1"])).unwrap();
    let controls = ControlSet::paginated()
        .with(Control::swap("swap", [summary, changelog]).unwrap())
        .unwrap();
    let err = Navigator::builder()
        .owner(OWNER)
        .pages(pages(&["Intro"]))
        .controls(controls)
        .surface(surface.clone())
        .timeout(None)
        .build()
        .unwrap_err();
    assert!(matches!(err.kind, NavigatorErrorKind::InvalidControl(_)));
}

#[tokio::test]
async fn test_swap_back_restores_initial_pages() {
    use akane_navigator::{Face, SwapSide};

    let surface = RecordingSurface::new();
    let summary = SwapSide::new(Face::text("Summary"), pages(&["S1", "S2"])).unwrap();
    let changelog = SwapSide::new(Face::text("Changelog"), pages(&["C1"])).unwrap();
    let controls = ControlSet::paginated()
        .with(Control::swap("swap", [summary, changelog]).unwrap())
        .unwrap();
    let navigator = Navigator::builder()
        .owner(OWNER)
        .pages(pages(&["S1", "S2"]))
        .controls(controls)
        .surface(surface.clone())
        .timeout(None)
        .build()
        .unwrap();
    navigator.start(ChannelId::from(CHANNEL)).await.unwrap();

    assert_eq!(press(&navigator, &surface, OWNER, "swap").await, Activation::Updated);
    assert_eq!(press(&navigator, &surface, OWNER, "swap").await, Activation::Updated);
    assert_eq!(navigator.snapshot().await.store(), &pages(&["S1", "S2"]));
}
