//! Navigator sessions.

use crate::state::{SessionState, Transition};
use crate::{
    Activation, ControlId, ControlKind, ControlSet, MessageSurface, NavigatorConfig,
    PreviewStoreCache, RenderedView, SessionRegistry, SessionStatus, TimeoutPolicy,
};
use akane_cache::CacheSlot;
use akane_core::{ChannelId, MessageHandle, MessageId, PageStore, UserId};
use akane_error::{NavigatorError, NavigatorErrorKind, NavigatorResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
enum TeardownReason {
    /// Owner pressed Kill: the message is deleted
    #[display("killed")]
    Killed,
    /// Deadline passed: controls are stripped
    #[display("expired")]
    Expired,
    /// Closed by the host (shutdown or explicit close): controls are stripped
    #[display("closed")]
    Closed,
}

/// Runtime resources owned by a started session.
#[derive(Default)]
struct Resources {
    slot: Option<CacheSlot<MessageId, PageStore>>,
    timer: Option<JoinHandle<()>>,
}

struct Session {
    state: SessionState,
    resources: Resources,
}

struct NavigatorInner {
    owner: UserId,
    config: NavigatorConfig,
    timeout: Option<Duration>,
    surface: Arc<dyn MessageSurface>,
    cache: PreviewStoreCache,
    registry: Option<SessionRegistry>,
    session: Mutex<Session>,
}

/// Point-in-time view of a session, for inspection and tests.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct NavigatorSnapshot {
    status: SessionStatus,
    message: Option<MessageHandle>,
    position: usize,
    store: PageStore,
    slots: Vec<String>,
    preview_open: bool,
    generation: u64,
}

/// One live paginated message.
///
/// The navigator is a cheap, cloneable handle. All activations go through a
/// per-session async lock, so two presses on the same message are applied one
/// after the other, each seeing the result of the previous one.
///
/// Ownership is checked before the lock is taken: a non-owner's press is
/// rejected without waiting on, or touching, the session state.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<NavigatorInner>,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("owner", &self.inner.owner)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Creates a new navigator builder.
    pub fn builder() -> NavigatorBuilder {
        NavigatorBuilder::default()
    }

    /// The only user allowed to press this navigator's controls.
    pub fn owner(&self) -> UserId {
        self.inner.owner
    }

    /// Current state of the session.
    pub async fn snapshot(&self) -> NavigatorSnapshot {
        let session = self.inner.session.lock().await;
        let state = &session.state;
        NavigatorSnapshot {
            status: state.status,
            message: state.message,
            position: state.view.position,
            store: state.view.store.clone(),
            slots: state.view.controls.slots(),
            preview_open: state.preview_open(),
            generation: state.generation,
        }
    }

    /// Whether the session has ended.
    pub async fn is_terminated(&self) -> bool {
        self.inner.session.lock().await.state.is_terminated()
    }

    /// Render the current page and controls without sending anything.
    ///
    /// Hosts that post the first message themselves (for example as an
    /// interaction response) send this view and then call [`Navigator::bind`].
    pub async fn current_view(&self) -> NavigatorResult<RenderedView> {
        let session = self.inner.session.lock().await;
        session.state.render(*self.inner.config.show_page_counter())
    }

    /// Send the first page to `channel` and start the session.
    ///
    /// The session lock is held across the send, so an activation racing the
    /// send waits until the message handle is bound.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorErrorKind::AlreadyStarted`] on a second call, a
    /// render error if the first page violates platform limits, or the
    /// surface's error if sending fails.
    #[instrument(skip(self), fields(owner = %self.inner.owner, channel = %channel))]
    pub async fn start(&self, channel: ChannelId) -> NavigatorResult<MessageHandle> {
        let mut session = self.inner.session.lock().await;
        ensure_unbound(&session.state)?;
        let view = session
            .state
            .render(*self.inner.config.show_page_counter())?;
        let handle = self.inner.surface.send(channel, &view).await.inspect_err(|e| {
            error!(error = %e, "Failed to send first page");
        })?;
        self.bind_locked(&mut session, handle);
        Ok(handle)
    }

    /// Start the session for a message the host already sent with [`Navigator::current_view`].
    #[instrument(skip(self), fields(owner = %self.inner.owner, message = %handle))]
    pub async fn bind(&self, handle: MessageHandle) -> NavigatorResult<()> {
        let mut session = self.inner.session.lock().await;
        ensure_unbound(&session.state)?;
        self.bind_locked(&mut session, handle);
        Ok(())
    }

    fn bind_locked(&self, session: &mut Session, handle: MessageHandle) {
        let message = *handle.message();
        session.state.message = Some(handle);

        session.resources.slot = self.inner.cache.claim(message);
        if session.resources.slot.is_none() {
            warn!(%message, "Preview cache key already claimed; previews will not be cached");
        }

        if let Some(registry) = &self.inner.registry {
            registry.insert(message, self.clone());
        }

        if let Some(timeout) = self.inner.timeout {
            session.state.deadline = Some(Instant::now() + timeout);
            let navigator = self.clone();
            session.resources.timer = Some(tokio::spawn(async move {
                navigator.run_timer().await;
            }));
        }

        info!(
            %handle,
            pages = session.state.view.store.len(),
            timeout = ?self.inner.timeout,
            "Navigator started"
        );
    }

    /// Handle a control press.
    ///
    /// # Errors
    ///
    /// Render and surface failures are returned as errors; the session keeps
    /// its pre-activation state. Ownership rejections, stale presses and
    /// preview fetch failures are reported through [`Activation`] instead.
    #[instrument(
        skip(self),
        fields(
            owner = %self.inner.owner,
            actor = %actor,
            slot = tracing::field::Empty,
            generation = tracing::field::Empty
        )
    )]
    pub async fn activate(&self, actor: UserId, control_id: &str) -> NavigatorResult<Activation> {
        // Owner is immutable, so this check needs no lock and happens before any await
        if actor != self.inner.owner {
            warn!("Rejected activation from non-owner");
            return Ok(Activation::Rejected(
                self.inner.config.unauthorized_notice().clone(),
            ));
        }

        let Some(id) = ControlId::parse(control_id) else {
            debug!(control_id, "Ignoring unrecognised control id");
            return Ok(Activation::Stale);
        };
        tracing::Span::current().record("slot", id.slot().as_str());
        tracing::Span::current().record("generation", id.generation());

        let mut session = self.inner.session.lock().await;
        let Some(handle) = session.state.message else {
            debug!("Ignoring activation on unbound session");
            return Ok(Activation::Stale);
        };
        if session.state.is_terminated() {
            debug!("Ignoring activation on terminated session");
            return Ok(Activation::Stale);
        }
        if *id.generation() != session.state.generation {
            debug!(
                current = session.state.generation,
                "Ignoring activation from an outdated render"
            );
            return Ok(Activation::Stale);
        }
        let Some(control) = session.state.view.controls.get(id.slot()).cloned() else {
            debug!("Ignoring activation of a control not in the current set");
            return Ok(Activation::Stale);
        };

        let transition = match session.state.plan_local(&control) {
            Some(transition) => transition,
            None => match control.kind() {
                ControlKind::Preview { source, .. } => {
                    match self.open_preview(&session, &control, source.as_ref()).await {
                        Ok(transition) => transition,
                        Err(e) if e.is_preview_failure() => {
                            warn!(error = %e, "Preview unavailable");
                            return Ok(Activation::Failed(
                                self.inner.config.preview_failed_notice().clone(),
                            ));
                        }
                        Err(e) => return Err(e),
                    }
                }
                _ => return Ok(Activation::Stale),
            },
        };

        if matches!(transition, Transition::Terminate) {
            self.teardown_locked(&mut session, TeardownReason::Killed)
                .await;
            return Ok(Activation::Terminated);
        }

        let fetched_preview = match &transition {
            Transition::OpenPreview {
                store,
                fetched: true,
                ..
            } => Some(store.clone()),
            _ => None,
        };
        let mut candidate = session.state.apply(transition);
        let view = candidate.render(*self.inner.config.show_page_counter())?;
        self.inner
            .surface
            .edit(&handle, &view)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to re-render message"))?;

        if *self.inner.config.timeout_policy() == TimeoutPolicy::Sliding
            && let Some(timeout) = self.inner.timeout
        {
            candidate.deadline = Some(Instant::now() + timeout);
        }
        session.state = candidate;
        // Only stores that rendered successfully are worth serving again
        if let (Some(store), Some(slot)) = (fetched_preview, &session.resources.slot) {
            slot.insert(store);
        }
        debug!(
            position = session.state.view.position,
            generation = session.state.generation,
            "Activation applied"
        );
        Ok(Activation::Updated)
    }

    async fn open_preview(
        &self,
        session: &Session,
        control: &crate::Control,
        source: &dyn crate::PreviewSource,
    ) -> NavigatorResult<Transition> {
        let controls = ControlSet::preview_layout(control.clone())?;
        let cached = session.resources.slot.as_ref().and_then(CacheSlot::get);
        let (store, fetched) = match cached {
            Some(store) => {
                debug!("Preview served from cache");
                (store, false)
            }
            None => {
                debug!("Fetching preview");
                let store = source.fetch().await?;
                if store.is_empty() {
                    return Err(NavigatorError::new(NavigatorErrorKind::PreviewNotFound));
                }
                (store, true)
            }
        };
        Ok(Transition::OpenPreview {
            store,
            controls,
            fetched,
        })
    }

    /// End the session, stripping its controls.
    ///
    /// Returns `false` if the session had already ended.
    #[instrument(skip(self), fields(owner = %self.inner.owner))]
    pub async fn close(&self) -> bool {
        let mut session = self.inner.session.lock().await;
        self.teardown_locked(&mut session, TeardownReason::Closed)
            .await
    }

    async fn run_timer(self) {
        loop {
            let deadline = {
                let session = self.inner.session.lock().await;
                if session.state.is_terminated() {
                    return;
                }
                match session.state.deadline {
                    Some(deadline) => deadline,
                    None => return,
                }
            };

            tokio::time::sleep_until(deadline).await;

            let mut session = self.inner.session.lock().await;
            if session.state.is_terminated() {
                return;
            }
            // A sliding deadline may have moved while we slept
            if session
                .state
                .deadline
                .is_some_and(|current| current > Instant::now())
            {
                continue;
            }
            // The timer is finishing on its own; it must not be aborted mid-teardown
            session.resources.timer.take();
            self.teardown_locked(&mut session, TeardownReason::Expired)
                .await;
            return;
        }
    }

    /// The single terminal transition. Returns whether this call performed it.
    async fn teardown_locked(&self, session: &mut Session, reason: TeardownReason) -> bool {
        if session.state.is_terminated() {
            debug!(%reason, "Teardown already done");
            return false;
        }
        session.state = session.state.apply(Transition::Terminate);

        if let Some(timer) = session.resources.timer.take() {
            timer.abort();
        }
        if let Some(slot) = session.resources.slot.take() {
            slot.release();
        }

        let Some(handle) = session.state.message else {
            info!(%reason, "Unbound navigator terminated");
            return true;
        };
        if let Some(registry) = &self.inner.registry {
            registry.remove(handle.message());
        }

        let result = match reason {
            TeardownReason::Killed => self.inner.surface.delete(&handle).await,
            TeardownReason::Expired | TeardownReason::Closed => {
                self.inner.surface.strip_controls(&handle).await
            }
        };
        match result {
            Ok(()) => info!(%handle, %reason, "Navigator terminated"),
            Err(e) => error!(%handle, %reason, error = %e, "Teardown request failed"),
        }
        true
    }
}

fn ensure_unbound(state: &SessionState) -> NavigatorResult<()> {
    if state.message.is_some() || state.is_terminated() {
        return Err(NavigatorError::new(NavigatorErrorKind::AlreadyStarted));
    }
    Ok(())
}

/// Builder for [`Navigator`].
///
/// `owner`, `pages` and `surface` are required. Without explicit controls a
/// multi-page store gets `[Previous, Next, Kill]` and a single page gets `[Kill]`.
#[derive(Default)]
pub struct NavigatorBuilder {
    owner: Option<UserId>,
    pages: Option<PageStore>,
    controls: Option<ControlSet>,
    config: NavigatorConfig,
    timeout: Option<Option<Duration>>,
    surface: Option<Arc<dyn MessageSurface>>,
    cache: Option<PreviewStoreCache>,
    registry: Option<SessionRegistry>,
}

impl NavigatorBuilder {
    /// The user allowed to press the controls.
    pub fn owner(mut self, owner: impl Into<UserId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// The initial page store.
    pub fn pages(mut self, pages: impl Into<PageStore>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    /// The initial control set.
    pub fn controls(mut self, controls: ControlSet) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Behaviour settings; also supplies the default timeout.
    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the configured timeout; `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Where messages are sent and edited.
    pub fn surface(mut self, surface: Arc<dyn MessageSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Shared preview cache; a private default cache is used if unset.
    pub fn cache(mut self, cache: PreviewStoreCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Registry the session joins once started.
    pub fn registry(mut self, registry: SessionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the navigator.
    ///
    /// # Errors
    ///
    /// Returns [`NavigatorErrorKind::Builder`] if a required part is missing,
    /// [`NavigatorErrorKind::EmptyStore`] if the page store is empty and
    /// [`NavigatorErrorKind::InvalidControl`] if a swap control's first side is
    /// not the initial page store.
    pub fn build(self) -> NavigatorResult<Navigator> {
        let owner = self
            .owner
            .ok_or_else(|| NavigatorError::new(NavigatorErrorKind::Builder("owner is required".into())))?;
        let pages = self
            .pages
            .ok_or_else(|| NavigatorError::new(NavigatorErrorKind::Builder("pages are required".into())))?;
        let surface = self.surface.ok_or_else(|| {
            NavigatorError::new(NavigatorErrorKind::Builder("surface is required".into()))
        })?;
        pages.ensure_renderable()?;

        let controls = match self.controls {
            Some(controls) => controls,
            None if pages.len() > 1 => ControlSet::paginated(),
            None => ControlSet::new(vec![crate::Control::kill()])?,
        };
        // The swap state starts on side 0, so side 0 must be what is shown first
        for control in controls.iter() {
            if let ControlKind::Swap { sides } = control.kind()
                && sides[0].pages() != &pages
            {
                return Err(NavigatorError::new(NavigatorErrorKind::InvalidControl(
                    format!(
                        "swap '{}' must list the initial pages as its first side",
                        control.slot()
                    ),
                )));
            }
        }
        let timeout = self.timeout.unwrap_or_else(|| self.config.timeout());
        let cache = self
            .cache
            .unwrap_or_else(|| PreviewStoreCache::new(Default::default()));

        debug!(%owner, pages = pages.len(), controls = controls.len(), "Building navigator");

        Ok(Navigator {
            inner: Arc::new(NavigatorInner {
                owner,
                config: self.config,
                timeout,
                surface,
                cache,
                registry: self.registry,
                session: Mutex::new(Session {
                    state: SessionState::new(pages, controls),
                    resources: Resources::default(),
                }),
            }),
        })
    }
}
