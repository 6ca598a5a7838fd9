//! Sources of auxiliary preview page stores.

use akane_core::PageStore;
use akane_error::NavigatorResult;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Produces the page store a preview control opens.
///
/// Implementations typically call an upstream API. A returned empty store is
/// treated as "not found" by the navigator.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct TrailerPreview {
///     client: reqwest::Client,
///     anime_id: u64,
/// }
///
/// #[async_trait]
/// impl PreviewSource for TrailerPreview {
///     async fn fetch(&self) -> NavigatorResult<PageStore> {
///         let trailer = fetch_trailer(&self.client, self.anime_id).await?;
///         Ok(PageStore::single(Page::from(trailer.url)))
///     }
/// }
/// ```
#[async_trait]
pub trait PreviewSource: Send + Sync {
    /// Fetch the preview pages.
    async fn fetch(&self) -> NavigatorResult<PageStore>;
}

/// [`PreviewSource`] backed by an async closure.
pub struct FnPreviewSource<F> {
    fetch: F,
}

#[async_trait]
impl<F, Fut> PreviewSource for FnPreviewSource<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = NavigatorResult<PageStore>> + Send,
{
    async fn fetch(&self) -> NavigatorResult<PageStore> {
        (self.fetch)().await
    }
}

/// Wraps an async closure as a shareable [`PreviewSource`].
///
/// # Examples
///
/// ```
/// use akane_core::{Page, PageStore};
/// use akane_navigator::preview_fn;
///
/// let source = preview_fn(|| async {
///     Ok(PageStore::new(vec![Page::from("P1"), Page::from("P2")]))
/// });
/// # let _ = source;
/// ```
pub fn preview_fn<F, Fut>(fetch: F) -> Arc<dyn PreviewSource>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = NavigatorResult<PageStore>> + Send + 'static,
{
    Arc::new(FnPreviewSource { fetch })
}
