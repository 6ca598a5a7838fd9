//! Ordered page sequences.

use crate::Page;
use akane_error::{NavigatorError, NavigatorErrorKind, NavigatorResult};
use std::sync::Arc;

/// Ordered, immutable sequence of pages backing one paginated message.
///
/// Cloning is cheap: clones share the same page slice. The current position
/// is not stored here; it belongs to whoever is navigating the store.
///
/// # Examples
///
/// ```
/// use akane_core::{Page, PageStore};
///
/// let store: PageStore = ["A", "B", "C"].into_iter().map(Page::from).collect();
/// assert_eq!(store.len(), 3);
/// assert_eq!(store.get(1), Some(&Page::from("B")));
///
/// let preview = store.replace(vec![Page::from("P1"), Page::from("P2")]);
/// assert_eq!(preview.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStore {
    pages: Arc<[Page]>,
}

impl PageStore {
    /// Wraps an ordered sequence of pages.
    ///
    /// An empty store can be built, but must never be rendered; see
    /// [`PageStore::ensure_renderable`].
    pub fn new(pages: impl Into<Vec<Page>>) -> Self {
        let pages: Vec<Page> = pages.into();
        Self {
            pages: pages.into(),
        }
    }

    /// A store holding exactly one page.
    pub fn single(page: impl Into<Page>) -> Self {
        Self::new(vec![page.into()])
    }

    /// The pages in display order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the store has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Discards this sequence and returns a new one.
    ///
    /// Positions into the old store are meaningless for the new one; the
    /// caller must reset or clamp.
    pub fn replace(self, pages: impl Into<Vec<Page>>) -> PageStore {
        let replacement = PageStore::new(pages);
        tracing::debug!(
            old_len = self.len(),
            new_len = replacement.len(),
            "Replacing page store"
        );
        replacement
    }

    /// Fails with [`NavigatorErrorKind::EmptyStore`] if there is nothing to render.
    #[track_caller]
    pub fn ensure_renderable(&self) -> NavigatorResult<()> {
        if self.is_empty() {
            return Err(NavigatorError::new(NavigatorErrorKind::EmptyStore));
        }
        Ok(())
    }

    /// Checks that the store is non-empty and every page is within limits.
    pub fn validate(&self) -> NavigatorResult<()> {
        self.ensure_renderable()?;
        self.pages.iter().try_for_each(Page::validate)
    }
}

impl From<Vec<Page>> for PageStore {
    fn from(pages: Vec<Page>) -> Self {
        Self::new(pages)
    }
}

impl FromIterator<Page> for PageStore {
    fn from_iter<I: IntoIterator<Item = Page>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}
