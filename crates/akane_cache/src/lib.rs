//! Preview caching with single-owner slots.
//!
//! Navigators memoize expensive auxiliary page stores (previews, trailers)
//! keyed by the identity of the message they own. This crate provides that
//! cache as an explicit, injectable service: a bounded LRU map whose keys can
//! only be written or deleted through a [`CacheSlot`] held by the key's owner.

#![warn(missing_docs)]

mod cache;

pub use cache::{CacheSlot, PreviewCache, PreviewCacheConfig, PreviewCacheConfigBuilder};
