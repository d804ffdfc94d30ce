//! Reinhardt SSR Cache - server-rendered data handoff for hydration
//!
//! Data computed during server-side rendering is embedded into the page as a
//! non-executable JSON `<script>` element. During client-side hydration the
//! same data is read back by identifier instead of being computed or fetched
//! a second time.
//!
//! ## Architecture
//!
//! - [`embed`]: the embedder ([`SsrCache`], [`CacheScript`])
//! - [`collector`]: gathers every cache element of one server render
//! - [`reader`]: the hydration-side reader and its memoized hook state
//! - [`document`]: element lookup by id ([`ElementLookup`], [`HydrationDocument`])
//! - [`memo`]: render-scope memoization
//! - [`env`]: server/client render environment
//!
//! ## Flow
//!
//! ```
//! use reinhardt_ssr_cache::{
//!     HydrationDocument, RenderEnvironment, SsrCache, SsrCacheReader,
//! };
//! use serde_json::{json, Value};
//!
//! // Server render
//! let data = json!({ "userId": 42 });
//! let html = SsrCache::new("profile-cache", &data)
//!     .render(RenderEnvironment::Server)?
//!     .map(|script| script.to_html())
//!     .unwrap_or_default();
//!
//! // Client hydration
//! let doc = HydrationDocument::from_html(&html);
//! let reader = SsrCacheReader::<Value>::new();
//! let restored = reader.read(&doc, RenderEnvironment::Client, "profile-cache", true);
//!
//! assert_eq!(restored.as_deref(), Some(&data));
//! # Ok::<(), reinhardt_ssr_cache::SsrCacheError>(())
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through `tracing`: a warning when embedded data fails to
//! parse or an identifier is embedded twice, debug events for lookups. The
//! crate installs no subscriber. In the browser the host must install a
//! WASM subscriber (for example `tracing-wasm`) or the hydration-side
//! warnings never reach `console.warn`.
//!
//! ## Identifier contract
//!
//! Identifiers are matched exactly and are not namespaced. Each identifier
//! must be used at most once per page; when it is reused, readers see the
//! first element in document order.

pub mod collector;
pub mod document;
pub mod embed;
pub mod env;
pub mod error;
mod escape;
pub mod memo;
pub mod options;
pub mod reader;

pub use collector::SsrCacheCollector;
#[cfg(target_arch = "wasm32")]
pub use document::current_document;
pub use document::{ElementLookup, HydrationDocument};
pub use embed::{CacheScript, SSR_CACHE_CONTENT_TYPE, SsrCache};
pub use env::RenderEnvironment;
pub use error::{Result, SsrCacheError};
pub use memo::MemoSlot;
pub use options::{Placeholder, SsrCacheOptions};
pub use reader::{SsrCacheReader, read_ssr_cache, try_read_ssr_cache, use_ssr_cache};
