//! The reader: restores embedded data during hydration.
//!
//! Reads never fail outward. A missing element, empty text or malformed JSON
//! all produce `None`, which tells the caller to compute or fetch the data
//! itself. Parse failures are logged with `tracing::warn!`; use
//! [`try_read_ssr_cache`] to observe them directly. On `wasm32` the warning
//! is only visible once the host installs a browser subscriber such as
//! `tracing-wasm`.
//!
//! ## Example
//!
//! ```
//! use reinhardt_ssr_cache::{HydrationDocument, RenderEnvironment, SsrCacheReader};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct Profile {
//!     #[serde(rename = "userId")]
//!     user_id: u32,
//! }
//!
//! let doc = HydrationDocument::from_html(
//!     r#"<script type="application/json" id="profile-cache">{"userId":42}</script>"#,
//! );
//!
//! let reader = SsrCacheReader::<Profile>::new();
//! let profile = reader.read(&doc, RenderEnvironment::Client, "profile-cache", true);
//! assert_eq!(profile.as_deref(), Some(&Profile { user_id: 42 }));
//! ```

use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::document::ElementLookup;
use crate::env::RenderEnvironment;
use crate::error::{Result, SsrCacheError};
use crate::memo::MemoSlot;

/// Reads and parses the entry `name`, reporting parse failures as errors.
///
/// Returns `Ok(None)` on the server, when `enabled` is false, when no element
/// has the id `name`, or when the element has no text.
pub fn try_read_ssr_cache<T, L>(
	lookup: &L,
	env: RenderEnvironment,
	name: &str,
	enabled: bool,
) -> Result<Option<T>>
where
	T: DeserializeOwned,
	L: ElementLookup + ?Sized,
{
	if env.is_server() || !enabled {
		return Ok(None);
	}

	let Some(text) = lookup.text_content_by_id(name) else {
		tracing::debug!(name, "No SSR cache element found");
		return Ok(None);
	};
	if text.is_empty() {
		return Ok(None);
	}

	serde_json::from_str(&text)
		.map(Some)
		.map_err(|source| SsrCacheError::Parse {
			name: name.to_string(),
			source,
		})
}

/// Reads and parses the entry `name`, logging and discarding parse failures.
pub fn read_ssr_cache<T, L>(
	lookup: &L,
	env: RenderEnvironment,
	name: &str,
	enabled: bool,
) -> Option<T>
where
	T: DeserializeOwned,
	L: ElementLookup + ?Sized,
{
	match try_read_ssr_cache(lookup, env, name, enabled) {
		Ok(value) => value,
		Err(error) => {
			tracing::warn!(name, %error, "Failed to parse SSR cache data");
			None
		}
	}
}

/// Memoized reader state for one call site.
///
/// Keep one `SsrCacheReader` per component instance. Repeated reads with the
/// same identifier, environment and flag return the same `Rc` without
/// touching the page again; changing any of them parses afresh.
#[derive(Debug)]
pub struct SsrCacheReader<T> {
	slot: MemoSlot<(String, RenderEnvironment, bool), Option<Rc<T>>>,
}

impl<T> Default for SsrCacheReader<T> {
	fn default() -> Self {
		Self {
			slot: MemoSlot::default(),
		}
	}
}

impl<T: DeserializeOwned> SsrCacheReader<T> {
	/// Creates a reader with an empty memo slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads the entry `name`, memoized on `(name, env, enabled)`.
	pub fn read<L>(
		&self,
		lookup: &L,
		env: RenderEnvironment,
		name: &str,
		enabled: bool,
	) -> Option<Rc<T>>
	where
		L: ElementLookup + ?Sized,
	{
		self.slot
			.get_or_compute((name.to_string(), env, enabled), |(name, env, enabled)| {
				read_ssr_cache(lookup, *env, name, *enabled).map(Rc::new)
			})
	}

	/// Checks whether a result for `(name, env, enabled)` is memoized.
	pub fn is_cached(&self, name: &str, env: RenderEnvironment, enabled: bool) -> bool {
		self.slot.is_cached(&(name.to_string(), env, enabled))
	}

	/// Forgets the memoized result.
	pub fn reset(&self) {
		self.slot.invalidate();
	}
}

/// Reads `name` through `reader` in the detected environment with the cache
/// enabled.
///
/// This is the usual hook entry point inside a component; it behaves like
/// [`SsrCacheReader::read`] with [`RenderEnvironment::detect`] and
/// `enabled = true`.
pub fn use_ssr_cache<T, L>(reader: &SsrCacheReader<T>, lookup: &L, name: &str) -> Option<Rc<T>>
where
	T: DeserializeOwned,
	L: ElementLookup + ?Sized,
{
	reader.read(lookup, RenderEnvironment::detect(), name, true)
}
