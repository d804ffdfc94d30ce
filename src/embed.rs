//! The embedder: serializes server data into a JSON `<script>` element.
//!
//! During a server render, [`SsrCache`] writes its value as the text of a
//! non-executable `<script type="application/json">` element whose `id` is
//! the cache identifier. Outside a server render it writes a placeholder, so
//! server data never ends up in client-rendered markup.
//!
//! ## Example
//!
//! ```
//! use reinhardt_ssr_cache::{RenderEnvironment, SsrCache};
//! use serde_json::json;
//!
//! let data = json!({ "userId": 42 });
//! let script = SsrCache::new("profile-cache", &data)
//!     .render(RenderEnvironment::Server)
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(
//!     script.to_html(),
//!     r#"<script type="application/json" id="profile-cache">{"userId":42}</script>"#
//! );
//! ```

use std::fmt;

use serde::Serialize;

use crate::env::RenderEnvironment;
use crate::error::{Result, SsrCacheError};
use crate::escape::{escape_json_for_script, html_escape_attr};
use crate::options::{Placeholder, SsrCacheOptions};

/// The MIME type written to the `type` attribute of cache elements.
pub const SSR_CACHE_CONTENT_TYPE: &str = "application/json";

/// A value to embed under an identifier during rendering.
#[derive(Debug, Clone)]
pub struct SsrCache<'a, T: ?Sized> {
	name: String,
	data: &'a T,
	options: SsrCacheOptions,
}

impl<'a, T> SsrCache<'a, T>
where
	T: Serialize + ?Sized,
{
	/// Creates an embedder for `data` under the identifier `name`.
	pub fn new(name: impl Into<String>, data: &'a T) -> Self {
		Self {
			name: name.into(),
			data,
			options: SsrCacheOptions::default(),
		}
	}

	/// Replaces all options.
	pub fn options(mut self, options: SsrCacheOptions) -> Self {
		self.options = options;
		self
	}

	/// Enables or disables embedding.
	pub fn enabled(mut self, enabled: bool) -> Self {
		self.options.enabled = enabled;
		self
	}

	/// Sets the payload written outside a server render.
	pub fn placeholder(mut self, placeholder: Placeholder) -> Self {
		self.options.placeholder = placeholder;
		self
	}

	/// Returns the cache identifier.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Renders the cache element for the given environment.
	///
	/// Returns `Ok(None)` when the cache is disabled. Serialization errors are
	/// returned to the caller unchanged; no fallback markup is produced.
	pub fn render(&self, env: RenderEnvironment) -> Result<Option<CacheScript>> {
		if !self.options.enabled {
			tracing::debug!(name = %self.name, "SSR cache disabled, skipping embed");
			return Ok(None);
		}

		let json = match env {
			RenderEnvironment::Server => {
				serde_json::to_string(self.data).map_err(|source| SsrCacheError::Serialize {
					name: self.name.clone(),
					source,
				})?
			}
			RenderEnvironment::Client => self.options.placeholder.as_json().to_string(),
		};

		Ok(Some(CacheScript::from_json(self.name.clone(), &json)))
	}
}

/// A rendered cache element.
///
/// The text content is already escaped for placement inside `<script>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheScript {
	id: String,
	content: String,
}

impl CacheScript {
	/// Creates an element carrying already-serialized JSON.
	pub fn from_json(id: impl Into<String>, json: &str) -> Self {
		Self {
			id: id.into(),
			content: escape_json_for_script(json),
		}
	}

	/// The element id (the cache identifier).
	pub fn id(&self) -> &str {
		&self.id
	}

	/// The script text content.
	pub fn content(&self) -> &str {
		&self.content
	}

	/// Cache elements always differ between server and client markup, so
	/// hydration must not report a mismatch for them.
	pub fn suppress_hydration_warning(&self) -> bool {
		true
	}

	/// Generates the HTML attributes for this element.
	pub fn to_attrs(&self) -> Vec<(&'static str, String)> {
		vec![
			("type", SSR_CACHE_CONTENT_TYPE.to_string()),
			("id", self.id.clone()),
		]
	}

	/// Renders the element to an HTML string.
	pub fn to_html(&self) -> String {
		let attrs = self
			.to_attrs()
			.iter()
			.map(|(k, v)| format!("{}=\"{}\"", k, html_escape_attr(v)))
			.collect::<Vec<_>>()
			.join(" ");
		format!("<script {}>{}</script>", attrs, self.content)
	}
}

impl fmt::Display for CacheScript {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_html())
	}
}
