//! Options for SSR cache embedding and reading.

/// The neutral payload written instead of real data outside a server render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placeholder {
	/// An empty JSON object: `{}`.
	#[default]
	EmptyObject,
	/// JSON `null`.
	Null,
}

impl Placeholder {
	/// Returns the JSON text for this placeholder.
	pub fn as_json(self) -> &'static str {
		match self {
			Self::EmptyObject => "{}",
			Self::Null => "null",
		}
	}
}

/// Options shared by [`SsrCache`](crate::SsrCache) and the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsrCacheOptions {
	/// Whether the cache participates in rendering at all.
	///
	/// When false the embedder emits nothing and the reader always
	/// returns `None`, regardless of the render environment.
	pub enabled: bool,
	/// Payload written when embedding outside a server render.
	pub placeholder: Placeholder,
}

impl Default for SsrCacheOptions {
	fn default() -> Self {
		Self {
			enabled: true,
			placeholder: Placeholder::EmptyObject,
		}
	}
}

impl SsrCacheOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Enables or disables the cache.
	pub fn enabled(mut self, enabled: bool) -> Self {
		self.enabled = enabled;
		self
	}

	/// Disables the cache.
	pub fn disabled(self) -> Self {
		self.enabled(false)
	}

	/// Sets the client-side placeholder.
	pub fn placeholder(mut self, placeholder: Placeholder) -> Self {
		self.placeholder = placeholder;
		self
	}
}
