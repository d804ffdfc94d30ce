//! Render environment detection.
//!
//! The embedder and the reader both branch on whether they run inside a
//! server render or a client (hydrating) render. The environment is passed
//! in explicitly so that both sides can be exercised from native tests.

/// The execution context a render runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderEnvironment {
	/// Server-side rendering: no browser window is available.
	Server,
	/// Client-side rendering or hydration inside a browser.
	Client,
}

impl RenderEnvironment {
	/// Detects the environment from the compilation target.
	///
	/// WASM builds run in the browser and report [`RenderEnvironment::Client`];
	/// every other target reports [`RenderEnvironment::Server`].
	#[cfg(target_arch = "wasm32")]
	pub fn detect() -> Self {
		Self::Client
	}

	/// Detects the environment from the compilation target.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn detect() -> Self {
		Self::Server
	}

	/// Returns true for a server render.
	pub fn is_server(self) -> bool {
		matches!(self, Self::Server)
	}

	/// Returns true for a client render.
	pub fn is_client(self) -> bool {
		matches!(self, Self::Client)
	}
}

impl Default for RenderEnvironment {
	fn default() -> Self {
		Self::detect()
	}
}
