//! Error types for SSR cache embedding and reading.

/// Errors raised while embedding or reading cached SSR data.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SsrCacheError {
	/// The value could not be serialized to JSON on the server.
	#[error("Failed to serialize SSR cache entry '{name}': {source}")]
	Serialize {
		/// Identifier of the entry being embedded.
		name: String,
		/// Underlying serializer error.
		#[source]
		source: serde_json::Error,
	},

	/// The embedded text could not be parsed back into the requested type.
	#[error("Failed to parse SSR cache entry '{name}': {source}")]
	Parse {
		/// Identifier of the entry being read.
		name: String,
		/// Underlying parser error.
		#[source]
		source: serde_json::Error,
	},
}

impl SsrCacheError {
	/// Returns the identifier of the entry that failed.
	pub fn name(&self) -> &str {
		match self {
			Self::Serialize { name, .. } | Self::Parse { name, .. } => name,
		}
	}
}

/// Result type alias for SSR cache operations.
pub type Result<T> = std::result::Result<T, SsrCacheError>;
