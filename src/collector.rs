//! Collects the cache elements of one server render.

use std::collections::HashSet;

use serde::Serialize;

use crate::embed::{CacheScript, SsrCache};
use crate::env::RenderEnvironment;
use crate::error::Result;
use crate::options::SsrCacheOptions;

/// Accumulates [`CacheScript`]s while a page renders and emits them together.
///
/// Identifiers are expected to be unique per page. Embedding the same
/// identifier twice is allowed but logged, because the reader will only ever
/// see the first element with a given id.
#[derive(Debug, Clone)]
pub struct SsrCacheCollector {
	env: RenderEnvironment,
	options: SsrCacheOptions,
	scripts: Vec<CacheScript>,
	seen: HashSet<String>,
}

impl SsrCacheCollector {
	/// Creates a collector for the given environment with default options.
	pub fn new(env: RenderEnvironment) -> Self {
		Self::with_options(env, SsrCacheOptions::default())
	}

	/// Creates a collector with explicit options applied to every entry.
	pub fn with_options(env: RenderEnvironment, options: SsrCacheOptions) -> Self {
		Self {
			env,
			options,
			scripts: Vec::new(),
			seen: HashSet::new(),
		}
	}

	/// Embeds `data` under `name`.
	///
	/// Serialization errors are returned and nothing is recorded for the
	/// failing entry.
	pub fn embed<T>(&mut self, name: impl Into<String>, data: &T) -> Result<()>
	where
		T: Serialize + ?Sized,
	{
		let rendered = SsrCache::new(name, data)
			.options(self.options.clone())
			.render(self.env)?;

		if let Some(script) = rendered {
			self.push(script);
		}
		Ok(())
	}

	/// Records an already rendered element.
	pub fn push(&mut self, script: CacheScript) {
		if !self.seen.insert(script.id().to_string()) {
			tracing::warn!(
				name = %script.id(),
				"SSR cache identifier embedded more than once; readers will see the first entry"
			);
		}
		self.scripts.push(script);
	}

	/// Returns the collected elements in embedding order.
	pub fn scripts(&self) -> &[CacheScript] {
		&self.scripts
	}

	/// Returns the number of collected elements.
	pub fn len(&self) -> usize {
		self.scripts.len()
	}

	/// Checks if nothing has been collected.
	pub fn is_empty(&self) -> bool {
		self.scripts.is_empty()
	}

	/// Renders every collected element, concatenated in embedding order.
	pub fn to_html(&self) -> String {
		self.scripts.iter().map(CacheScript::to_html).collect()
	}

	/// Consumes the collector and returns its elements.
	pub fn into_scripts(self) -> Vec<CacheScript> {
		self.scripts
	}
}
