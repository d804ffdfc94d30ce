//! Page-scoped element lookup for hydration.
//!
//! The reader only needs one capability from the page: find the element
//! with a given `id` and return its text. [`ElementLookup`] is that seam.
//! In the browser it is backed by the live `Document`; elsewhere
//! [`HydrationDocument`] builds an explicit id → text map from rendered
//! markup.

use std::borrow::Cow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::escape::html_unescape_attr;

/// Looks up the text content of an element by its `id`.
pub trait ElementLookup {
	/// Returns the text content of the element with `id`, if present.
	fn text_content_by_id(&self, id: &str) -> Option<Cow<'_, str>>;
}

impl<L: ElementLookup + ?Sized> ElementLookup for &L {
	fn text_content_by_id(&self, id: &str) -> Option<Cow<'_, str>> {
		(**self).text_content_by_id(id)
	}
}

impl ElementLookup for HashMap<String, String> {
	fn text_content_by_id(&self, id: &str) -> Option<Cow<'_, str>> {
		self.get(id).map(|text| Cow::Borrowed(text.as_str()))
	}
}

#[cfg(target_arch = "wasm32")]
impl ElementLookup for web_sys::Document {
	fn text_content_by_id(&self, id: &str) -> Option<Cow<'_, str>> {
		self.get_element_by_id(id)?.text_content().map(Cow::Owned)
	}
}

/// Returns the document of the current browser window.
#[cfg(target_arch = "wasm32")]
pub fn current_document() -> Option<web_sys::Document> {
	web_sys::window()?.document()
}

/// The `<script>` elements of a rendered page, indexed by `id`.
///
/// When several elements share an id the first one in document order wins,
/// matching `getElementById`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationDocument {
	entries: HashMap<String, String>,
}

impl HydrationDocument {
	/// Creates an empty document.
	pub fn new() -> Self {
		Self::default()
	}

	/// Indexes every `<script>` element with an `id` in `html`.
	///
	/// Script text is taken verbatim (it is raw text in HTML); attribute
	/// values are entity-decoded.
	pub fn from_html(html: &str) -> Self {
		let mut doc = Self::new();
		for script in parse_scripts(html) {
			let Some(id) = script.id else {
				continue;
			};
			match doc.entries.entry(id) {
				Entry::Vacant(slot) => {
					slot.insert(script.text.to_string());
				}
				Entry::Occupied(slot) => {
					tracing::debug!(id = %slot.key(), "Duplicate element id in markup, keeping first");
				}
			}
		}
		doc
	}

	/// Sets the text of the element with `id`, replacing any existing one.
	pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
		self.entries.insert(id.into(), text.into());
	}

	/// Removes the element with `id`.
	pub fn remove(&mut self, id: &str) -> Option<String> {
		self.entries.remove(id)
	}

	/// Returns the text of the element with `id`.
	pub fn get(&self, id: &str) -> Option<&str> {
		self.entries.get(id).map(String::as_str)
	}

	/// Checks whether an element with `id` exists.
	pub fn contains(&self, id: &str) -> bool {
		self.entries.contains_key(id)
	}

	/// Returns the number of indexed elements.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Checks if no element is indexed.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl ElementLookup for HydrationDocument {
	fn text_content_by_id(&self, id: &str) -> Option<Cow<'_, str>> {
		self.get(id).map(Cow::Borrowed)
	}
}

const SCRIPT_OPEN: &[u8] = b"<script";
const SCRIPT_CLOSE: &[u8] = b"</script";

struct ScriptElement<'a> {
	id: Option<String>,
	text: &'a str,
}

fn find_ignore_case(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
	haystack
		.get(from..)?
		.windows(needle.len())
		.position(|window| window.eq_ignore_ascii_case(needle))
		.map(|pos| pos + from)
}

// Every index below lands on an ASCII delimiter or the end of input, so
// slicing the original `&str` never splits a UTF-8 sequence.
fn parse_scripts(html: &str) -> Vec<ScriptElement<'_>> {
	let bytes = html.as_bytes();
	let mut scripts = Vec::new();
	let mut pos = 0;

	while let Some(start) = find_ignore_case(bytes, SCRIPT_OPEN, pos) {
		let after_name = start + SCRIPT_OPEN.len();
		match bytes.get(after_name) {
			Some(&b) if b.is_ascii_whitespace() || b == b'>' || b == b'/' => {}
			_ => {
				// `<scripts>` or similar, not a script tag
				pos = after_name;
				continue;
			}
		}

		let Some((attrs, content_start)) = parse_attributes(html, after_name) else {
			break;
		};
		let content_end =
			find_ignore_case(bytes, SCRIPT_CLOSE, content_start).unwrap_or(bytes.len());

		let id = attrs
			.into_iter()
			.find(|(name, _)| name == "id")
			.map(|(_, value)| value);
		scripts.push(ScriptElement {
			id,
			text: &html[content_start..content_end],
		});

		pos = content_end + SCRIPT_CLOSE.len();
	}

	scripts
}

/// Parses attributes starting right after the tag name.
///
/// Returns the attributes (lowercased names, decoded values) and the index
/// just past the closing `>`, or `None` if the tag never closes.
fn parse_attributes(html: &str, from: usize) -> Option<(Vec<(String, String)>, usize)> {
	let bytes = html.as_bytes();
	let skip_whitespace = |mut i: usize| {
		while i < bytes.len() && bytes[i].is_ascii_whitespace() {
			i += 1;
		}
		i
	};

	let mut attrs = Vec::new();
	let mut i = from;
	loop {
		while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
			i += 1;
		}
		if *bytes.get(i)? == b'>' {
			return Some((attrs, i + 1));
		}

		let name_start = i;
		while i < bytes.len()
			&& !bytes[i].is_ascii_whitespace()
			&& !matches!(bytes[i], b'=' | b'>' | b'/')
		{
			i += 1;
		}
		let name = html[name_start..i].to_ascii_lowercase();

		i = skip_whitespace(i);
		let mut value = String::new();
		if bytes.get(i) == Some(&b'=') {
			i = skip_whitespace(i + 1);
			let quote = *bytes.get(i)?;
			if quote == b'"' || quote == b'\'' {
				let value_start = i + 1;
				let len = bytes.get(value_start..)?.iter().position(|&b| b == quote)?;
				value = html_unescape_attr(&html[value_start..value_start + len]);
				i = value_start + len + 1;
			} else {
				let value_start = i;
				while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
					i += 1;
				}
				value = html_unescape_attr(&html[value_start..i]);
			}
		}
		attrs.push((name, value));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_from_html_indexes_script_by_id() {
		let html = r#"<html><body><div id="app"></div><script type="application/json" id="profile-cache">{"userId":42}</script></body></html>"#;
		let doc = HydrationDocument::from_html(html);

		assert_eq!(doc.len(), 1);
		assert_eq!(doc.get("profile-cache"), Some(r#"{"userId":42}"#));
		assert!(!doc.contains("app"));
	}

	#[rstest]
	#[case(r#"<script id="x" type="application/json">1</script>"#)]
	#[case(r#"<script type='application/json' id='x'>1</script>"#)]
	#[case(r#"<SCRIPT TYPE="application/json" ID=x>1</SCRIPT>"#)]
	#[case("<script\n\ttype=\"application/json\"\n\tid = \"x\"\n>1</script >")]
	#[case(r#"<script defer id="x">1</script>"#)]
	fn test_attribute_forms(#[case] html: &str) {
		let doc = HydrationDocument::from_html(html);
		assert_eq!(doc.get("x"), Some("1"));
	}

	#[rstest]
	fn test_entity_decoded_id() {
		let doc = HydrationDocument::from_html(r#"<script id="a&quot;b&amp;c">[]</script>"#);
		assert_eq!(doc.get("a\"b&c"), Some("[]"));
	}

	#[rstest]
	fn test_first_duplicate_wins() {
		let html = r#"<script id="dup">"first"</script><script id="dup">"second"</script>"#;
		let doc = HydrationDocument::from_html(html);
		assert_eq!(doc.len(), 1);
		assert_eq!(doc.get("dup"), Some(r#""first""#));
	}

	#[rstest]
	fn test_scripts_without_id_are_ignored() {
		let html = r#"<script>console.log(1)</script><script id="y">2</script>"#;
		let doc = HydrationDocument::from_html(html);
		assert_eq!(doc.len(), 1);
		assert_eq!(doc.get("y"), Some("2"));
	}

	#[rstest]
	fn test_similar_tag_names_are_not_scripts() {
		let html = r#"<scripts id="n">no</scripts><script id="s">yes</script>"#;
		let doc = HydrationDocument::from_html(html);
		assert!(!doc.contains("n"));
		assert_eq!(doc.get("s"), Some("yes"));
	}

	#[rstest]
	fn test_empty_and_unterminated_scripts() {
		let doc = HydrationDocument::from_html(r#"<script id="empty"></script><script id="open">tail"#);
		assert_eq!(doc.get("empty"), Some(""));
		assert_eq!(doc.get("open"), Some("tail"));
	}

	#[rstest]
	fn test_unclosed_tag_is_skipped() {
		let doc = HydrationDocument::from_html(r#"<script id="broken"#);
		assert!(doc.is_empty());
	}

	#[rstest]
	fn test_non_ascii_content_is_preserved() {
		let html = "<script id=\"jp\">\"こんにちは\"</script>";
		let doc = HydrationDocument::from_html(html);
		assert_eq!(doc.get("jp"), Some("\"こんにちは\""));
	}

	#[rstest]
	fn test_insert_and_remove() {
		let mut doc = HydrationDocument::new();
		doc.insert("k", "not json");
		assert_eq!(doc.text_content_by_id("k").as_deref(), Some("not json"));
		assert_eq!(doc.remove("k"), Some("not json".to_string()));
		assert!(doc.text_content_by_id("k").is_none());
	}

	#[rstest]
	fn test_hash_map_lookup() {
		let mut map = HashMap::new();
		map.insert("id".to_string(), "42".to_string());
		assert_eq!(map.text_content_by_id("id").as_deref(), Some("42"));
		assert!(map.text_content_by_id("other").is_none());
	}
}
