//! Escaping helpers for embedding JSON inside HTML.

/// Escapes a string for use in an HTML attribute value.
pub(crate) fn html_escape_attr(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('"', "&quot;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

/// Decodes the character references `html_escape_attr` and common
/// authoring tools produce in attribute values.
///
/// Unknown references are kept verbatim.
pub(crate) fn html_unescape_attr(s: &str) -> String {
	if !s.contains('&') {
		return s.to_string();
	}

	let mut out = String::with_capacity(s.len());
	let mut rest = s;
	while let Some(amp) = rest.find('&') {
		out.push_str(&rest[..amp]);
		rest = &rest[amp..];

		let decoded = rest
			.find(';')
			.filter(|&end| end <= 10)
			.and_then(|end| decode_reference(&rest[1..end]).map(|c| (c, end)));

		match decoded {
			Some((c, end)) => {
				out.push(c);
				rest = &rest[end + 1..];
			}
			None => {
				out.push('&');
				rest = &rest[1..];
			}
		}
	}
	out.push_str(rest);
	out
}

fn decode_reference(name: &str) -> Option<char> {
	match name {
		"amp" => Some('&'),
		"lt" => Some('<'),
		"gt" => Some('>'),
		"quot" => Some('"'),
		"apos" => Some('\''),
		_ => {
			let digits = name.strip_prefix('#')?;
			let code = match digits.strip_prefix(['x', 'X']) {
				Some(hex) => u32::from_str_radix(hex, 16).ok()?,
				None => digits.parse().ok()?,
			};
			char::from_u32(code)
		}
	}
}

/// Makes serialized JSON safe to place inside a `<script>` element.
///
/// `<`, `>` and `&` become `\u003c`, `\u003e` and `\u0026`, so the payload
/// can never close the element or open a comment. U+2028 and U+2029 are
/// escaped as well. Every replacement happens inside JSON strings (these
/// characters are not valid elsewhere in JSON), so the output parses to the
/// same value.
pub(crate) fn escape_json_for_script(json: &str) -> String {
	let mut out = String::with_capacity(json.len());
	for c in json.chars() {
		match c {
			'<' => out.push_str("\\u003c"),
			'>' => out.push_str("\\u003e"),
			'&' => out.push_str("\\u0026"),
			'\u{2028}' => out.push_str("\\u2028"),
			'\u{2029}' => out.push_str("\\u2029"),
			_ => out.push(c),
		}
	}
	out
}
