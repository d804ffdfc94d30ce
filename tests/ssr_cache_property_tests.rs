//! Property-based tests for the SSR cache handoff
//!
//! Uses proptest to verify that any JSON value embedded on the server is
//! restored unchanged on the client.

#[cfg(not(target_arch = "wasm32"))]
mod property_tests {
	use proptest::prelude::*;
	use proptest::proptest;
	use reinhardt_ssr_cache::{
		HydrationDocument, RenderEnvironment, SsrCache, read_ssr_cache,
	};
	use serde_json::Value;

	fn json_value() -> impl Strategy<Value = Value> {
		let leaf = prop_oneof![
			Just(Value::Null),
			any::<bool>().prop_map(Value::Bool),
			any::<i64>().prop_map(Value::from),
			any::<u64>().prop_map(Value::from),
			any::<f64>()
				.prop_filter("JSON has no non-finite numbers", |f| f.is_finite())
				.prop_map(Value::from),
			".*".prop_map(Value::String),
		];
		leaf.prop_recursive(4, 64, 8, |inner| {
			prop_oneof![
				prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
				prop::collection::hash_map(".*", inner, 0..8)
					.prop_map(|map| Value::Object(map.into_iter().collect())),
			]
		})
	}

	proptest! {
		/// Property: server embed followed by client read restores the value
		#[test]
		fn prop_round_trip(
			value in json_value(),
			name in r"[a-zA-Z][a-zA-Z0-9_\-]{0,30}"
		) {
			let html = SsrCache::new(name.clone(), &value)
				.render(RenderEnvironment::Server)
				.unwrap()
				.unwrap()
				.to_html();

			let doc = HydrationDocument::from_html(&html);
			let restored: Option<Value> =
				read_ssr_cache(&doc, RenderEnvironment::Client, &name, true);

			prop_assert_eq!(restored, Some(value));
		}

		/// Property: the payload never closes its own script element
		#[test]
		fn prop_single_closing_tag(text in ".*") {
			let html = SsrCache::new("text", &text)
				.render(RenderEnvironment::Server)
				.unwrap()
				.unwrap()
				.to_html();

			prop_assert_eq!(html.to_ascii_lowercase().matches("</script").count(), 1);
		}

		/// Property: client-side embedding never contains the payload
		#[test]
		fn prop_client_embed_is_placeholder(value in json_value()) {
			let script = SsrCache::new("data", &value)
				.render(RenderEnvironment::Client)
				.unwrap()
				.unwrap();

			prop_assert_eq!(script.content(), "{}");
		}

		/// Property: any identifier, including ones needing attribute
		/// escaping, is found again after a render
		#[test]
		fn prop_identifier_survives_escaping(name in r#"[^\x00]{1,40}"#) {
			let html = SsrCache::new(name.clone(), &1)
				.render(RenderEnvironment::Server)
				.unwrap()
				.unwrap()
				.to_html();

			let doc = HydrationDocument::from_html(&html);
			prop_assert_eq!(doc.get(&name), Some("1"));
		}
	}
}
