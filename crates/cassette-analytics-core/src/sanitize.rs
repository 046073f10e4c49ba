// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound analytics property sanitization.
//!
//! Every property set leaves the SDK through [`sanitize`]. The policy is
//! allow-list first: keys absent from [`ALLOWED_FIELDS`] are dropped
//! silently, a handful of fields are rewritten on the way through, and the
//! free-text fields in [`FORBIDDEN_FIELDS`] are never forwarded at all:
//! user-authored text does not belong in analytics.

use serde_json::Value;
use url::Url;

use crate::platform::MusicPlatform;
use crate::props::EventProps;

/// Rewrite applied to an allow-listed field before it is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldTransform {
	/// Pass the value through unchanged.
	Keep,
	/// Keep only the path of a route, dropping query string and fragment.
	StripQuery,
	/// Fold known platform aliases to their canonical short name.
	PlatformAlias,
	/// Reduce a full URL to its hostname.
	HostOnly,
}

/// Fields that may appear in outbound analytics properties, with the
/// transform each undergoes. Absence from this table means "drop".
const ALLOWED_FIELDS: &[(&str, FieldTransform)] = &[
	("route", FieldTransform::StripQuery),
	("source_platform", FieldTransform::PlatformAlias),
	("target_platform", FieldTransform::PlatformAlias),
	("source_context", FieldTransform::Keep),
	("element_type", FieldTransform::Keep),
	("post_id", FieldTransform::Keep),
	("source_domain", FieldTransform::HostOnly),
	("user_id", FieldTransform::Keep),
	("internal_actor", FieldTransform::Keep),
];

/// User-authored free-text fields, excluded before the allow-list is even
/// consulted.
const FORBIDDEN_FIELDS: &[&str] = &["description", "query_text", "search_query"];

/// Returns true if `name` is on the outbound allow-list.
pub fn is_allowed_field(name: &str) -> bool {
	transform_for(name).is_some()
}

/// Returns true if `name` is a forbidden free-text field.
pub fn is_forbidden_field(name: &str) -> bool {
	FORBIDDEN_FIELDS.contains(&name)
}

fn transform_for(name: &str) -> Option<FieldTransform> {
	ALLOWED_FIELDS
		.iter()
		.find(|(field, _)| *field == name)
		.map(|(_, transform)| *transform)
}

/// Filters and rewrites event properties for transmission.
///
/// Pure function of its input: no I/O, no side effects. Missing fields are
/// simply absent from the output (no null placeholders), unknown keys are
/// dropped without error, and sanitizing already-sanitized output yields
/// the same properties.
pub fn sanitize(props: &EventProps) -> EventProps {
	let mut out = EventProps::new();
	for (key, value) in props.iter() {
		if is_forbidden_field(key) {
			continue;
		}
		let Some(transform) = transform_for(key) else {
			continue;
		};
		if let Some(kept) = apply(transform, value) {
			out = out.insert(key.clone(), kept);
		}
	}
	out
}

/// Applies a transform to one value.
///
/// Transforms rewrite string values; booleans and numbers under
/// allow-listed keys pass through untouched since they cannot carry
/// embedded query secrets.
fn apply(transform: FieldTransform, value: &Value) -> Option<Value> {
	match (transform, value) {
		(FieldTransform::StripQuery, Value::String(s)) => {
			Some(Value::String(strip_query(s)))
		}
		(FieldTransform::PlatformAlias, Value::String(s)) => {
			Some(Value::String(normalize_platform(s)))
		}
		(FieldTransform::HostOnly, Value::String(s)) => hostname_only(s).map(Value::String),
		(_, other) => Some(other.clone()),
	}
}

/// Keeps only the path of a route: everything from the first `?` or `#`
/// onward is dropped.
fn strip_query(route: &str) -> String {
	let no_query = route.split_once('?').map_or(route, |(path, _)| path);
	let no_fragment = no_query.split_once('#').map_or(no_query, |(path, _)| path);
	no_fragment.to_string()
}

/// Folds known platform aliases to the canonical short name; unrecognized
/// values pass through unchanged.
fn normalize_platform(value: &str) -> String {
	match MusicPlatform::from_alias(value) {
		Some(platform) => platform.analytics_name().to_string(),
		None => value.to_string(),
	}
}

/// Reduces a URL-shaped value to its hostname, stripping scheme, userinfo,
/// port, path, query, and fragment. Bare hostnames survive unchanged;
/// values with no derivable hostname are dropped.
fn hostname_only(value: &str) -> Option<String> {
	let direct = Url::parse(value)
		.ok()
		.and_then(|url| url.host_str().map(str::to_string));

	// A bare hostname ("open.spotify.com") parses as a relative URL; retry
	// with a scheme so already-sanitized values survive a second pass.
	direct.or_else(|| {
		Url::parse(&format!("https://{value}"))
			.ok()
			.and_then(|url| url.host_str().map(str::to_string))
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sanitized(props: EventProps) -> EventProps {
		sanitize(&props)
	}

	#[test]
	fn unknown_keys_are_dropped() {
		let out = sanitized(
			EventProps::new()
				.insert("made_up", "z")
				.insert("another_unknown", 7),
		);
		assert!(out.is_empty());
	}

	#[test]
	fn route_query_string_is_stripped() {
		let out = sanitized(EventProps::new().insert("route", "/post/123?token=abc"));
		assert_eq!(out.get("route").unwrap(), "/post/123");
	}

	#[test]
	fn route_fragment_is_stripped() {
		let out = sanitized(EventProps::new().insert("route", "/post/123#comments"));
		assert_eq!(out.get("route").unwrap(), "/post/123");
	}

	#[test]
	fn route_without_query_is_unchanged() {
		let out = sanitized(EventProps::new().insert("route", "/profile/tom"));
		assert_eq!(out.get("route").unwrap(), "/profile/tom");
	}

	#[test]
	fn platform_aliases_normalize_to_short_names() {
		let out = sanitized(
			EventProps::new()
				.insert("source_platform", "appleMusic")
				.insert("target_platform", "Spotify"),
		);
		assert_eq!(out.get("source_platform").unwrap(), "apple");
		assert_eq!(out.get("target_platform").unwrap(), "spotify");
	}

	#[test]
	fn unknown_platform_value_passes_through() {
		let out = sanitized(EventProps::new().insert("source_platform", "tidal"));
		assert_eq!(out.get("source_platform").unwrap(), "tidal");
	}

	#[test]
	fn source_domain_reduces_to_hostname() {
		let out = sanitized(EventProps::new().insert(
			"source_domain",
			"https://open.spotify.com/track/abc?si=secret-share-token",
		));
		assert_eq!(out.get("source_domain").unwrap(), "open.spotify.com");
	}

	#[test]
	fn source_domain_bare_hostname_survives() {
		let out = sanitized(EventProps::new().insert("source_domain", "music.apple.com"));
		assert_eq!(out.get("source_domain").unwrap(), "music.apple.com");
	}

	#[test]
	fn source_domain_without_hostname_is_dropped() {
		let out = sanitized(EventProps::new().insert("source_domain", "not a url at all"));
		assert!(out.get("source_domain").is_none());
	}

	#[test]
	fn forbidden_free_text_is_always_excluded() {
		let out = sanitized(
			EventProps::new()
				.insert("description", "my cool playlist")
				.insert("query_text", "songs about rain")
				.insert("search_query", "deep cuts")
				.insert("post_id", "p1"),
		);
		assert!(out.get("description").is_none());
		assert!(out.get("query_text").is_none());
		assert!(out.get("search_query").is_none());
		assert_eq!(out.get("post_id").unwrap(), "p1");
	}

	#[test]
	fn booleans_and_identifiers_pass_through() {
		let out = sanitized(
			EventProps::new()
				.insert("internal_actor", true)
				.insert("user_id", "u42")
				.insert("element_type", "play_button")
				.insert("source_context", "feed"),
		);
		assert_eq!(out.get("internal_actor").unwrap(), &true);
		assert_eq!(out.get("user_id").unwrap(), "u42");
		assert_eq!(out.get("element_type").unwrap(), "play_button");
		assert_eq!(out.get("source_context").unwrap(), "feed");
	}

	#[test]
	fn missing_fields_stay_missing() {
		let out = sanitized(EventProps::new().insert("post_id", "p9"));
		assert_eq!(out.len(), 1);
		assert!(out.get("route").is_none());
	}

	#[test]
	fn full_event_sanitizes_end_to_end() {
		let out = sanitized(
			EventProps::new()
				.insert("route", "/post/123?token=abc")
				.insert("source_platform", "appleMusic")
				.insert("source_domain", "https://open.spotify.com/track/abc?si=secret")
				.insert("description", "x")
				.insert("query_text", "y")
				.insert("made_up", "z")
				.insert("post_id", "123")
				.insert("internal_actor", false),
		);

		assert_eq!(out.get("route").unwrap(), "/post/123");
		assert_eq!(out.get("source_platform").unwrap(), "apple");
		assert_eq!(out.get("source_domain").unwrap(), "open.spotify.com");
		assert_eq!(out.get("post_id").unwrap(), "123");
		assert_eq!(out.get("internal_actor").unwrap(), &false);
		assert!(out.get("description").is_none());
		assert!(out.get("query_text").is_none());
		assert!(out.get("made_up").is_none());
	}

	#[test]
	fn field_predicates_agree_with_tables() {
		assert!(is_allowed_field("route"));
		assert!(is_allowed_field("source_domain"));
		assert!(!is_allowed_field("description"));
		assert!(!is_allowed_field("made_up"));

		assert!(is_forbidden_field("query_text"));
		assert!(!is_forbidden_field("post_id"));
	}
}

#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	fn arbitrary_props() -> impl Strategy<Value = EventProps> {
		proptest::collection::vec(
			(
				prop_oneof![
					Just("route".to_string()),
					Just("source_platform".to_string()),
					Just("source_domain".to_string()),
					Just("post_id".to_string()),
					Just("description".to_string()),
					Just("query_text".to_string()),
					"[a-z_]{1,12}",
				],
				prop_oneof![
					"[ -~]{0,40}".prop_map(serde_json::Value::from),
					any::<bool>().prop_map(serde_json::Value::from),
					any::<i32>().prop_map(serde_json::Value::from),
				],
			),
			0..12,
		)
		.prop_map(|pairs| {
			let mut props = EventProps::new();
			for (key, value) in pairs {
				props = props.insert(key, value);
			}
			props
		})
	}

	proptest! {
		#[test]
		fn output_keys_are_always_allow_listed(props in arbitrary_props()) {
			let out = sanitize(&props);
			for (key, _) in out.iter() {
				prop_assert!(is_allowed_field(key), "unexpected key {key}");
				prop_assert!(!is_forbidden_field(key), "forbidden key {key}");
			}
		}

		#[test]
		fn sanitization_is_idempotent(props in arbitrary_props()) {
			let once = sanitize(&props);
			let twice = sanitize(&once);
			prop_assert_eq!(once, twice);
		}

		#[test]
		fn routes_never_keep_queries(query in "[a-zA-Z0-9=&]{0,24}") {
			let props = EventProps::new().insert("route", format!("/post/1?{query}"));
			let out = sanitize(&props);
			let route = out.get("route").unwrap().as_str().unwrap();
			prop_assert!(!route.contains('?'));
		}

		#[test]
		fn source_domains_never_keep_queries(token in "[0-9]{8,24}") {
			let props = EventProps::new().insert(
				"source_domain",
				format!("https://open.spotify.com/track/x?si={token}"),
			);
			let out = sanitize(&props);
			let domain = out.get("source_domain").unwrap().as_str().unwrap();
			prop_assert!(!domain.contains('?'));
			prop_assert!(!domain.contains(&token));
		}
	}
}
