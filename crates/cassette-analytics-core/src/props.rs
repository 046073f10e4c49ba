// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Builder for outbound analytics event properties.

use serde_json::{Map, Value};

/// Metadata attached to a single analytics event.
///
/// Built fresh per event and handed to [`crate::sanitize`] before any
/// transmission.
///
/// # Example
///
/// ```
/// use cassette_analytics_core::EventProps;
///
/// let props = EventProps::new()
///     .insert("route", "/post/123")
///     .insert("source_platform", "spotify")
///     .insert("internal_actor", false);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventProps {
	inner: Map<String, Value>,
}

impl EventProps {
	/// Creates an empty property set.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair, replacing any previous value for the key.
	///
	/// The value can be any type that implements `Into<serde_json::Value>`:
	/// strings, numbers, and booleans are the usual shapes here.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Merges another property set into this one.
	///
	/// If both contain the same key, the value from `other` wins.
	pub fn merge(mut self, other: EventProps) -> Self {
		for (k, v) in other.inner {
			self.inner.insert(k, v);
		}
		self
	}

	/// Returns true if no properties are set.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the number of properties.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Gets a value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Iterates over the key-value pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.inner.iter()
	}

	/// Converts the properties into a `serde_json::Value` object.
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<EventProps> for Value {
	fn from(props: EventProps) -> Self {
		props.into_value()
	}
}

impl From<Value> for EventProps {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for EventProps {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}
