// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stable per-installation anonymous identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// An opaque identifier correlating analytics events before or without
/// authentication.
///
/// Freshly generated ids are UUIDv4 strings, but ids loaded from storage
/// are accepted as-is: consumers rely only on uniqueness and stability,
/// never on format, so legacy timestamp-composite ids keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnonymousId(String);

impl AnonymousId {
	/// Generates a fresh random id.
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	/// Accepts a stored id verbatim.
	///
	/// The only rejected input is an empty or all-whitespace string, which
	/// could never identify anything.
	pub fn parse(value: impl Into<String>) -> Result<Self, CoreError> {
		let value = value.into();
		if value.trim().is_empty() {
			return Err(CoreError::EmptyAnonymousId);
		}
		Ok(Self(value))
	}

	/// Returns the id as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for AnonymousId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for AnonymousId {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
