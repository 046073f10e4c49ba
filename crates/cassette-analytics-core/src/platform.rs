// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Music streaming platform identifiers.
//!
//! Platforms appear under two names. Persisted state (the pending-action
//! slot) uses the wire names `"spotify"`, `"appleMusic"`, `"deezer"`;
//! analytics properties use the canonical short names `"spotify"`,
//! `"apple"`, `"deezer"`. [`MusicPlatform::from_alias`] folds either form,
//! plus common spelling variants, back to the enum.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A music streaming platform Cassette can convert links between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MusicPlatform {
	Spotify,
	AppleMusic,
	Deezer,
}

impl MusicPlatform {
	/// All supported platforms.
	pub const ALL: [MusicPlatform; 3] = [
		MusicPlatform::Spotify,
		MusicPlatform::AppleMusic,
		MusicPlatform::Deezer,
	];

	/// Returns the wire name used in persisted state ("appleMusic" style).
	pub fn as_str(&self) -> &'static str {
		match self {
			MusicPlatform::Spotify => "spotify",
			MusicPlatform::AppleMusic => "appleMusic",
			MusicPlatform::Deezer => "deezer",
		}
	}

	/// Returns the canonical short name used in analytics properties.
	///
	/// Alias forms like "appleMusic" always reduce to the short form.
	pub fn analytics_name(&self) -> &'static str {
		match self {
			MusicPlatform::Spotify => "spotify",
			MusicPlatform::AppleMusic => "apple",
			MusicPlatform::Deezer => "deezer",
		}
	}

	/// Recognizes a platform from any known alias.
	///
	/// Matching ignores case and separator characters, so "appleMusic",
	/// "apple_music", "Apple Music", and "apple" all resolve to
	/// [`MusicPlatform::AppleMusic`]. Returns `None` for anything else;
	/// unknown values are not an error.
	pub fn from_alias(value: &str) -> Option<Self> {
		let folded: String = value
			.chars()
			.filter(|c| c.is_ascii_alphanumeric())
			.collect::<String>()
			.to_ascii_lowercase();

		match folded.as_str() {
			"spotify" => Some(MusicPlatform::Spotify),
			"apple" | "applemusic" => Some(MusicPlatform::AppleMusic),
			"deezer" => Some(MusicPlatform::Deezer),
			_ => None,
		}
	}
}

impl std::fmt::Display for MusicPlatform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for MusicPlatform {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_alias(s).ok_or_else(|| CoreError::UnknownPlatform(s.to_string()))
	}
}
