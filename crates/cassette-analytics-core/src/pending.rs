// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pending playlist actions saved across authentication redirects.
//!
//! When a user tries to create a playlist but still has to authenticate
//! with the target platform, the intent is serialized before the redirect
//! and restored after the round-trip. Saved actions go stale: anything
//! older than [`PENDING_ACTION_TTL_MS`] is treated as absent. Expiry is
//! evaluated lazily at read time; there is no background sweep.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::MusicPlatform;

/// Maximum age of a saved action, in milliseconds (10 minutes).
pub const PENDING_ACTION_TTL_MS: i64 = 10 * 60 * 1000;

/// A user intent interrupted by a required authentication step.
///
/// Wire shape (JSON): `{"type":"create_playlist","platform":"appleMusic",
/// "playlistId":"...","returnUrl":"...","timestamp":1724600000000}` with
/// the timestamp in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PendingAction {
	/// Create `playlist_id` on `platform`, then resume at `return_url`.
	#[serde(rename_all = "camelCase")]
	CreatePlaylist {
		platform: MusicPlatform,
		playlist_id: String,
		return_url: String,
		#[serde(with = "chrono::serde::ts_milliseconds")]
		timestamp: DateTime<Utc>,
	},
}

impl PendingAction {
	/// Creates a playlist-creation intent stamped with the current time.
	///
	/// The stamp is truncated to millisecond precision so that an action
	/// read back from storage compares equal to the one that was saved.
	pub fn create_playlist(
		platform: MusicPlatform,
		playlist_id: impl Into<String>,
		return_url: impl Into<String>,
	) -> Self {
		PendingAction::CreatePlaylist {
			platform,
			playlist_id: playlist_id.into(),
			return_url: return_url.into(),
			timestamp: Utc::now().trunc_subsecs(3),
		}
	}

	/// Returns when this action was created.
	pub fn timestamp(&self) -> DateTime<Utc> {
		match self {
			PendingAction::CreatePlaylist { timestamp, .. } => *timestamp,
		}
	}

	/// Returns true if the action is older than [`PENDING_ACTION_TTL_MS`]
	/// as of `now`.
	pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
		now.signed_duration_since(self.timestamp()).num_milliseconds() > PENDING_ACTION_TTL_MS
	}
}
