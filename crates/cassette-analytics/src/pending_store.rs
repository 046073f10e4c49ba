// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persistence for pending playlist actions.
//!
//! Wraps a single durable-store slot holding at most one serialized
//! [`PendingAction`]. Reads apply the TTL and clear anything stale or
//! unparsable, so a successful [`get`](PendingActionStore::get) always
//! yields an action that is still worth resuming.

use cassette_analytics_core::PendingAction;
use chrono::Utc;
use tracing::{debug, warn};

use crate::store::SharedStore;

/// Storage key under which the pending action is kept.
pub const PENDING_ACTION_KEY: &str = "cassette_pending_action";

/// Saves and restores the single pending action slot.
pub struct PendingActionStore {
	store: Option<SharedStore>,
}

impl PendingActionStore {
	/// Creates a store over the given durable backend.
	pub fn new(store: SharedStore) -> Self {
		Self { store: Some(store) }
	}

	/// Creates a store with no backend; every operation is a no-op.
	pub fn disabled() -> Self {
		Self { store: None }
	}

	/// Whether this store has a backend.
	pub fn is_enabled(&self) -> bool {
		self.store.is_some()
	}

	/// Persists `action`, replacing any previously saved one.
	///
	/// Storage failures are logged and swallowed; a failed save means
	/// the user re-initiates the action after authenticating, which is
	/// not worth failing the redirect over.
	pub async fn save(&self, action: &PendingAction) {
		let Some(store) = &self.store else { return };

		let raw = match serde_json::to_string(action) {
			Ok(raw) => raw,
			Err(e) => {
				warn!(error = %e, "failed to serialize pending action");
				return;
			}
		};

		if let Err(e) = store.set(PENDING_ACTION_KEY, &raw).await {
			warn!(error = %e, "failed to save pending action");
		}
	}

	/// Returns the saved action if one exists and is still fresh.
	///
	/// Expired or corrupt entries are cleared as a side effect and
	/// reported as absent. The slot is left intact on a fresh hit; call
	/// [`clear`](Self::clear) once the action has been resumed.
	pub async fn get(&self) -> Option<PendingAction> {
		let store = self.store.as_ref()?;

		let raw = match store.get(PENDING_ACTION_KEY).await {
			Ok(Some(raw)) => raw,
			Ok(None) => return None,
			Err(e) => {
				warn!(error = %e, "failed to read pending action");
				return None;
			}
		};

		let action: PendingAction = match serde_json::from_str(&raw) {
			Ok(action) => action,
			Err(e) => {
				warn!(error = %e, "clearing unparsable pending action");
				self.clear().await;
				return None;
			}
		};

		if action.is_expired(Utc::now()) {
			debug!("clearing expired pending action");
			self.clear().await;
			return None;
		}

		Some(action)
	}

	/// Removes the saved action, if any.
	pub async fn clear(&self) {
		let Some(store) = &self.store else { return };

		if let Err(e) = store.remove(PENDING_ACTION_KEY).await {
			warn!(error = %e, "failed to clear pending action");
		}
	}
}
