// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Anonymous identity management.
//!
//! The anonymous id is written to two independent stores so that losing
//! one of them does not reset the identity. Reads prefer the primary
//! store and reconcile whichever copy is missing; the id is only
//! generated on first use, never eagerly.

use cassette_analytics_core::AnonymousId;
use tracing::{debug, warn};

use crate::store::SharedStore;

/// Storage key under which the anonymous id is kept in both stores.
pub const ANONYMOUS_ID_KEY: &str = "cassette_anon_id";

struct StorePair {
	primary: SharedStore,
	secondary: SharedStore,
}

/// Lazily creates and repairs the caller's anonymous id.
pub struct IdentityManager {
	stores: Option<StorePair>,
}

impl IdentityManager {
	/// Creates a manager over a redundant pair of stores.
	///
	/// `primary` is consulted first on reads; both receive every write.
	pub fn new(primary: SharedStore, secondary: SharedStore) -> Self {
		Self {
			stores: Some(StorePair { primary, secondary }),
		}
	}

	/// Creates a manager with no storage at all.
	///
	/// Every call to [`get_or_create`](Self::get_or_create) returns
	/// `None`. Used when the host application has nowhere to persist
	/// identity.
	pub fn disabled() -> Self {
		Self { stores: None }
	}

	/// Whether this manager has storage backing it.
	pub fn is_enabled(&self) -> bool {
		self.stores.is_some()
	}

	/// Returns the anonymous id, creating and persisting one if needed.
	///
	/// Whichever store is missing the id gets a fresh copy, so a
	/// cleared store heals on the next call. Storage failures are
	/// logged and treated as misses; this never fails and never blocks
	/// the caller's event.
	pub async fn get_or_create(&self) -> Option<AnonymousId> {
		let stores = self.stores.as_ref()?;

		if let Some(id) = read_id(&stores.primary, "primary").await {
			write_id(&stores.secondary, "secondary", &id).await;
			return Some(id);
		}

		if let Some(id) = read_id(&stores.secondary, "secondary").await {
			debug!("anonymous id missing from primary store, restoring");
			write_id(&stores.primary, "primary", &id).await;
			return Some(id);
		}

		let id = AnonymousId::generate();
		debug!(%id, "generated new anonymous id");
		write_id(&stores.primary, "primary", &id).await;
		write_id(&stores.secondary, "secondary", &id).await;
		Some(id)
	}
}

async fn read_id(store: &SharedStore, label: &str) -> Option<AnonymousId> {
	match store.get(ANONYMOUS_ID_KEY).await {
		Ok(Some(raw)) => match AnonymousId::parse(&raw) {
			Ok(id) => Some(id),
			Err(e) => {
				warn!(store = label, error = %e, "ignoring stored anonymous id");
				None
			}
		},
		Ok(None) => None,
		Err(e) => {
			warn!(store = label, error = %e, "failed to read anonymous id");
			None
		}
	}
}

async fn write_id(store: &SharedStore, label: &str, id: &AnonymousId) {
	if let Err(e) = store.set(ANONYMOUS_ID_KEY, id.as_str()).await {
		warn!(store = label, error = %e, "failed to persist anonymous id");
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use async_trait::async_trait;

	use super::*;
	use crate::error::StoreError;
	use crate::store::{KeyValueStore, MemoryStore};

	fn pair() -> (SharedStore, SharedStore) {
		(
			Arc::new(MemoryStore::new()) as SharedStore,
			Arc::new(MemoryStore::new()) as SharedStore,
		)
	}

	#[tokio::test]
	async fn id_is_stable_across_calls() {
		let (primary, secondary) = pair();
		let manager = IdentityManager::new(primary, secondary);

		let first = manager.get_or_create().await.unwrap();
		let second = manager.get_or_create().await.unwrap();
		assert_eq!(first, second);
	}

	#[tokio::test]
	async fn first_call_writes_both_stores() {
		let (primary, secondary) = pair();
		let manager = IdentityManager::new(Arc::clone(&primary), Arc::clone(&secondary));

		let id = manager.get_or_create().await.unwrap();

		assert_eq!(
			primary.get(ANONYMOUS_ID_KEY).await.unwrap().as_deref(),
			Some(id.as_str())
		);
		assert_eq!(
			secondary.get(ANONYMOUS_ID_KEY).await.unwrap().as_deref(),
			Some(id.as_str())
		);
	}

	#[tokio::test]
	async fn cleared_secondary_is_repaired() {
		let (primary, secondary) = pair();
		let manager = IdentityManager::new(Arc::clone(&primary), Arc::clone(&secondary));

		let id = manager.get_or_create().await.unwrap();
		secondary.remove(ANONYMOUS_ID_KEY).await.unwrap();

		let restored = manager.get_or_create().await.unwrap();
		assert_eq!(restored, id);
		assert_eq!(
			secondary.get(ANONYMOUS_ID_KEY).await.unwrap().as_deref(),
			Some(id.as_str())
		);
	}

	#[tokio::test]
	async fn cleared_primary_is_backfilled_from_secondary() {
		let (primary, secondary) = pair();
		let manager = IdentityManager::new(Arc::clone(&primary), Arc::clone(&secondary));

		let id = manager.get_or_create().await.unwrap();
		primary.remove(ANONYMOUS_ID_KEY).await.unwrap();

		let restored = manager.get_or_create().await.unwrap();
		assert_eq!(restored, id);
		assert_eq!(
			primary.get(ANONYMOUS_ID_KEY).await.unwrap().as_deref(),
			Some(id.as_str())
		);
	}

	#[tokio::test]
	async fn preexisting_id_is_accepted_verbatim() {
		let (primary, secondary) = pair();
		primary
			.set(ANONYMOUS_ID_KEY, "1724600000000-k3j9x7q2m")
			.await
			.unwrap();

		let manager = IdentityManager::new(Arc::clone(&primary), secondary);
		let id = manager.get_or_create().await.unwrap();
		assert_eq!(id.as_str(), "1724600000000-k3j9x7q2m");
	}

	#[tokio::test]
	async fn blank_stored_id_is_replaced() {
		let (primary, secondary) = pair();
		primary.set(ANONYMOUS_ID_KEY, "   ").await.unwrap();

		let manager = IdentityManager::new(Arc::clone(&primary), secondary);
		let id = manager.get_or_create().await.unwrap();
		assert_ne!(id.as_str().trim(), "");
	}

	#[tokio::test]
	async fn disabled_manager_returns_none() {
		let manager = IdentityManager::disabled();
		assert!(!manager.is_enabled());
		assert_eq!(manager.get_or_create().await, None);
	}

	struct FailingStore;

	#[async_trait]
	impl KeyValueStore for FailingStore {
		async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
			Err(std::io::Error::new(std::io::ErrorKind::Other, "offline").into())
		}

		async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
			Err(std::io::Error::new(std::io::ErrorKind::Other, "offline").into())
		}

		async fn remove(&self, _key: &str) -> Result<(), StoreError> {
			Err(std::io::Error::new(std::io::ErrorKind::Other, "offline").into())
		}
	}

	#[tokio::test]
	async fn storage_failures_still_produce_an_id() {
		let manager = IdentityManager::new(
			Arc::new(FailingStore) as SharedStore,
			Arc::new(FailingStore) as SharedStore,
		);

		// Nothing persists, but the caller still gets an id.
		let id = manager.get_or_create().await;
		assert!(id.is_some());
	}
}
