// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Key-value storage backends for client state.
//!
//! The SDK never touches storage directly; everything goes through
//! [`KeyValueStore`] so the embedding application decides where state
//! lives. [`FileStore`] is the durable backend (the browser's
//! localStorage analogue), [`MemoryStore`] the per-run backend (the
//! per-tab sessionStorage analogue) and the default test double.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::StoreError;

/// A string-keyed, string-valued storage backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
	/// Reads the value stored under `key`, if any.
	async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

	/// Writes `value` under `key`, replacing any previous value.
	async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

	/// Removes the value stored under `key`, if any.
	async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Shared handle to a storage backend.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// In-memory store holding state for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
	/// Creates an empty in-memory store.
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl KeyValueStore for MemoryStore {
	async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.entries.lock().await.get(key).cloned())
	}

	async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
		self
			.entries
			.lock()
			.await
			.insert(key.to_string(), value.to_string());
		Ok(())
	}

	async fn remove(&self, key: &str) -> Result<(), StoreError> {
		self.entries.lock().await.remove(key);
		Ok(())
	}
}

/// Durable store backed by a single JSON-object file.
///
/// Every operation reads and rewrites the whole file; the maps involved
/// are a handful of short strings. Parent directories are created on
/// first write. An unparsable file is treated as empty and heals on the
/// next write.
#[derive(Debug, Clone)]
pub struct FileStore {
	path: PathBuf,
}

impl FileStore {
	/// Creates a store backed by the file at `path`.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Returns the path of the backing file.
	pub fn path(&self) -> &std::path::Path {
		&self.path
	}

	async fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
		let bytes = match tokio::fs::read(&self.path).await {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
			Err(e) => return Err(e.into()),
		};

		match serde_json::from_slice(&bytes) {
			Ok(map) => Ok(map),
			Err(e) => {
				warn!(path = %self.path.display(), error = %e, "unparsable state file, treating as empty");
				Ok(HashMap::new())
			}
		}
	}

	async fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
		if let Some(parent) = self.path.parent() {
			tokio::fs::create_dir_all(parent).await?;
		}
		let bytes = serde_json::to_vec_pretty(map)?;
		tokio::fs::write(&self.path, bytes).await?;
		Ok(())
	}
}

#[async_trait]
impl KeyValueStore for FileStore {
	async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.read_map().await?.get(key).cloned())
	}

	async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
		let mut map = self.read_map().await?;
		map.insert(key.to_string(), value.to_string());
		self.write_map(&map).await
	}

	async fn remove(&self, key: &str) -> Result<(), StoreError> {
		let mut map = self.read_map().await?;
		if map.remove(key).is_some() {
			self.write_map(&map).await?;
		}
		Ok(())
	}
}
