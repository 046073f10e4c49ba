// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK for Cassette product analytics.
//!
//! This crate records page-view and link-click events against a Cassette
//! backend, manages the caller's anonymous identity across two redundant
//! stores, and persists interrupted playlist actions across
//! authentication redirects.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use cassette_analytics::{AnalyticsClient, EventProps, FileStore, SharedStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let durable: SharedStore = Arc::new(FileStore::new("/var/lib/cassette/state.json"));
//!
//!     let client = AnalyticsClient::builder()
//!         .base_url("https://cassette.example.com")
//!         .durable_store(durable)
//!         .build()?;
//!
//!     // Record a post view. Properties are sanitized before send:
//!     // the route loses its query string, unknown keys are dropped.
//!     let response = client
//!         .record_post_view("post_123", EventProps::new()
//!             .insert("route", "/post/123?utm_source=share")
//!             .insert("source_platform", "appleMusic"))
//!         .await?;
//!
//!     println!("recorded: {}", response.recorded);
//!     Ok(())
//! }
//! ```
//!
//! # Identity
//!
//! The anonymous id is created lazily on the first request and written
//! to both a durable store and a secondary store. Clearing either one
//! leaves the identity intact; the missing copy is restored on the next
//! read. Web embedders can mirror the id into a cookie with the helpers
//! in [`cookie`].
//!
//! # Pending actions
//!
//! [`PendingActionStore`] saves a playlist-creation intent before an
//! authentication redirect and restores it afterwards. Entries expire
//! after ten minutes and are cleared lazily on read.
//!
//! # Error handling
//!
//! Analytics is best-effort. The only errors surfaced to callers are an
//! invalid base URL at construction and transport or non-success HTTP
//! failures per request; storage trouble is logged and swallowed. A
//! failed request is final; see [`AnalyticsError`].

pub mod client;
pub mod cookie;
pub mod error;
pub mod identity;
pub mod pending_store;
pub mod secret;
pub mod store;

pub use client::{
	endpoint_url, AnalyticsClient, AnalyticsClientBuilder, ProfileAnalyticsSummary,
	RecordResponse, ANALYTICS_PREFIX, SESSION_TOKEN_KEY,
};
pub use cookie::{
	anonymous_id_from_cookie_header, anonymous_id_set_cookie, ANONYMOUS_ID_COOKIE,
	ANONYMOUS_ID_COOKIE_MAX_AGE_SECS,
};
pub use error::{AnalyticsError, Result, StoreError};
pub use identity::{IdentityManager, ANONYMOUS_ID_KEY};
pub use pending_store::{PendingActionStore, PENDING_ACTION_KEY};
pub use secret::SecretString;
pub use store::{FileStore, KeyValueStore, MemoryStore, SharedStore};

// Re-export types from cassette-analytics-core that users need to build
// and inspect events.
pub use cassette_analytics_core::{
	sanitize, AnonymousId, EventProps, MusicPlatform, PendingAction, PENDING_ACTION_TTL_MS,
};
